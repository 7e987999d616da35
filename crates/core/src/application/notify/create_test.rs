//! Unit tests for create-notification validation

use super::create::{validate_request, CreateNotificationRequest};
use crate::domain::Priority;
use serde_json::json;

fn valid_request() -> CreateNotificationRequest {
    CreateNotificationRequest {
        event_type: "user_registered".to_string(),
        recipient_id: "user-1".to_string(),
        recipient_address: "alice@example.com".to_string(),
        subject: "Welcome!".to_string(),
        template_name: "welcome".to_string(),
        template_data: json!({"name": "Alice"}),
        priority: Priority::default(),
    }
}

#[test]
fn test_validate_valid_request() {
    assert!(validate_request(&valid_request()).is_ok());
}

#[test]
fn test_validate_empty_event_type() {
    let mut req = valid_request();
    req.event_type = "".to_string();

    let result = validate_request(&req);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("event_type"));
}

#[test]
fn test_validate_empty_recipient_id() {
    let mut req = valid_request();
    req.recipient_id = "".to_string();

    assert!(validate_request(&req).is_err());
}

#[test]
fn test_validate_bad_address() {
    let mut req = valid_request();
    req.recipient_address = "not-an-address".to_string();

    let result = validate_request(&req);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("mail address"));
}

#[test]
fn test_validate_empty_template() {
    let mut req = valid_request();
    req.template_name = "".to_string();

    assert!(validate_request(&req).is_err());
}

#[test]
fn test_priority_defaults_to_medium_in_command() {
    let req: CreateNotificationRequest = serde_json::from_value(json!({
        "event_type": "user_registered",
        "recipient_id": "user-1",
        "recipient_address": "alice@example.com",
        "subject": "Welcome!",
        "template_name": "welcome",
        "template_data": {}
    }))
    .unwrap();

    assert_eq!(req.priority, Priority::Medium);
}
