// Use-case instrumentation
//
// The explicit middleware form of "wrap every use case with logging": callers
// pass the operation name and the future, the wrapper emits a structured
// record with outcome and duration.

use crate::error::Result;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info};

/// Run a use case, logging its outcome and duration
pub async fn instrument<T, F>(operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let started = Instant::now();
    match fut.await {
        Ok(value) => {
            info!(
                operation,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Operation completed"
            );
            Ok(value)
        }
        Err(e) => {
            error!(
                operation,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Operation failed"
            );
            Err(e)
        }
    }
}
