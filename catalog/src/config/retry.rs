//! Fixed-interval retry for startup steps.

use std::future::Future;
use std::time::Duration;

use catalog_repository::CancellationToken;
use tracing::warn;

use crate::ServiceError;

/// Run `attempt` until it succeeds, pausing `interval` between failures.
///
/// Stops with the last error once `max_attempts` is reached, or with
/// `ServiceError::Cancelled` when `shutdown` fires, whether during an attempt
/// or while waiting. An interrupted attempt is dropped. With no cap it
/// retries until interrupted.
pub async fn retry_until<T, E, F, Fut>(
    interval: Duration,
    max_attempts: Option<u32>,
    shutdown: &CancellationToken,
    mut attempt: F,
) -> Result<T, ServiceError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<ServiceError> + std::fmt::Display,
{
    let mut number = 0u32;
    loop {
        number += 1;
        if shutdown.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        let outcome = tokio::select! {
            _ = shutdown.cancelled() => return Err(ServiceError::Cancelled),
            outcome = attempt(number) => outcome,
        };
        let error = match outcome {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if matches!(max_attempts, Some(max) if number >= max) {
            return Err(error.into());
        }

        warn!(attempt = number, error = %error, retry_in = ?interval, "Attempt failed, retrying");

        tokio::select! {
            _ = shutdown.cancelled() => return Err(ServiceError::Cancelled),
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
