//! Deadline and cancellation wrapper for suspension points.

use crate::error::{CancelReason, DispatchError};
use core::future::Future;
use core::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs `future` until it completes, `timeout` elapses, or `cancel` fires.
///
/// The cancellation branch is polled first, so an already-canceled token
/// never starts the call. Losing branches are dropped.
pub(crate) async fn bounded<F, T>(
    future: F,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<T, DispatchError>
where
    F: Future<Output = Result<T, DispatchError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!("Request canceled by caller");
            Err(DispatchError::Canceled(CancelReason::Caller))
        }
        outcome = tokio::time::timeout(timeout, future) => match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?timeout, "Request deadline elapsed");
                Err(DispatchError::Canceled(CancelReason::Deadline(timeout)))
            }
        },
    }
}
