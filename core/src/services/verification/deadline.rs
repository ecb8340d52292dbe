//! Per-call deadlines for collaborator calls

use std::future::Future;
use std::time::Duration;

/// Await `call`, giving up after `limit`
///
/// On expiry the error produced by `on_timeout` (given the limit in
/// milliseconds) is returned in place of the call's own result.
pub(crate) async fn with_deadline<T, E, F>(
    limit: Option<Duration>,
    call: F,
    on_timeout: impl FnOnce(u64) -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout(limit.as_millis() as u64)),
        },
        None => call.await,
    }
}
