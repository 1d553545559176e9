pub mod ai;
pub mod factory;

use crate::{
    errors::{PipelineError, ProviderCallError, ProviderStatus},
    types::ProviderReply,
};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Runs one provider call under `timeout`, converting every failure into a
/// [`PipelineError::Provider`] tagged with `role`.
///
/// On expiry the in-flight request future is dropped. The call is never retried.
pub(crate) async fn call_with_timeout<F>(
    role: &'static str,
    timeout: Duration,
    call: F,
) -> Result<ProviderReply, PipelineError>
where
    F: Future<Output = Result<ProviderReply, ProviderCallError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(reply)) => Ok(reply),
        Ok(Err(err)) => {
            let status = err.status();
            warn!(provider = role, %status, error = %err, "Provider call failed");
            Err(PipelineError::Provider {
                provider: role,
                status,
                detail: err.to_string(),
            })
        }
        Err(_) => {
            warn!(
                provider = role,
                timeout_ms = timeout.as_millis() as u64,
                "Provider call timed out"
            );
            Err(PipelineError::Provider {
                provider: role,
                status: ProviderStatus::Timeout,
                detail: format!("no response within {} ms", timeout.as_millis()),
            })
        }
    }
}
