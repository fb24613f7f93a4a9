use super::*;
use crate::error::AppError;
use datespot_core::util::validate::GateConfig;
use std::{future::Future, time::Duration};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    /// Upper limit for every single remote call.
    pub timeout: Duration,
    pub gate: GateConfig,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            gate: GateConfig::default(),
        }
    }
}

/// Awaits a remote call for at most `limit`.
pub(crate) async fn remote_call<T, E, F>(limit: Duration, what: &str, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Into<AppError>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(res) => res.map_err(Into::into),
        Err(_) => {
            warn!("Gave up waiting for '{}' after {:?}", what, limit);
            Err(AppError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timeout_elapses() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, AppError>(())
        };
        let err = remote_call(Duration::from_secs(1), "sleep", slow)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Timeout(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn errors_are_converted() {
        let failing = async { Err::<(), _>(datespot_core::repositories::Error::NotFound) };
        let err = remote_call(DEFAULT_TIMEOUT, "lookup", failing)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Business(usecases::Error::Repo(_))));
    }
}
