//! Deadline wrapper for calls to external backends.

use crate::{PropcacheError, PropcacheResult};
use std::future::Future;
use std::time::Duration;

/// Runs `future`, failing with [`PropcacheError::Timeout`] once `duration` elapses.
///
/// `operation` names the call in the resulting error message.
pub async fn with_timeout<F, T>(duration: Duration, operation: &str, future: F) -> PropcacheResult<T>
where
    F: Future<Output = PropcacheResult<T>>,
{
    tokio::time::timeout(duration, future).await.map_err(|_| {
        PropcacheError::Timeout(format!("{} timed out after {:?}", operation, duration))
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), "noop", async { Ok::<_, PropcacheError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timeout_exceeded() {
        let result = with_timeout(Duration::from_millis(10), "GET key", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, PropcacheError>(42)
        })
        .await;

        match result {
            Err(PropcacheError::Timeout(message)) => assert!(message.contains("GET key")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: PropcacheResult<()> = with_timeout(Duration::from_secs(1), "DEL", async {
            Err(PropcacheError::cache("connection refused"))
        })
        .await;
        assert!(matches!(result, Err(PropcacheError::Cache(_))));
    }
}
