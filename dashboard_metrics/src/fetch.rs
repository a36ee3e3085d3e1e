use std::time::Duration;
use thiserror::Error;

pub use surf::StatusCode;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed with status {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Failed(surf::Error),
    #[error("request timed out")]
    Timeout,
}

pub type FetchResult = std::result::Result<String, FetchError>;

/// Fetches one metric endpoint's raw response body.
///
/// A non-2xx status is an error for this endpoint only; the caller owns
/// the panel-level fallback. A request that exceeds `timeout` fails
/// instead of leaving its panel loading forever.
pub async fn fetch_text(url: &str, timeout: Duration) -> FetchResult {
    async_std::future::timeout(timeout, async {
        let mut response = surf::get(url).await.map_err(FetchError::Failed)?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        response.body_string().await.map_err(FetchError::Failed)
    })
    .await
    .map_err(|_| FetchError::Timeout)?
}
