use async_trait::async_trait;
use url::Url;

use crate::structures::Error;

/// Fetches remote resources. Implementations apply their own timeouts and cache headers.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Retrieves the whole body of `url`, failing on any non-success status.
  async fn get(&self, url: &Url) -> Result<Vec<u8>, Error>;
}
