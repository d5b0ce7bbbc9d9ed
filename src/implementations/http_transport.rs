use std::time::Duration;

use async_trait::async_trait;
use download_async::http::HeaderValue;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::structures::{Error, HttpTransport};
use crate::traits::Transport;

impl HttpTransport {
  pub fn new(timeout: Duration, allow_http: bool) -> Self {
    Self {
      timeout,
      user_agent: format!("GamePatcher ({})", env!("CARGO_PKG_VERSION")),
      allow_http,
    }
  }
}

#[async_trait]
impl Transport for HttpTransport {
  #[instrument(skip(self), fields(url = %url))]
  async fn get(&self, url: &Url) -> Result<Vec<u8>, Error> {
    if url.scheme() == "http" && !self.allow_http {
      return Err(Error::ValidationFailed(format!("refusing plain http request to {}", url)));
    }
    let mut downloader = download_async::Downloader::new();
    downloader.use_uri(url.as_str().parse::<download_async::http::Uri>()?);
    if url.scheme() == "http" {
      downloader.allow_http();
    }
    if let Some(headers) = downloader.headers() {
      headers.append("User-Agent", HeaderValue::from_str(&self.user_agent)?);
      // Defeat CDN and proxy caches, every request has to reach the origin.
      headers.append("X-Request-ID", HeaderValue::from_str(&Uuid::new_v4().to_string())?);
      headers.append("Cache-Control", HeaderValue::from_static("no-cache, no-store, must-revalidate"));
      headers.append("Pragma", HeaderValue::from_static("no-cache"));
    }

    let mut buffer = vec![];
    let response = downloader.download(download_async::Body::empty(), &mut buffer);
    let parts = tokio::time::timeout(self.timeout, response).await
      .map_err(|_| Error::Timeout(url.to_string()))?
      .map_err(|error| Error::Transport(url.to_string(), error.to_string()))?;

    if !parts.status.is_success() {
      return Err(Error::HttpStatus(url.to_string(), parts.status.as_u16()));
    }
    debug!("Received {} bytes from {}", buffer.len(), url);
    Ok(buffer)
  }
}
