use std::time::Duration;

/// `Transport` backed by `download_async`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  pub(crate) timeout: Duration,
  pub(crate) user_agent: String,
  /// Plain http is refused unless set.
  pub(crate) allow_http: bool,
}
