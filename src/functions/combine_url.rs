use tracing::trace;
use url::Url;

use crate::structures::Error;

/// Joins a base url and a relative path with exactly one `/`, backslashes become forward slashes.
pub fn combine_url(base_url: &str, path: &str) -> Result<Url, Error> {
  let base_url = base_url.trim_end_matches('/');
  let path = path.replace('\\', "/");
  let combined = format!("{}/{}", base_url, path.trim_start_matches('/'));
  trace!("Combined url: {} + {} = {}", base_url, path, combined);
  Url::parse(&combined).map_err(|error| Error::InvalidUrl(format!("{} ({})", combined, error)))
}
