use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved updater settings. Loading them is the host's business.
#[derive(Debug, Clone)]
pub struct Settings {
  pub update_url: String,
  /// Version of the running updater, compared against `updaterver.txt`.
  pub updater_version: i64,
  pub max_retry_attempts: u32,
  pub retry_delay: Duration,
  pub request_timeout: Duration,
  pub max_concurrent_downloads: usize,
  pub allowed_file_extensions: Vec<String>,
  pub blocked_file_extensions: Vec<String>,
  /// Files whose extension is validated before anything is downloaded.
  pub critical_files: Vec<String>,
  pub require_signature_validation: bool,
  /// Where archives and updater downloads are staged.
  pub scratch_directory: PathBuf,
  pub self_update_file_name: String,
  pub verify_after_sync: bool,
  /// Only https endpoints are contacted unless this is turned off.
  pub validate_certificates: bool,
}
