use std::time::Duration;

use tracing::warn;

use crate::functions::{is_extension_allowed, is_extension_blocked};
use crate::structures::{Error, Settings};

impl Default for Settings {
  fn default() -> Self {
    Self {
      update_url: String::new(),
      updater_version: 1,
      max_retry_attempts: 3,
      retry_delay: Duration::from_secs(5),
      request_timeout: Duration::from_secs(300),
      max_concurrent_downloads: 3,
      allowed_file_extensions: [
        ".exe", ".dll", ".bin", ".dat", ".ini", ".txt", ".xml", ".zip",
        ".u", ".uax", ".ukx", ".unr", ".usx", ".utx", ".int", ".bmp", ".ogg",
      ].iter().map(|extension| extension.to_string()).collect(),
      blocked_file_extensions: [".bat", ".cmd", ".ps1", ".vbs", ".js"].iter().map(|extension| extension.to_string()).collect(),
      critical_files: vec!["l2.exe".to_string(), "l2.bin".to_string()],
      require_signature_validation: true,
      scratch_directory: std::env::temp_dir(),
      self_update_file_name: if cfg!(windows) { "upd.exe".to_string() } else { "upd".to_string() },
      verify_after_sync: false,
      validate_certificates: true,
    }
  }
}

impl Settings {
  /// A file may be written only if its extension is allowed and not blocked.
  pub fn check_file(&self, file_name: &str) -> Result<(), Error> {
    if !is_extension_allowed(file_name, &self.allowed_file_extensions) || is_extension_blocked(file_name, &self.blocked_file_extensions) {
      return Err(Error::BlockedExtension(file_name.to_string()));
    }
    Ok(())
  }

  pub fn permits_file(&self, file_name: &str) -> bool {
    match self.check_file(file_name) {
      Ok(()) => true,
      Err(e) => {
        warn!("{}", e);
        false
      }
    }
  }
}
