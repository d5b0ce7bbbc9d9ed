use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

pub(crate) const TEMP_FILE_PREFIX : &str = "patcher_";
pub(crate) const TEMP_FILE_SUFFIX : &str = ".zip";
pub const TEMP_FILE_MAX_AGE : Duration = Duration::from_secs(60 * 60);

/// Removes archives left behind by earlier runs. Best effort, failures are only logged.
pub(crate) async fn cleanup_temp_files(directory: &Path, max_age: Duration) {
  let mut entries = match tokio::fs::read_dir(directory).await {
    Ok(entries) => entries,
    Err(e) => {
      warn!("Error cleaning up temporary files in directory {}: {}", directory.display(), e);
      return;
    }
  };
  let cutoff = SystemTime::now().checked_sub(max_age).unwrap_or(SystemTime::UNIX_EPOCH);
  loop {
    let entry = match entries.next_entry().await {
      Ok(Some(entry)) => entry,
      Ok(None) => break,
      Err(e) => {
        warn!("Error listing {}: {}", directory.display(), e);
        break;
      }
    };
    let name = entry.file_name().to_string_lossy().to_string();
    if !name.starts_with(TEMP_FILE_PREFIX) || !name.ends_with(TEMP_FILE_SUFFIX) {
      continue;
    }
    let stale = match entry.metadata().await.and_then(|metadata| metadata.modified()) {
      Ok(modified) => modified <= cutoff,
      Err(e) => {
        debug!("Could not inspect temporary file {}: {}", name, e);
        false
      }
    };
    if stale {
      match tokio::fs::remove_file(entry.path()).await {
        Ok(()) => debug!("Cleaned up old temporary file: {}", name),
        Err(e) => debug!("Could not clean up temporary file {}: {}", name, e),
      }
    }
  }
}
