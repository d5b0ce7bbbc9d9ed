use std::path::Path;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cancellable::CancellableTrait;
use crate::structures::Error;

pub const LOCK_POLL_INTERVAL : Duration = Duration::from_millis(500);
pub const LOCK_MAX_WAIT : Duration = Duration::from_secs(10);

/// Sharing and lock violations, as opposed to missing files or denied permissions.
pub fn is_lock_error(error: &std::io::Error) -> bool {
  // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION on Windows; EBUSY, ETXTBSY elsewhere
  let lock_codes : &[i32] = if cfg!(windows) { &[32, 33] } else if cfg!(unix) { &[16, 26] } else { &[] };
  error.raw_os_error().map_or(false, |code| lock_codes.contains(&code))
}

/// Polls until `file_path` can be opened for writing or `max_wait` elapses.
/// Returns `Ok(false)` when the file stayed inaccessible. A missing file is accessible.
pub async fn wait_for_file_access(file_path: &Path, poll_interval: Duration, max_wait: Duration, token: &CancellationToken) -> Result<bool, Error> {
  let started = Instant::now();
  loop {
    match tokio::fs::OpenOptions::new().write(true).open(file_path).await {
      Ok(_) => return Ok(true),
      Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(true),
      Err(error) => debug!("{} is not accessible yet: {}", file_path.display(), error),
    }
    if started.elapsed() >= max_wait {
      return Ok(false);
    }
    tokio::time::sleep(poll_interval).cancellable(token).await?;
  }
}

/// Gives whatever holds `file_path` a chance to let go of it.
/// Running game processes are never terminated, a user's session is worth more than an update.
pub async fn release_file_lock(file_path: &Path, token: &CancellationToken) -> Result<bool, Error> {
  warn!("{} is locked by another process, close the game if it is running. Waiting for the file to be released", file_path.display());
  let released = wait_for_file_access(file_path, LOCK_POLL_INTERVAL, LOCK_MAX_WAIT, token).await?;
  if !released {
    warn!("{} is still locked after {:?}", file_path.display(), LOCK_MAX_WAIT);
  }
  Ok(released)
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use tokio_util::sync::CancellationToken;

  use crate::functions::{is_lock_error, wait_for_file_access};

  #[tokio::test]
  async fn accessible_and_missing_files_do_not_wait() {
    let dir = tempfile::tempdir().unwrap();
    let token = CancellationToken::new();
    let path = dir.path().join("l2.ini");
    assert!(wait_for_file_access(&path, Duration::from_millis(10), Duration::from_millis(50), &token).await.unwrap());
    std::fs::write(&path, b"x").unwrap();
    assert!(wait_for_file_access(&path, Duration::from_millis(10), Duration::from_millis(50), &token).await.unwrap());
  }

  #[tokio::test]
  async fn directories_are_never_accessible_as_files() {
    let dir = tempfile::tempdir().unwrap();
    let token = CancellationToken::new();
    let accessible = wait_for_file_access(dir.path(), Duration::from_millis(10), Duration::from_millis(30), &token).await.unwrap();
    assert!(!accessible);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
  async fn waits_until_the_file_is_released() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("l2.exe");
    std::fs::create_dir(&path).unwrap();
    let held = path.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(50)).await;
      std::fs::remove_dir(&held).unwrap();
    });
    let accessible = wait_for_file_access(&path, Duration::from_millis(10), Duration::from_secs(5), &CancellationToken::new()).await.unwrap();
    assert!(accessible);
  }

  #[test]
  fn not_found_is_not_a_lock() {
    let error = std::io::Error::from(std::io::ErrorKind::NotFound);
    assert!(!is_lock_error(&error));
  }
}
