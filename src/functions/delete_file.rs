use std::path::Path;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::cancellable::CancellableTrait;
use crate::structures::Error;

/// Removes a file, retrying a few times to ride out short lived locks. A missing file counts as removed.
#[instrument(skip(token))]
pub(crate) async fn delete_file(file_path: &Path, attempts: u32, delay: Duration, token: &CancellationToken) -> Result<(), Error> {
  let attempts = attempts.max(1);
  for attempt in 1..=attempts {
    match tokio::fs::remove_file(file_path).await {
      Ok(()) => return Ok(()),
      Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
      Err(error) if attempt < attempts => {
        debug!("Deleting {} failed on attempt {}: {}", file_path.display(), attempt, error);
        tokio::time::sleep(delay).cancellable(token).await?;
      },
      Err(error) => return Err(error.into()),
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use tokio_util::sync::CancellationToken;

  use crate::functions::delete_file;

  #[tokio::test]
  async fn deletes_existing_and_ignores_missing() {
    let dir = tempfile::tempdir().unwrap();
    let token = CancellationToken::new();
    let path = dir.path().join("old.dat");
    std::fs::write(&path, b"old").unwrap();
    delete_file(&path, 3, Duration::from_millis(1), &token).await.unwrap();
    assert!(!path.exists());
    delete_file(&path, 3, Duration::from_millis(1), &token).await.unwrap();
  }

  #[tokio::test]
  async fn gives_up_after_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let token = CancellationToken::new();
    // A non-empty directory can't be removed as a file.
    let path = dir.path().join("folder");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("inner"), b"x").unwrap();
    assert!(delete_file(&path, 2, Duration::from_millis(1), &token).await.is_err());
  }
}
