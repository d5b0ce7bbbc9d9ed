use std::path::Path;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::cancellable::CancellableTrait;
use crate::functions::{delete_file, extract_single_entry, get_hash, wait_for_file_access, LOCK_MAX_WAIT, LOCK_POLL_INTERVAL, TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use crate::structures::{Error, HashAlgorithm, UpdateTarget};
use crate::traits::Transport;

const DELETE_ATTEMPTS : u32 = 3;
const DELETE_DELAY : Duration = Duration::from_secs(1);

/// One attempt at installing a single file: download its archive, extract it over the destination and verify it.
/// The temporary archive is removed whatever the result.
#[instrument(skip(transport, target, token), fields(file = %target.entry.name))]
pub(crate) async fn download_single_file(transport: &dyn Transport, target: &UpdateTarget, base_url: &str, scratch_directory: &Path, token: &CancellationToken) -> Result<(), Error> {
  let url = target.archive_url(base_url)?;
  let destination = target.destination();
  if let Some(parent) = destination.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }

  if tokio::fs::try_exists(&destination).await.unwrap_or(false) {
    if let Err(e) = delete_file(&destination, DELETE_ATTEMPTS, DELETE_DELAY, token).await {
      if e.is_cancelled() {
        return Err(e);
      }
      warn!("Could not remove {}, it will be overwritten in place: {}", destination.display(), e);
    }
  }

  let archive_path = scratch_directory.join(format!("{}{}_{}{}", TEMP_FILE_PREFIX, Uuid::new_v4().simple(), target.entry.name, TEMP_FILE_SUFFIX));
  let result = install(transport, target, &url, &archive_path, token).await;
  if let Err(e) = tokio::fs::remove_file(&archive_path).await {
    if e.kind() != std::io::ErrorKind::NotFound {
      debug!("Could not remove temporary archive {}: {}", archive_path.display(), e);
    }
  }
  result
}

async fn install(transport: &dyn Transport, target: &UpdateTarget, url: &url::Url, archive_path: &Path, token: &CancellationToken) -> Result<(), Error> {
  let destination = target.destination();
  let bytes = transport.get(url).cancellable(token).await??;
  debug!("Downloaded {} ({} bytes)", url, bytes.len());

  let mut archive = tokio::fs::OpenOptions::new().write(true).create_new(true).open(archive_path).await?;
  archive.write_all(&bytes).await?;
  archive.flush().await?;
  drop(archive);

  if !wait_for_file_access(&destination, LOCK_POLL_INTERVAL, LOCK_MAX_WAIT, token).await? {
    return Err(Error::FileLocked(destination.display().to_string()));
  }

  let (archive, extract_to) = (archive_path.to_path_buf(), destination.clone());
  tokio::task::spawn_blocking(move || extract_single_entry(&archive, &extract_to)).await??;

  let expected = target.entry.hash.trim();
  if expected.is_empty() {
    return Ok(());
  }
  let (hashed, algorithm) = (destination.clone(), HashAlgorithm::for_digest(expected));
  let actual = tokio::task::spawn_blocking(move || get_hash(&hashed, algorithm)).await??;
  if !actual.eq_ignore_ascii_case(expected) {
    error!("{} is corrupt after extraction, expected hash {} but got {}", target.entry.name, expected, actual);
    if let Err(e) = tokio::fs::remove_file(&destination).await {
      warn!("Cannot delete corrupted file {}: {}", destination.display(), e);
    }
    return Err(Error::IntegrityMismatch(target.entry.name.clone(), expected.to_string(), actual));
  }
  Ok(())
}
