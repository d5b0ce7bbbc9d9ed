use std::path::Path;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::functions::{cleanup_temp_files, download_with_retry, TEMP_FILE_MAX_AGE};
use crate::structures::{Error, FailedFile, FileEntry, Progress, Settings, SyncOutcome, UpdateTarget};
use crate::traits::Transport;

/// Installs every entry of `worklist`, at most `settings.max_concurrent_downloads` at a time.
/// A file that fails for good is recorded and the others carry on.
#[instrument(skip_all, fields(files = worklist.len()))]
pub async fn sync_files(transport: &dyn Transport, worklist: Vec<FileEntry>, settings: &Settings, local_root: &Path, progress: &Progress, token: &CancellationToken) -> SyncOutcome {
  let total = worklist.len();
  cleanup_temp_files(&settings.scratch_directory, TEMP_FILE_MAX_AGE).await;
  if let Err(e) = tokio::fs::create_dir_all(&settings.scratch_directory).await {
    warn!("Could not create scratch directory {}: {}", settings.scratch_directory.display(), e);
  }
  progress.set_totals(total as u64, worklist.iter().map(|entry| entry.size).sum());

  let results : Vec<(String, Result<(), Error>)> = futures::stream::iter(worklist)
    .map(|entry| {
      let target = UpdateTarget::new(entry, local_root);
      async move {
        if token.is_cancelled() {
          return (target.entry.name.clone(), Err(Error::Cancelled()));
        }
        let result = download_with_retry(transport, &target, settings, token).await;
        if !matches!(result, Err(Error::Cancelled())) {
          progress.file_completed(&target.entry.name, target.entry.size, result.is_ok());
        }
        (target.entry.name.clone(), result)
      }
    })
    .buffer_unordered(settings.max_concurrent_downloads.max(1))
    .collect()
    .await;

  let mut outcome = SyncOutcome {
    total,
    cancelled: token.is_cancelled(),
    ..Default::default()
  };
  for (name, result) in results {
    match result {
      Ok(()) => outcome.succeeded += 1,
      Err(Error::Cancelled()) => outcome.cancelled = true,
      Err(e) => outcome.failed.push(FailedFile { name, reason: e.to_string() }),
    }
  }
  info!("Synchronized {}/{} files, {} failed", outcome.succeeded, outcome.total, outcome.failed_count());
  outcome
}
