use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::cancellable::CancellableTrait;
use crate::functions::{download_single_file, release_file_lock};
use crate::structures::{AttemptOutcome, Error, Settings, UpdateTarget};
use crate::traits::Transport;

/// Runs `download_single_file` until it succeeds, fails for good, runs out of attempts or gets cancelled.
#[instrument(skip(transport, target, settings, token), fields(file = %target.entry.name))]
pub(crate) async fn download_with_retry(transport: &dyn Transport, target: &UpdateTarget, settings: &Settings, token: &CancellationToken) -> Result<(), Error> {
  let attempts = settings.max_retry_attempts.max(1);
  let mut attempt = 0;
  loop {
    attempt += 1;
    if token.is_cancelled() {
      return Err(Error::Cancelled());
    }
    let result = download_single_file(transport, target, &settings.update_url, &settings.scratch_directory, token).await;
    match AttemptOutcome::from(result) {
      AttemptOutcome::Success => {
        info!("Downloaded {}", target.entry.name);
        return Ok(());
      },
      AttemptOutcome::FatalFailure(e) => {
        if !e.is_cancelled() {
          error!("Giving up on {}: {}", target.entry.name, e);
        }
        return Err(e);
      },
      AttemptOutcome::RetryableFailure(e) if attempt >= attempts => {
        error!("Giving up on {} after {} attempts: {}", target.entry.name, attempt, e);
        return Err(e);
      },
      AttemptOutcome::RetryableFailure(e) => {
        warn!("Attempt {}/{} for {} failed: {}", attempt, attempts, target.entry.name, e);
        if e.is_file_locked() {
          release_file_lock(&target.destination(), token).await?;
        }
        tokio::time::sleep(settings.retry_delay).cancellable(token).await?;
      },
    }
  }
}
