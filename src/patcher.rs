use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::cancellable::CancellableTrait;
use crate::functions::{check_self_update, compute_worklist, fetch_manifest, fetch_update_config, perform_self_update, sync_files, validate_manifest, verify_installed};
use crate::structures::{Error, Phase, Progress, ProgressSnapshot, RunOutcome, Settings, UpdateConfig, UpdateMode};
use crate::traits::{Launcher, Transport};

/// Brings a local installation in line with the update server, one run at a time.
/// Clones share the same run state, so one clone may cancel what another started.
#[derive(Clone)]
pub struct Patcher {
  pub(crate) settings: Arc<Settings>,
  pub(crate) local_root: PathBuf,
  pub(crate) transport: Arc<dyn Transport>,
  pub(crate) launcher: Arc<dyn Launcher>,
  pub(crate) in_progress: Arc<AtomicBool>,
  pub(crate) phase: Arc<Mutex<Phase>>,
  pub(crate) status: Arc<Mutex<String>>,
  pub(crate) cancellation: Arc<Mutex<CancellationToken>>,
  pub(crate) progress_sender: Arc<watch::Sender<ProgressSnapshot>>,
}

/// Releases the single run slot when dropped, whichever way the run ends.
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Patcher {
  /// Runs a full reconciliation on the current task and reports how it ended.
  /// Fails with `AlreadyRunning` if another run holds the slot.
  pub async fn run(&self, mode: UpdateMode) -> Result<RunOutcome, Error> {
    let (guard, token) = self.claim()?;
    Ok(self.run_claimed(mode, guard, token).await)
  }

  /// Same as `run`, but in the background. The slot is claimed before returning.
  pub fn start_update(&self, mode: UpdateMode) -> Result<JoinHandle<RunOutcome>, Error> {
    let (guard, token) = self.claim()?;
    let patcher = self.clone();
    Ok(tokio::spawn(async move { patcher.run_claimed(mode, guard, token).await }))
  }

  /// Asks the active run to stop at its next checkpoint. Does nothing when idle.
  pub fn cancel(&self) {
    if self.is_running() {
      info!("Cancellation requested");
      lock(&self.cancellation).cancel();
    }
  }

  pub fn phase(&self) -> Phase {
    *lock(&self.phase)
  }

  pub fn status(&self) -> String {
    lock(&self.status).clone()
  }

  pub fn is_running(&self) -> bool {
    self.in_progress.load(Ordering::SeqCst)
  }

  pub fn local_root(&self) -> &Path {
    &self.local_root
  }

  /// Progress of the current or last run. The latest value is authoritative.
  pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
    self.progress_sender.subscribe()
  }

  /// Links and titles for a front end, independent of any run.
  pub async fn fetch_update_config(&self) -> Result<UpdateConfig, Error> {
    fetch_update_config(self.transport.as_ref(), &self.settings.update_url, &CancellationToken::new()).await
  }

  fn claim(&self) -> Result<(RunGuard, CancellationToken), Error> {
    if self.in_progress.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
      warn!("Refusing to start an update while another one is running");
      return Err(Error::AlreadyRunning());
    }
    let guard = RunGuard(self.in_progress.clone());
    let token = CancellationToken::new();
    *lock(&self.cancellation) = token.clone();
    self.set_phase(Phase::Idle, "Starting update".to_string());
    Ok((guard, token))
  }

  #[instrument(skip(self, _guard, token))]
  async fn run_claimed(&self, mode: UpdateMode, _guard: RunGuard, token: CancellationToken) -> RunOutcome {
    self.progress_sender.send_replace(ProgressSnapshot::default());
    let progress = Progress::new(self.progress_sender.clone());
    let outcome = match self.reconcile(mode, &progress, &token).await {
      Ok(outcome) => outcome,
      Err(e) if e.is_cancelled() || token.is_cancelled() => RunOutcome::Cancelled,
      Err(e) => RunOutcome::Failed(e.to_string()),
    };
    let (phase, status) = match &outcome {
      RunOutcome::Completed { updated } => (Phase::Completed, format!("Update completed, {} files updated", updated)),
      RunOutcome::NothingToDo => (Phase::Completed, "All files are up to date".to_string()),
      RunOutcome::SelfUpdated => (Phase::Completed, "A newer updater was started".to_string()),
      RunOutcome::Failed(reason) => (Phase::Failed, format!("Update failed: {}", reason)),
      RunOutcome::Cancelled => (Phase::Cancelled, "Update stopped by user".to_string()),
    };
    self.set_phase(phase, status.clone());
    progress.set_current_action(status);
    outcome
  }

  async fn reconcile(&self, mode: UpdateMode, progress: &Progress, token: &CancellationToken) -> Result<RunOutcome, Error> {
    let transport = self.transport.as_ref();
    let settings = self.settings.as_ref();

    self.enter(Phase::CheckingSelfUpdate, "Checking for a newer updater", progress, token)?;
    if check_self_update(transport, &settings.update_url, settings.updater_version, token).await {
      self.enter(Phase::CheckingSelfUpdate, "Downloading a newer updater", progress, token)?;
      if perform_self_update(transport, self.launcher.as_ref(), settings, token).await {
        return Ok(RunOutcome::SelfUpdated);
      }
      warn!("Self update did not go through, continuing with the running updater");
    }

    self.enter(Phase::FetchingManifest, "Retrieving the file list", progress, token)?;
    let manifest = fetch_manifest(transport, &settings.update_url, token).await?;

    self.enter(Phase::ValidatingManifest, "Validating the file list", progress, token)?;
    validate_manifest(&manifest, settings)?;

    self.enter(Phase::Diffing, "Checking local files", progress, token)?;
    let (local_root, policy) = (self.local_root.clone(), self.settings.clone());
    let worklist = tokio::task::spawn_blocking(move || {
      compute_worklist(&manifest, mode, &local_root)
        .into_iter()
        .filter(|entry| policy.permits_file(&entry.name))
        .collect::<Vec<_>>()
    }).cancellable(token).await??;
    if worklist.is_empty() {
      return Ok(RunOutcome::NothingToDo);
    }

    self.enter(Phase::Syncing, &format!("Updating {} files", worklist.len()), progress, token)?;
    let installed = if settings.verify_after_sync { worklist.clone() } else { Vec::new() };
    let outcome = sync_files(transport, worklist, settings, &self.local_root, progress, token).await;
    if outcome.cancelled {
      return Err(Error::Cancelled());
    }
    if !outcome.is_fully_successful() {
      let names : Vec<&str> = outcome.failed.iter().map(|failed| failed.name.as_str()).collect();
      return Ok(RunOutcome::Failed(format!("{} of {} files could not be updated: {}", outcome.failed_count(), outcome.total, names.join(", "))));
    }

    if settings.verify_after_sync {
      progress.set_current_action("Verifying installed files".to_string());
      let local_root = self.local_root.clone();
      let mismatched = tokio::task::spawn_blocking(move || verify_installed(&local_root, &installed)).cancellable(token).await??;
      if !mismatched.is_empty() {
        let names : Vec<&str> = mismatched.iter().map(|entry| entry.name.as_str()).collect();
        return Ok(RunOutcome::Failed(format!("{} files failed verification: {}", mismatched.len(), names.join(", "))));
      }
    }
    Ok(RunOutcome::Completed { updated: outcome.succeeded })
  }

  fn enter(&self, phase: Phase, status: &str, progress: &Progress, token: &CancellationToken) -> Result<(), Error> {
    if token.is_cancelled() {
      return Err(Error::Cancelled());
    }
    self.set_phase(phase, status.to_string());
    progress.set_current_action(status.to_string());
    Ok(())
  }

  fn set_phase(&self, phase: Phase, status: String) {
    *lock(&self.phase) = phase;
    *lock(&self.status) = status;
  }
}
