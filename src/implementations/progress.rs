use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::info;

use crate::structures::{Progress, ProgressSnapshot};

impl ProgressSnapshot {
  pub fn files_percent(&self) -> f64 {
    if self.total_files == 0 {
      return 0.0;
    }
    self.current_file as f64 / self.total_files as f64 * 100.0
  }

  pub fn bytes_percent(&self) -> f64 {
    if self.total_bytes == 0 {
      return 0.0;
    }
    self.bytes_downloaded as f64 / self.total_bytes as f64 * 100.0
  }
}

impl Progress {
  pub fn new(sender: Arc<watch::Sender<ProgressSnapshot>>) -> Self {
    Self {
      current_action: Arc::new(Mutex::new(String::new())),
      current_file_name: Arc::new(Mutex::new(String::new())),
      files: Arc::new((AtomicU64::new(0), AtomicU64::new(0))),
      bytes: Arc::new((AtomicU64::new(0), AtomicU64::new(0))),
      sender,
    }
  }

  /// Progress that nobody listens to.
  pub fn detached() -> Self {
    let (sender, _) = watch::channel(ProgressSnapshot::default());
    Self::new(Arc::new(sender))
  }

  pub fn get_current_action(&self) -> String {
    self.current_action.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
  }

  pub(crate) fn set_current_action(&self, value: String) {
    info!("Current action: {}", value);
    *self.current_action.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
    self.publish();
  }

  pub(crate) fn set_totals(&self, files: u64, bytes: u64) {
    info!("Files to update: {} ({} bytes)", files, bytes);
    self.files.0.store(0, Ordering::Relaxed);
    self.files.1.store(files, Ordering::Relaxed);
    self.bytes.0.store(0, Ordering::Relaxed);
    self.bytes.1.store(bytes, Ordering::Relaxed);
    self.sender.send_replace(self.snapshot());
  }

  /// Counts a file as done, whether it was installed or given up on.
  pub(crate) fn file_completed(&self, file_name: &str, size: u64, succeeded: bool) {
    self.files.0.fetch_add(1, Ordering::Relaxed);
    self.bytes.0.fetch_add(size, Ordering::Relaxed);
    *self.current_file_name.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = file_name.to_string();
    let status = if succeeded {
      format!("Downloaded {}", file_name)
    } else {
      format!("Failed to update {}", file_name)
    };
    *self.current_action.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = status;
    self.publish();
  }

  pub fn snapshot(&self) -> ProgressSnapshot {
    ProgressSnapshot {
      current_file: self.files.0.load(Ordering::Relaxed),
      total_files: self.files.1.load(Ordering::Relaxed),
      bytes_downloaded: self.bytes.0.load(Ordering::Relaxed),
      total_bytes: self.bytes.1.load(Ordering::Relaxed),
      current_file_name: self.current_file_name.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone(),
      status: self.get_current_action(),
    }
  }

  // Workers publish concurrently, so a stale snapshot may arrive after a newer one.
  // Counters only ever move forward within a run.
  fn publish(&self) {
    let snapshot = self.snapshot();
    self.sender.send_modify(|current| {
      let current_file = current.current_file.max(snapshot.current_file);
      let bytes_downloaded = current.bytes_downloaded.max(snapshot.bytes_downloaded);
      *current = ProgressSnapshot {
        current_file,
        bytes_downloaded,
        ..snapshot
      };
    });
  }
}
