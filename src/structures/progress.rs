use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

/// Point-in-time view of a run, the latest one received is authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
  pub current_file: u64,
  pub total_files: u64,
  pub bytes_downloaded: u64,
  pub total_bytes: u64,
  pub current_file_name: String,
  pub status: String,
}

/// Shared counters of a single run, cheap to clone into every worker.
#[derive(Clone)]
pub struct Progress {
  pub(crate) current_action: Arc<Mutex<String>>,
  pub(crate) current_file_name: Arc<Mutex<String>>,
  /// Completed .. out of .. files
  pub(crate) files: Arc<(AtomicU64, AtomicU64)>,
  /// Attributed .. out of .. bytes
  pub(crate) bytes: Arc<(AtomicU64, AtomicU64)>,
  pub(crate) sender: Arc<watch::Sender<ProgressSnapshot>>,
}
