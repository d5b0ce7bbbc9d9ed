use crate::structures::SyncOutcome;

impl SyncOutcome {
  pub fn failed_count(&self) -> usize {
    self.failed.len()
  }

  /// True only if every file of the worklist ended up installed.
  pub fn is_fully_successful(&self) -> bool {
    !self.cancelled && self.failed.is_empty() && self.succeeded == self.total
  }
}
