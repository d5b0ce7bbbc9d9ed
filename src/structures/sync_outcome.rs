#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
  pub name: String,
  pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
  pub total: usize,
  pub succeeded: usize,
  pub failed: Vec<FailedFile>,
  pub cancelled: bool,
}
