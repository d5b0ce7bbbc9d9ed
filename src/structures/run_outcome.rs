#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
  /// Every stale file was installed.
  Completed { updated: usize },
  NothingToDo,
  /// A newer updater was launched, the host is expected to exit.
  SelfUpdated,
  Failed(String),
  Cancelled,
}
