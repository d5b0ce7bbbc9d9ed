#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  CheckingSelfUpdate,
  FetchingManifest,
  ValidatingManifest,
  Diffing,
  Syncing,
  Completed,
  Failed,
  Cancelled,
}
