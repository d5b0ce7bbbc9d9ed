use std::path::PathBuf;

use crate::structures::FileEntry;

/// A worklist entry joined with the installation it is written into.
#[derive(Debug, Clone)]
pub struct UpdateTarget {
  pub entry: FileEntry,
  pub local_root: PathBuf,
}
