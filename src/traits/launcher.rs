use std::ffi::OsString;
use std::path::Path;

use crate::structures::Error;

pub trait Launcher: Send + Sync {
  /// Starts `program` without waiting for it to exit.
  fn launch(&self, program: &Path, args: &[OsString]) -> Result<(), Error>;
}
