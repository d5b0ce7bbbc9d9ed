use std::ffi::OsString;
use std::path::Path;

use tracing::{info, instrument};

use crate::structures::{Error, SystemLauncher};
use crate::traits::Launcher;

impl Launcher for SystemLauncher {
  #[instrument(skip(self))]
  fn launch(&self, program: &Path, args: &[OsString]) -> Result<(), Error> {
    let child = std::process::Command::new(program).args(args).spawn()?;
    info!("Started {} with pid {}", program.display(), child.id());
    Ok(())
  }
}
