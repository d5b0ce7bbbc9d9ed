use std::ffi::OsString;
use std::path::Path;

use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::cancellable::CancellableTrait;
use crate::functions::{combine_url, verify_executable_signature, TEMP_FILE_PREFIX};
use crate::structures::{Error, Settings};
use crate::traits::{Launcher, Transport};

/// Downloads, validates and starts the newer updater, handing it our own executable path.
/// Returns true once the replacement is running, the caller is expected to exit.
#[instrument(skip(transport, launcher, settings, token))]
pub async fn perform_self_update(transport: &dyn Transport, launcher: &dyn Launcher, settings: &Settings, token: &CancellationToken) -> bool {
  match download_and_launch(transport, launcher, settings, token).await {
    Ok(launched) => launched,
    Err(e) => {
      error!("Self update failed: {}", e);
      false
    }
  }
}

async fn download_and_launch(transport: &dyn Transport, launcher: &dyn Launcher, settings: &Settings, token: &CancellationToken) -> Result<bool, Error> {
  let url = combine_url(&settings.update_url, &settings.self_update_file_name)?;
  let bytes = transport.get(&url).cancellable(token).await??;

  tokio::fs::create_dir_all(&settings.scratch_directory).await?;
  let updater_path = settings.scratch_directory.join(format!("{}upd_{}_{}", TEMP_FILE_PREFIX, Uuid::new_v4().simple(), settings.self_update_file_name));
  if let Err(e) = write_new_file(&updater_path, &bytes).await {
    discard(&updater_path).await;
    return Err(e);
  }

  if settings.require_signature_validation && !verify_executable_signature(&updater_path) {
    warn!("Downloaded updater failed signature validation, discarding it");
    discard(&updater_path).await;
    return Ok(false);
  }

  if let Err(e) = launch_updater(launcher, &updater_path).await {
    discard(&updater_path).await;
    return Err(e);
  }
  info!("Started updater {}", updater_path.display());
  Ok(true)
}

async fn launch_updater(launcher: &dyn Launcher, updater_path: &Path) -> Result<(), Error> {
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(updater_path, std::fs::Permissions::from_mode(0o755)).await?;
  }

  let args : Vec<OsString> = match std::env::current_exe() {
    Ok(current) => vec![current.into_os_string()],
    Err(e) => {
      warn!("Could not determine the running executable: {}", e);
      vec![]
    }
  };
  launcher.launch(updater_path, &args)
}

async fn discard(path: &Path) {
  if let Err(e) = tokio::fs::remove_file(path).await {
    if e.kind() != std::io::ErrorKind::NotFound {
      warn!("Cannot delete updater download {}: {}", path.display(), e);
    }
  }
}

async fn write_new_file(path: &Path, bytes: &[u8]) -> Result<(), Error> {
  let mut file = tokio::fs::OpenOptions::new().write(true).create_new(true).open(path).await?;
  file.write_all(bytes).await?;
  file.flush().await?;
  Ok(())
}
