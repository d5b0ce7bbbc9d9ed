use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::cancellable::CancellableTrait;
use crate::functions::combine_url;
use crate::structures::Error;
use crate::traits::Transport;

pub const UPDATER_VERSION_FILE : &str = "updaterver.txt";

/// True only if the server announces a strictly newer updater.
/// Any failure along the way means "no update", this check must never block patching.
#[instrument(skip(transport, token))]
pub async fn check_self_update(transport: &dyn Transport, base_url: &str, current_version: i64, token: &CancellationToken) -> bool {
  match remote_updater_version(transport, base_url, token).await {
    Ok(remote_version) => {
      info!("Remote updater version {}, running version {}", remote_version, current_version);
      remote_version > current_version
    },
    Err(error) => {
      warn!("Could not check for a newer updater: {}", error);
      false
    }
  }
}

async fn remote_updater_version(transport: &dyn Transport, base_url: &str, token: &CancellationToken) -> Result<i64, Error> {
  let url = combine_url(base_url, UPDATER_VERSION_FILE)?;
  let bytes = transport.get(&url).cancellable(token).await??;
  let text = String::from_utf8(bytes)?;
  let text = text.trim().trim_start_matches('\u{feff}');
  text.parse::<i64>().map_err(|_| Error::ValidationFailed(format!("{} is not a version number: {:?}", UPDATER_VERSION_FILE, text)))
}
