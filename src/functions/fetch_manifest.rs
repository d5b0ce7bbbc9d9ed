use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::cancellable::CancellableTrait;
use crate::functions::combine_url;
use crate::structures::{Error, UpdateConfig, UpdateManifest};
use crate::traits::Transport;

pub const MANIFEST_FILE : &str = "UpdateInfo.xml";
pub const CONFIG_FILE : &str = "UpdateConfig.xml";

/// Downloads a document from the update server, failures to reach it become `ManifestUnavailable`.
async fn fetch_document(transport: &dyn Transport, base_url: &str, file_name: &str, token: &CancellationToken) -> Result<String, Error> {
  let url = combine_url(base_url, file_name)?;
  let bytes = transport.get(&url)
    .cancellable(token)
    .await?
    .map_err(|error| Error::ManifestUnavailable(url.to_string(), Box::new(error)))?;
  let document = String::from_utf8(bytes).map_err(|error| Error::ManifestMalformed(format!("{} is not utf-8: {}", url, error)))?;
  Ok(document.trim_start_matches('\u{feff}').to_string())
}

#[instrument(skip(transport, token))]
pub async fn fetch_manifest(transport: &dyn Transport, base_url: &str, token: &CancellationToken) -> Result<UpdateManifest, Error> {
  let document = fetch_document(transport, base_url, MANIFEST_FILE, token).await?;
  let manifest = UpdateManifest::parse(&document)?;
  info!("Retrieved manifest version {} with {} files", manifest.version, manifest.file_count());
  Ok(manifest)
}

#[instrument(skip(transport, token))]
pub async fn fetch_update_config(transport: &dyn Transport, base_url: &str, token: &CancellationToken) -> Result<UpdateConfig, Error> {
  let document = fetch_document(transport, base_url, CONFIG_FILE, token).await?;
  UpdateConfig::parse(&document)
}
