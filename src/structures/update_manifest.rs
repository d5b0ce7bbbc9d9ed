use serde::Deserialize;

use crate::structures::FolderNode;

/// Parsed `UpdateInfo.xml`. Fetched once per run and never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateManifest {
  #[serde(default)]
  pub version: i32,
  pub folder: FolderNode,
}
