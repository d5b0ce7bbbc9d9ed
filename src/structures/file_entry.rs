use serde::Deserialize;

/// A single file as declared by the remote manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileEntry {
  pub name: String,
  /// Remote directory of the file, prefixed with the manifest root folder name.
  pub path: String,
  #[serde(default)]
  pub size: u64,
  pub hash: String,
  #[serde(default)]
  pub quick_update: bool,
  #[serde(default)]
  pub check_hash: bool,
  /// Local directory relative to the installation root. Derived from `path`, never part of the document.
  #[serde(skip)]
  pub save_path: String,
}
