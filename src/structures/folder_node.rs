use serde::{Deserialize, Deserializer};

use crate::structures::FileEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderNode {
  #[serde(default)]
  pub name: String,
  #[serde(default, deserialize_with = "folder_list")]
  pub folders: Vec<FolderNode>,
  #[serde(default, deserialize_with = "file_list")]
  pub files: Vec<FileEntry>,
}

// XmlSerializer names array items after the type, hand written manifests tend to use the short names.
fn folder_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FolderNode>, D::Error> {
  #[derive(Deserialize)]
  struct List {
    #[serde(rename = "FolderModel", alias = "Folder", default)]
    items: Vec<FolderNode>,
  }
  Ok(List::deserialize(deserializer)?.items)
}

fn file_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FileEntry>, D::Error> {
  #[derive(Deserialize)]
  struct List {
    #[serde(rename = "FileModel", alias = "File", default)]
    items: Vec<FileEntry>,
  }
  Ok(List::deserialize(deserializer)?.items)
}
