use std::path::{Path, PathBuf};

use url::Url;

use crate::functions::combine_url;
use crate::structures::{Error, FileEntry, UpdateTarget};

const ARCHIVE_SUFFIX : &str = ".zip";

impl UpdateTarget {
  pub fn new(entry: FileEntry, local_root: &Path) -> Self {
    Self {
      entry,
      local_root: local_root.to_path_buf(),
    }
  }

  /// `{base}/{path}/{name}.zip`
  pub fn archive_url(&self, base_url: &str) -> Result<Url, Error> {
    combine_url(base_url, &format!("{}/{}{}", self.entry.path, self.entry.name, ARCHIVE_SUFFIX))
  }

  /// `{local_root}/{save_path}/{name}`
  pub fn destination(&self) -> PathBuf {
    let mut destination = self.local_root.clone();
    for component in self.entry.save_path.split(|c| c == '/' || c == '\\').filter(|c| !c.is_empty()) {
      destination.push(component);
    }
    destination.push(&self.entry.name);
    destination
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use crate::structures::{FileEntry, UpdateTarget};

  fn entry(path: &str, save_path: &str) -> FileEntry {
    FileEntry {
      name: "Interface.utx".to_string(),
      path: path.to_string(),
      size: 1,
      hash: String::new(),
      quick_update: true,
      check_hash: false,
      save_path: save_path.to_string(),
    }
  }

  #[test]
  fn builds_archive_url_and_destination() {
    let target = UpdateTarget::new(entry("system\\textures", "textures"), Path::new("/games/l2"));
    assert_eq!(target.archive_url("https://updates.example.org/patch/").unwrap().as_str(), "https://updates.example.org/patch/system/textures/Interface.utx.zip");
    assert_eq!(target.destination(), Path::new("/games/l2").join("textures").join("Interface.utx"));
  }

  #[test]
  fn root_level_files_land_in_the_root() {
    let target = UpdateTarget::new(entry("system", ""), Path::new("/games/l2"));
    assert_eq!(target.destination(), Path::new("/games/l2").join("Interface.utx"));
  }
}
