use tracing::instrument;

use crate::functions::check_root_element;
use crate::structures::{Error, FileEntry, UpdateManifest};

pub(crate) const MANIFEST_ROOT_ELEMENT : &str = "UpdateInfo";

impl UpdateManifest {
  /// Deserializes an `UpdateInfo.xml` document. Either the whole tree parses or nothing is returned.
  #[instrument(skip(document))]
  pub fn parse(document: &str) -> Result<Self, Error> {
    check_root_element(document, MANIFEST_ROOT_ELEMENT)?;
    Ok(quick_xml::de::from_str(document)?)
  }

  pub fn file_count(&self) -> usize {
    self.folder.file_count()
  }

  /// Files whose name matches one of `names`, ignoring case.
  pub fn find_files(&self, names: &[String]) -> Vec<&FileEntry> {
    self.folder.all_files()
      .into_iter()
      .filter(|file| names.iter().any(|name| name.eq_ignore_ascii_case(&file.name)))
      .collect()
  }
}
