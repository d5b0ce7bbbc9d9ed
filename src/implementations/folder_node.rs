use crate::structures::{FileEntry, FolderNode};

impl FolderNode {
  /// All files of this folder and its descendants, parents before children.
  pub fn all_files(&self) -> Vec<&FileEntry> {
    let mut files : Vec<&FileEntry> = self.files.iter().collect();
    for folder in &self.folders {
      files.extend(folder.all_files());
    }
    files
  }

  pub fn file_count(&self) -> usize {
    self.files.len() + self.folders.iter().map(FolderNode::file_count).sum::<usize>()
  }
}
