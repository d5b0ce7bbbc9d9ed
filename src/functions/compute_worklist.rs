use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::functions::is_locally_up_to_date;
use crate::structures::{FileEntry, FolderNode, UpdateManifest, UpdateMode, UpdateTarget};

/// Derives the local directory of a file from its remote `path` by stripping the manifest root folder.
pub fn normalize_save_path(path: &str, root_name: &str) -> String {
  let path = path.replace('\\', "/");
  let mut remainder = path.as_str();
  if !root_name.is_empty() {
    if let Some(prefix) = remainder.get(..root_name.len()) {
      let rest = &remainder[root_name.len()..];
      if prefix.eq_ignore_ascii_case(root_name) && (rest.is_empty() || rest.starts_with('/')) {
        remainder = rest;
      }
    }
  }
  remainder.trim_start_matches('/').to_string()
}

/// A save path and file name that stay inside the installation root.
pub fn is_safe_relative_path(save_path: &str, file_name: &str) -> bool {
  if file_name.is_empty() || file_name == "." || file_name == ".." || file_name.contains(['/', '\\', ':']) {
    return false;
  }
  if save_path.starts_with(['/', '\\']) || Path::new(save_path).is_absolute() {
    return false;
  }
  save_path
    .split(['/', '\\'])
    .all(|component| component != ".." && !component.contains(':'))
}

/// Depth first walk of `folder`, keeping the entries `mode` selects, with normalized save paths.
pub fn collect_entries(folder: &FolderNode, mode: UpdateMode, root_name: &str) -> Vec<FileEntry> {
  let mut entries : Vec<FileEntry> = folder.files
    .iter()
    .filter(|file| mode == UpdateMode::Full || file.quick_update)
    .map(|file| FileEntry {
      save_path: normalize_save_path(&file.path, root_name),
      ..file.clone()
    })
    .collect();
  for child in &folder.folders {
    entries.extend(collect_entries(child, mode, root_name));
  }
  entries
}

/// Entries of `manifest` that are missing or stale under `local_root`.
/// Never fails, an unreadable local file simply needs updating.
#[instrument(skip(manifest))]
pub fn compute_worklist(manifest: &UpdateManifest, mode: UpdateMode, local_root: &Path) -> Vec<FileEntry> {
  let mut seen = HashSet::new();
  let worklist : Vec<FileEntry> = collect_entries(&manifest.folder, mode, &manifest.folder.name)
    .into_iter()
    .filter(|entry| {
      if is_safe_relative_path(&entry.save_path, &entry.name) {
        true
      } else {
        warn!("Skipping {} in {}, it would be written outside of the game folder", entry.name, entry.path);
        false
      }
    })
    .filter(|entry| {
      let destination = UpdateTarget::new(entry.clone(), local_root).destination();
      let fresh = seen.insert(destination.to_string_lossy().to_lowercase());
      if !fresh {
        debug!("{} is listed more than once, keeping the first entry", destination.display());
      }
      fresh
    })
    .filter(|entry| !is_locally_up_to_date(local_root, entry, mode, false))
    .collect();
  debug!("{} files need updating", worklist.len());
  worklist
}

/// Entries that still don't match the manifest after an install.
#[instrument(skip(entries))]
pub fn verify_installed(local_root: &Path, entries: &[FileEntry]) -> Vec<FileEntry> {
  entries
    .iter()
    .filter(|entry| !is_locally_up_to_date(local_root, entry, UpdateMode::Full, true))
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use crate::functions::{collect_entries, compute_worklist, is_safe_relative_path, normalize_save_path, verify_installed};
  use crate::structures::{FileEntry, FolderNode, UpdateManifest, UpdateMode};

  fn file(name: &str, path: &str, quick_update: bool) -> FileEntry {
    FileEntry {
      name: name.to_string(),
      path: path.to_string(),
      size: 0,
      hash: String::new(),
      quick_update,
      check_hash: false,
      save_path: String::new(),
    }
  }

  fn manifest() -> UpdateManifest {
    UpdateManifest {
      version: 1,
      folder: FolderNode {
        name: "system".to_string(),
        folders: vec![FolderNode {
          name: "textures".to_string(),
          folders: vec![],
          files: vec![file("Interface.utx", "system\\textures", false)],
        }],
        files: vec![file("l2.exe", "system", true), file("Option.ini", "system", true)],
      },
    }
  }

  #[test]
  fn strips_the_root_folder() {
    assert_eq!(normalize_save_path("system", "system"), "");
    assert_eq!(normalize_save_path("system\\textures", "system"), "textures");
    assert_eq!(normalize_save_path("/system/l2.ini", "system"), "system/l2.ini");
    assert_eq!(normalize_save_path("system/l2.ini", "system"), "l2.ini");
    assert_eq!(normalize_save_path("systemfiles/a", "system"), "systemfiles/a");
    assert_eq!(normalize_save_path("maps", ""), "maps");
  }

  #[test]
  fn rejects_traversal() {
    assert!(is_safe_relative_path("", "l2.exe"));
    assert!(is_safe_relative_path("textures", "Interface.utx"));
    assert!(!is_safe_relative_path("../..", "evil.dll"));
    assert!(!is_safe_relative_path("textures/../../x", "evil.dll"));
    assert!(!is_safe_relative_path("", "..\\evil.dll"));
    assert!(!is_safe_relative_path("", ".."));
    assert!(!is_safe_relative_path("C:", "evil.dll"));
  }

  #[test]
  fn quick_mode_selects_flagged_files_parents_first() {
    let quick = collect_entries(&manifest().folder, UpdateMode::Quick, "system");
    let names : Vec<&str> = quick.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["l2.exe", "Option.ini"]);

    let full = collect_entries(&manifest().folder, UpdateMode::Full, "system");
    let names : Vec<&str> = full.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["l2.exe", "Option.ini", "Interface.utx"]);
    assert_eq!(full[2].save_path, "textures");
  }

  #[test]
  fn empty_root_gives_empty_worklist() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = UpdateManifest { version: 1, folder: FolderNode::default() };
    assert!(compute_worklist(&manifest, UpdateMode::Full, dir.path()).is_empty());
  }

  #[test]
  fn existing_files_without_hash_check_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("l2.exe"), b"MZ").unwrap();
    let worklist = compute_worklist(&manifest(), UpdateMode::Full, dir.path());
    let names : Vec<&str> = worklist.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["Option.ini", "Interface.utx"]);
  }

  #[test]
  fn traversal_entries_are_dropped_and_duplicates_collapse() {
    let dir = tempfile::tempdir().unwrap();
    let mut manifest = manifest();
    manifest.folder.files.push(file("evil.dll", "system/../../windows", true));
    manifest.folder.files.push(file("l2.exe", "system", true));
    let worklist = compute_worklist(&manifest, UpdateMode::Quick, dir.path());
    let names : Vec<&str> = worklist.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["l2.exe", "Option.ini"]);
    assert!(worklist.iter().all(|entry| !entry.save_path.contains("..")));
  }

  #[test]
  fn verification_forces_hash_checks() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("l2.exe"), b"MZ").unwrap();
    let mut entry = file("l2.exe", "system", true);
    entry.size = 2;
    entry.hash = "0".repeat(64);
    assert_eq!(verify_installed(Path::new(dir.path()), &[entry.clone()]), vec![entry]);
  }
}
