use tracing::{info, instrument};

use crate::structures::{Error, Settings, UpdateManifest};

/// Refuses manifests that would install a critical executable with a disallowed extension.
#[instrument(skip_all)]
pub fn validate_manifest(manifest: &UpdateManifest, settings: &Settings) -> Result<(), Error> {
  for file in manifest.find_files(&settings.critical_files) {
    if let Err(e) = settings.check_file(&file.name) {
      return Err(Error::ValidationFailed(format!("critical file rejected: {}", e)));
    }
  }
  info!("Manifest passed validation");
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::functions::validate_manifest;
  use crate::structures::{Error, FileEntry, FolderNode, Settings, UpdateManifest};

  fn manifest_with(name: &str) -> UpdateManifest {
    UpdateManifest {
      version: 1,
      folder: FolderNode {
        name: "system".to_string(),
        folders: vec![],
        files: vec![FileEntry {
          name: name.to_string(),
          path: "system".to_string(),
          size: 1,
          hash: String::new(),
          quick_update: true,
          check_hash: false,
          save_path: String::new(),
        }],
      },
    }
  }

  #[test]
  fn accepts_critical_files_with_allowed_extensions() {
    let settings = Settings::default();
    validate_manifest(&manifest_with("l2.exe"), &settings).unwrap();
  }

  #[test]
  fn rejects_blocked_critical_files() {
    let mut settings = Settings::default();
    settings.critical_files.push("launch.bat".to_string());
    assert!(matches!(validate_manifest(&manifest_with("launch.bat"), &settings), Err(Error::ValidationFailed(_))));
  }

  #[test]
  fn rejects_critical_files_outside_the_allow_list() {
    let mut settings = Settings::default();
    settings.allowed_file_extensions.retain(|extension| extension != ".exe");
    assert!(matches!(validate_manifest(&manifest_with("l2.exe"), &settings), Err(Error::ValidationFailed(_))));
  }
}
