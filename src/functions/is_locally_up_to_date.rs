use std::path::Path;

use tracing::{debug, warn};

use crate::functions::verify_integrity;
use crate::structures::{FileEntry, UpdateMode, UpdateTarget};

/// User owned configuration, never overwritten by a quick update.
pub const EXEMPT_FILES : [&str; 4] = ["option.ini", "windowsinfo.ini", "chatfilter.ini", "user.ini"];

/// Exempt when an exemption entry contains the lowercased name.
pub fn is_exempt(file_name: &str) -> bool {
  let file_name = file_name.to_lowercase();
  !file_name.is_empty() && EXEMPT_FILES.iter().any(|exempt| exempt.contains(&file_name))
}

/// Decides whether the local copy of `entry` can stay as it is.
/// `post_check` forces the size and hash comparison, as after an install.
pub fn is_locally_up_to_date(local_root: &Path, entry: &FileEntry, mode: UpdateMode, post_check: bool) -> bool {
  let destination = UpdateTarget::new(entry.clone(), local_root).destination();
  let metadata = match std::fs::metadata(&destination) {
    Ok(metadata) if metadata.is_file() => metadata,
    _ => return false,
  };

  if mode == UpdateMode::Quick && is_exempt(&entry.name) {
    return true;
  }

  if !entry.check_hash && !post_check {
    return true;
  }

  if metadata.len() != entry.size {
    debug!("{} has size {}, expected {}", destination.display(), metadata.len(), entry.size);
    return false;
  }
  match verify_integrity(&destination, &entry.hash) {
    Ok(matches) => matches,
    Err(error) => {
      warn!("Could not hash {}, treating it as stale: {}", destination.display(), error);
      false
    }
  }
}
