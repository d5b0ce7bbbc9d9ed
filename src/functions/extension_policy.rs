use std::path::Path;

fn extension_of(file_name: &str) -> String {
  Path::new(file_name)
    .extension()
    .map(|extension| format!(".{}", extension.to_string_lossy().to_lowercase()))
    .unwrap_or_default()
}

pub fn is_extension_allowed(file_name: &str, allowed: &[String]) -> bool {
  if file_name.is_empty() {
    return false;
  }
  let extension = extension_of(file_name);
  allowed.iter().any(|candidate| candidate.to_lowercase() == extension)
}

/// Nameless files count as blocked.
pub fn is_extension_blocked(file_name: &str, blocked: &[String]) -> bool {
  if file_name.is_empty() {
    return true;
  }
  let extension = extension_of(file_name);
  blocked.iter().any(|candidate| candidate.to_lowercase() == extension)
}

#[cfg(test)]
mod tests {
  use crate::functions::{is_extension_allowed, is_extension_blocked};

  fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
  }

  #[test]
  fn matches_ignoring_case() {
    let allowed = list(&[".exe", ".INI"]);
    assert!(is_extension_allowed("L2.EXE", &allowed));
    assert!(is_extension_allowed("l2.ini", &allowed));
    assert!(!is_extension_allowed("l2.bat", &allowed));
    assert!(!is_extension_allowed("Makefile", &allowed));
    assert!(!is_extension_allowed("", &allowed));
  }

  #[test]
  fn blocks_listed_extensions() {
    let blocked = list(&[".bat", ".ps1"]);
    assert!(is_extension_blocked("install.BAT", &blocked));
    assert!(!is_extension_blocked("l2.exe", &blocked));
    assert!(is_extension_blocked("", &blocked));
  }
}
