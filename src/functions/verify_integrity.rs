use std::path::Path;

use tracing::{debug, warn};

use crate::functions::get_hash;
use crate::structures::{Error, HashAlgorithm};

/// Compares a file against its declared digest, ignoring case.
/// An empty digest means no verification was requested and the file is not read.
pub fn verify_integrity(file_path: &Path, expected_hash: &str) -> Result<bool, Error> {
  let expected_hash = expected_hash.trim();
  if expected_hash.is_empty() {
    debug!("No hash provided for {}, skipping validation", file_path.display());
    return Ok(true);
  }
  let actual_hash = get_hash(file_path, HashAlgorithm::for_digest(expected_hash))?;
  let valid = actual_hash.eq_ignore_ascii_case(expected_hash);
  if !valid {
    warn!("File integrity check failed for {}. Expected: {}, Actual: {}", file_path.display(), expected_hash, actual_hash);
  }
  Ok(valid)
}

#[cfg(test)]
mod tests {
  use crate::functions::verify_integrity;

  #[test]
  fn empty_hash_skips_verification() {
    let dir = tempfile::tempdir().unwrap();
    assert!(verify_integrity(&dir.path().join("does-not-exist"), "").unwrap());
  }

  #[test]
  fn compares_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.txt");
    std::fs::write(&path, b"abc").unwrap();
    assert!(verify_integrity(&path, "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD").unwrap());
    assert!(verify_integrity(&path, "352441C2").unwrap());
    assert!(!verify_integrity(&path, "00000000").unwrap());
  }
}
