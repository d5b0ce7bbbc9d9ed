use std::io::Read;
use std::path::Path;

use tracing::{error, warn};

/// Anything smaller can't be a real executable.
pub const MIN_EXECUTABLE_SIZE : u64 = 1024;

const MAGIC_NUMBERS : [&[u8]; 5] = [
  b"MZ",                  // PE
  b"\x7fELF",             // ELF
  &[0xcf, 0xfa, 0xed, 0xfe], // Mach-O 64-bit
  &[0xce, 0xfa, 0xed, 0xfe], // Mach-O 32-bit
  &[0xca, 0xfe, 0xba, 0xbe], // Mach-O universal
];

/// Structural sanity check of a downloaded executable: a minimum size and a known magic number.
/// This is not code signing, a crafted file passes it easily.
pub fn verify_executable_signature(file_path: &Path) -> bool {
  let metadata = match std::fs::metadata(file_path) {
    Ok(metadata) => metadata,
    Err(e) => {
      warn!("File not found for signature validation: {} ({})", file_path.display(), e);
      return false;
    }
  };
  if metadata.len() < MIN_EXECUTABLE_SIZE {
    warn!("Executable file too small: {} ({} bytes)", file_path.display(), metadata.len());
    return false;
  }

  let mut header = [0u8; 4];
  let result = std::fs::File::open(file_path).and_then(|mut file| file.read_exact(&mut header));
  if let Err(e) = result {
    error!("Error validating executable signature for {}: {}", file_path.display(), e);
    return false;
  }
  if !MAGIC_NUMBERS.iter().any(|magic| header.starts_with(magic)) {
    warn!("Invalid executable header for {}", file_path.display());
    return false;
  }
  true
}
