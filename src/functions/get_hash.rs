use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::functions::is_lock_error;
use crate::structures::{Error, HashAlgorithm};

/// Streams a file through the given digest and returns it as lowercase hex.
/// Other processes may keep the file open for reading and writing meanwhile.
pub fn get_hash(file_path: &Path, algorithm: HashAlgorithm) -> Result<String, Error> {
  let mut file = open_shared(file_path).map_err(|error| {
    if is_lock_error(&error) || error.kind() == std::io::ErrorKind::PermissionDenied {
      warn!("{} is being used by another process, cannot calculate hash", file_path.display());
      Error::FileLocked(file_path.display().to_string())
    } else {
      Error::from(error)
    }
  })?;
  match algorithm {
    HashAlgorithm::Sha256 => {
      let mut sha256 = Sha256::new();
      feed(&mut file, |chunk| sha256.update(chunk))?;
      Ok(hex::encode(sha256.finalize()))
    },
    HashAlgorithm::Crc32 => {
      let mut crc32 = crc32fast::Hasher::new();
      feed(&mut file, |chunk| crc32.update(chunk))?;
      Ok(format!("{:08x}", crc32.finalize()))
    },
  }
}

fn feed(file: &mut File, mut update: impl FnMut(&[u8])) -> Result<(), Error> {
  let mut buffer = vec![0u8; 64 * 1024];
  loop {
    let read = file.read(&mut buffer)?;
    if read == 0 {
      return Ok(());
    }
    update(&buffer[..read]);
  }
}

fn open_shared(file_path: &Path) -> std::io::Result<File> {
  let mut options = OpenOptions::new();
  options.read(true);
  #[cfg(windows)]
  {
    use std::os::windows::fs::OpenOptionsExt;
    // FILE_SHARE_READ | FILE_SHARE_WRITE
    options.share_mode(0x1 | 0x2);
  }
  options.open(file_path)
}

#[cfg(test)]
mod tests {
  use crate::functions::get_hash;
  use crate::structures::{Error, HashAlgorithm};

  #[test]
  fn known_digests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.txt");
    std::fs::write(&path, b"abc").unwrap();
    assert_eq!(get_hash(&path, HashAlgorithm::Sha256).unwrap(), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");

    let path = dir.path().join("digits.txt");
    std::fs::write(&path, b"123456789").unwrap();
    assert_eq!(get_hash(&path, HashAlgorithm::Crc32).unwrap(), "cbf43926");
  }

  #[test]
  fn hashing_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Interface.u");
    let content : Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, &content).unwrap();
    for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Crc32] {
      let first = get_hash(&path, algorithm).unwrap();
      let second = get_hash(&path, algorithm).unwrap();
      assert_eq!(first, second);
    }
  }

  #[test]
  fn tolerates_concurrent_readers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("l2.ini");
    std::fs::write(&path, b"[Engine]").unwrap();
    let _held_open = std::fs::File::open(&path).unwrap();
    assert!(get_hash(&path, HashAlgorithm::Sha256).is_ok());
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(get_hash(&dir.path().join("missing.dat"), HashAlgorithm::Sha256), Err(Error::IoError(_))));
  }
}
