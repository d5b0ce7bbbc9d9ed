use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::structures::Error;

/// Writes the only entry of `archive_path` to `destination`, overwriting it.
/// On failure the destination is removed rather than left half written.
pub(crate) fn extract_single_entry(archive_path: &Path, destination: &Path) -> Result<(), Error> {
  let result = extract(archive_path, destination);
  if result.is_err() {
    if let Err(e) = std::fs::remove_file(destination) {
      if e.kind() != std::io::ErrorKind::NotFound {
        debug!("Could not remove partial {}: {}", destination.display(), e);
      }
    }
  }
  result
}

fn extract(archive_path: &Path, destination: &Path) -> Result<(), Error> {
  let file = File::open(archive_path)?;
  let mut archive = ZipArchive::new(BufReader::new(file))?;
  if archive.len() == 0 {
    return Err(Error::ArchiveMalformed(format!("no entries found in {}", archive_path.display())));
  }
  if archive.len() > 1 {
    warn!("{} contains {} entries, only the first one is used", archive_path.display(), archive.len());
  }
  let mut entry = archive.by_index(0)?;
  let mut target = File::create(destination)?;
  std::io::copy(&mut entry, &mut target)?;
  target.flush()?;
  debug!("Extracted {} from {} to {}", entry.name(), archive_path.display(), destination.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::functions::extract_single_entry;
  use crate::structures::Error;
  use crate::tests::support::zip_bytes;

  #[test]
  fn extracts_the_only_entry() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("l2.ini.zip");
    let destination = dir.path().join("l2.ini");
    std::fs::write(&archive, zip_bytes("l2.ini", b"[Engine]\nFullscreen=True")).unwrap();
    std::fs::write(&destination, b"stale content that is longer than the new one, to catch truncation").unwrap();

    extract_single_entry(&archive, &destination).unwrap();
    assert_eq!(std::fs::read(&destination).unwrap(), b"[Engine]\nFullscreen=True");
  }

  #[test]
  fn empty_archive_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("empty.zip");
    let destination = dir.path().join("l2.ini");
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    std::fs::write(&archive, writer.finish().unwrap().into_inner()).unwrap();
    assert!(matches!(extract_single_entry(&archive, &destination), Err(Error::ArchiveMalformed(_))));
    assert!(!destination.exists());
  }

  #[test]
  fn garbage_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("garbage.zip");
    std::fs::write(&archive, b"this is not a zip archive").unwrap();
    assert!(matches!(extract_single_entry(&archive, &dir.path().join("x")), Err(Error::ArchiveMalformed(_))));
  }

  #[test]
  fn failed_extraction_removes_the_stale_destination() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("l2.ini.zip");
    let destination = dir.path().join("l2.ini");
    std::fs::write(&archive, b"truncated download").unwrap();
    std::fs::write(&destination, b"[Engine]\nFullscreen=False").unwrap();
    assert!(extract_single_entry(&archive, &destination).is_err());
    assert!(!destination.exists());
  }
}
