#[derive(Debug)]
pub enum Error {
  /// Network unreachable, DNS failure, connection reset. First argument is the url, second the cause.
  Transport(String, String),
  /// The server answered with a non-success status code.
  HttpStatus(String, u16),
  /// The request for the given url did not finish within the configured timeout.
  Timeout(String),
  InvalidUrl(String),
  InvalidHeader(String),

  /// The manifest could not be retrieved, first argument is the url.
  ManifestUnavailable(String, Box<Error>),
  /// The manifest (or config) document could not be deserialized.
  ManifestMalformed(String),

  /// file, expected hash, actual hash
  IntegrityMismatch(String, String, String),
  ArchiveMalformed(String),
  FileLocked(String),
  IoError(std::io::Error),
  NotUtf8(std::string::FromUtf8Error),

  BlockedExtension(String),
  ValidationFailed(String),
  AlreadyRunning(),
  Cancelled(),
  JoinError(tokio::task::JoinError),
}
