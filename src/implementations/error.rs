use crate::structures::Error;

impl Error {
  /// Sharing violations and similar, worth waiting for the other process before retrying.
  pub fn is_file_locked(&self) -> bool {
    match self {
      Self::FileLocked(_) => true,
      Self::IoError(error) => crate::functions::is_lock_error(error),
      _ => false,
    }
  }

  /// Whether another attempt at the same file could succeed.
  pub fn is_retryable(&self) -> bool {
    match self {
      Self::Transport(..) | Self::Timeout(_) | Self::FileLocked(_) | Self::IoError(_) | Self::JoinError(_) => true,
      // Client errors won't fix themselves, except for the throttling ones.
      Self::HttpStatus(_, status) => *status >= 500 || *status == 408 || *status == 429,
      _ => false,
    }
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, Self::Cancelled())
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::ManifestUnavailable(_, error) => Some(error.as_ref()),
      Self::IoError(error) => Some(error),
      Self::NotUtf8(error) => Some(error),
      Self::JoinError(error) => Some(error),
      _ => None,
    }
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::Transport(url, cause) => write!(f, "could not reach {}: {}", url, cause),
      Self::HttpStatus(url, status) => write!(f, "{} answered with status {}", url, status),
      Self::Timeout(url) => write!(f, "request to {} timed out", url),
      Self::InvalidUrl(url) => write!(f, "invalid url: {}", url),
      Self::InvalidHeader(header) => write!(f, "invalid header value: {}", header),
      Self::ManifestUnavailable(url, error) => write!(f, "manifest {} is unavailable: {}", url, error),
      Self::ManifestMalformed(reason) => write!(f, "malformed document: {}", reason),
      Self::IntegrityMismatch(file, expected, actual) => write!(f, "integrity check failed for {}, expected {} but got {}", file, expected, actual),
      Self::ArchiveMalformed(reason) => write!(f, "malformed archive: {}", reason),
      Self::FileLocked(file) => write!(f, "{} is locked by another process", file),
      Self::IoError(error) => write!(f, "io error: {}", error),
      Self::NotUtf8(error) => write!(f, "response is not utf-8: {}", error),
      Self::BlockedExtension(file) => write!(f, "{} does not have a permitted extension", file),
      Self::ValidationFailed(reason) => write!(f, "validation failed: {}", reason),
      Self::AlreadyRunning() => write!(f, "an update is already in progress"),
      Self::Cancelled() => write!(f, "stopped by user"),
      Self::JoinError(error) => write!(f, "background task failed: {}", error),
    }
  }
}

impl From<tokio::task::JoinError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: tokio::task::JoinError) -> Self {
    log_error(&error);
    Self::JoinError(error)
  }
}

impl From<download_async::http::uri::InvalidUri> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: download_async::http::uri::InvalidUri) -> Self {
    log_error(&error);
    Self::InvalidUrl(error.to_string())
  }
}

impl From<download_async::http::header::InvalidHeaderValue> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: download_async::http::header::InvalidHeaderValue) -> Self {
    log_error(&error);
    Self::InvalidHeader(error.to_string())
  }
}

impl From<url::ParseError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: url::ParseError) -> Self {
    log_error(&error);
    Self::InvalidUrl(error.to_string())
  }
}

impl From<zip::result::ZipError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: zip::result::ZipError) -> Self {
    log_error(&error);
    match error {
      zip::result::ZipError::Io(error) => Self::IoError(error),
      other => Self::ArchiveMalformed(other.to_string()),
    }
  }
}

impl From<quick_xml::DeError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: quick_xml::DeError) -> Self {
    log_error(&error);
    Self::ManifestMalformed(error.to_string())
  }
}

impl From<std::io::Error> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: std::io::Error) -> Self {
    log_error(&error);
    Self::IoError(error)
  }
}

impl From<std::string::FromUtf8Error> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: std::string::FromUtf8Error) -> Self {
    log_error(&error);
    Self::NotUtf8(error)
  }
}

#[track_caller]
fn log_error(error: &(impl std::error::Error + ?Sized)) {
  tracing::error!("{:?}", error);
}

#[cfg(test)]
mod tests {
  use crate::structures::Error;

  #[test]
  fn classifies_retryable_errors() {
    assert!(Error::Transport("http://a".to_string(), "reset".to_string()).is_retryable());
    assert!(Error::Timeout("http://a".to_string()).is_retryable());
    assert!(Error::FileLocked("a".to_string()).is_retryable());
    assert!(Error::HttpStatus("http://a".to_string(), 503).is_retryable());
    assert!(Error::HttpStatus("http://a".to_string(), 429).is_retryable());
    assert!(!Error::HttpStatus("http://a".to_string(), 404).is_retryable());
    assert!(!Error::IntegrityMismatch("a".to_string(), "1".to_string(), "2".to_string()).is_retryable());
    assert!(!Error::ArchiveMalformed("empty".to_string()).is_retryable());
    assert!(!Error::Cancelled().is_retryable());
  }

  #[test]
  fn display_does_not_recurse() {
    let error = Error::ManifestUnavailable("http://a/UpdateInfo.xml".to_string(), Box::new(Error::Timeout("http://a/UpdateInfo.xml".to_string())));
    assert_eq!(error.to_string(), "manifest http://a/UpdateInfo.xml is unavailable: request to http://a/UpdateInfo.xml timed out");
    assert_eq!(Error::Cancelled().to_string(), "stopped by user");
  }
}
