use tracing::{info, warn};

/// Whether `url` may be contacted under the certificate policy.
/// With validation on, only https endpoints pass.
pub fn validate_certificate(url: &str, validate_certificates: bool) -> bool {
  if !validate_certificates {
    info!("Certificate validation is disabled, accepting {}", url);
    return true;
  }
  let is_https = url.get(..8).map_or(false, |scheme| scheme.eq_ignore_ascii_case("https://"));
  if !is_https {
    warn!("Refusing {}, only https endpoints are trusted", url);
  }
  is_https
}

#[cfg(test)]
mod tests {
  use crate::functions::validate_certificate;

  #[test]
  fn only_https_passes_when_validating() {
    assert!(validate_certificate("https://patch.test/files", true));
    assert!(validate_certificate("HTTPS://patch.test/files", true));
    assert!(!validate_certificate("http://patch.test/files", true));
    assert!(!validate_certificate("ftp://patch.test", true));
    assert!(!validate_certificate("", true));
  }

  #[test]
  fn anything_passes_when_disabled() {
    assert!(validate_certificate("http://patch.test/files", false));
  }
}
