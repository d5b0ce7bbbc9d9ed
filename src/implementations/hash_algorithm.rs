use crate::structures::HashAlgorithm;

impl HashAlgorithm {
  /// Picks the algorithm a declared digest was produced with, judging by its length.
  /// Eight hex digits are a CRC32 checksum, anything else is treated as SHA-256.
  pub fn for_digest(digest: &str) -> Self {
    if digest.trim().len() == 8 {
      Self::Crc32
    } else {
      Self::Sha256
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::structures::HashAlgorithm;

  #[test]
  fn infers_algorithm_from_digest_length() {
    assert_eq!(HashAlgorithm::for_digest("CBF43926"), HashAlgorithm::Crc32);
    assert_eq!(HashAlgorithm::for_digest("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"), HashAlgorithm::Sha256);
    assert_eq!(HashAlgorithm::for_digest("abc123"), HashAlgorithm::Sha256);
  }
}
