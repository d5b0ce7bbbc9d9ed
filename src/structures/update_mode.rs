#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateMode {
  /// Only files flagged `QuickUpdate`, user owned configuration files are left alone.
  Quick,
  /// Every file in the manifest.
  Full,
}
