/// Starts processes with the operating system's spawn primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;
