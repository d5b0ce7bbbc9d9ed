use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::functions::validate_certificate;
use crate::patcher::Patcher;
use crate::structures::{Error, HttpTransport, Phase, ProgressSnapshot, Settings, SystemLauncher};
use crate::traits::{Launcher, Transport};

pub struct PatcherBuilder {
  pub(crate) settings: Settings,
  pub(crate) local_root: Option<PathBuf>,
  pub(crate) transport: Option<Arc<dyn Transport>>,
  pub(crate) launcher: Option<Arc<dyn Launcher>>,
}

impl Default for PatcherBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl PatcherBuilder {
  pub fn new() -> Self {
    Self {
      settings: Settings::default(),
      local_root: None,
      transport: None,
      launcher: None,
    }
  }

  pub fn set_settings(mut self, settings: Settings) -> Self {
    self.settings = settings;
    self
  }

  /// Root of the game installation that gets updated.
  pub fn set_local_root(mut self, local_root: impl Into<PathBuf>) -> Self {
    self.local_root = Some(local_root.into());
    self
  }

  pub fn set_transport(mut self, transport: Arc<dyn Transport>) -> Self {
    self.transport = Some(transport);
    self
  }

  pub fn set_launcher(mut self, launcher: Arc<dyn Launcher>) -> Self {
    self.launcher = Some(launcher);
    self
  }

  pub fn build(self) -> Result<Patcher, Error> {
    Url::parse(&self.settings.update_url)?;
    if !validate_certificate(&self.settings.update_url, self.settings.validate_certificates) {
      return Err(Error::ValidationFailed(format!("invalid certificate for {}", self.settings.update_url)));
    }
    let local_root = self.local_root.ok_or_else(|| Error::ValidationFailed("no game location was set".to_string()))?;
    let transport : Arc<dyn Transport> = match self.transport {
      Some(transport) => transport,
      None => Arc::new(HttpTransport::new(self.settings.request_timeout, !self.settings.validate_certificates)),
    };
    let launcher : Arc<dyn Launcher> = match self.launcher {
      Some(launcher) => launcher,
      None => Arc::new(SystemLauncher),
    };
    let (progress_sender, _) = watch::channel(ProgressSnapshot::default());
    Ok(Patcher {
      settings: Arc::new(self.settings),
      local_root,
      transport,
      launcher,
      in_progress: Arc::new(AtomicBool::new(false)),
      phase: Arc::new(Mutex::new(Phase::Idle)),
      status: Arc::new(Mutex::new(String::new())),
      cancellation: Arc::new(Mutex::new(CancellationToken::new())),
      progress_sender: Arc::new(progress_sender),
    })
  }
}

#[cfg(test)]
mod tests {
  use crate::patcher_builder::PatcherBuilder;
  use crate::structures::{Error, Phase, Settings};

  fn settings(url: &str) -> Settings {
    Settings {
      update_url: url.to_string(),
      ..Settings::default()
    }
  }

  #[test]
  fn builds_with_default_collaborators() {
    let patcher = PatcherBuilder::new()
      .set_settings(settings("https://updates.example.org/patch"))
      .set_local_root("/games/l2")
      .build()
      .expect("builder should succeed");
    assert_eq!(patcher.phase(), Phase::Idle);
    assert!(!patcher.is_running());
  }

  #[test]
  fn rejects_invalid_url_and_missing_root() {
    let result = PatcherBuilder::new().set_settings(settings("not a url")).set_local_root("/games/l2").build();
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
    let result = PatcherBuilder::new().set_settings(settings("https://updates.example.org")).build();
    assert!(matches!(result, Err(Error::ValidationFailed(_))));
  }

  #[test]
  fn plain_http_needs_certificate_validation_off() {
    let result = PatcherBuilder::new().set_settings(settings("http://updates.example.org/patch")).set_local_root("/games/l2").build();
    assert!(matches!(result, Err(Error::ValidationFailed(_))));

    let relaxed = Settings {
      validate_certificates: false,
      ..settings("http://updates.example.org/patch")
    };
    let patcher = PatcherBuilder::new().set_settings(relaxed).set_local_root("/games/l2").build();
    assert!(patcher.is_ok());
  }
}
