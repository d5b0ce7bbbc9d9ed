pub mod error;
pub use error::Error;

pub mod file_entry;
pub use file_entry::FileEntry;

pub mod folder_node;
pub use folder_node::FolderNode;

pub mod update_manifest;
pub use update_manifest::UpdateManifest;

pub mod update_config;
pub use update_config::UpdateConfig;

pub mod update_mode;
pub use update_mode::UpdateMode;

pub mod update_target;
pub use update_target::UpdateTarget;

pub mod hash_algorithm;
pub use hash_algorithm::HashAlgorithm;

pub mod progress;
pub use progress::{Progress, ProgressSnapshot};

pub mod settings;
pub use settings::Settings;

pub mod phase;
pub use phase::Phase;

pub mod attempt_outcome;
pub use attempt_outcome::AttemptOutcome;

pub mod sync_outcome;
pub use sync_outcome::{FailedFile, SyncOutcome};

pub mod run_outcome;
pub use run_outcome::RunOutcome;

pub mod http_transport;
pub use http_transport::HttpTransport;

pub mod system_launcher;
pub use system_launcher::SystemLauncher;
