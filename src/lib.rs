//! Keeps a game installation in sync with the file manifest published by its update server.

mod cancellable;
pub mod functions;
mod implementations;
pub mod patcher;
pub mod patcher_builder;
pub mod structures;
pub mod traits;


pub use crate::patcher::Patcher;
pub use crate::patcher_builder::PatcherBuilder;
pub use crate::structures::{Error, Phase, ProgressSnapshot, RunOutcome, Settings, UpdateMode};
