mod attempt_outcome;
mod error;
mod folder_node;
mod hash_algorithm;
mod http_transport;
mod progress;
mod settings;
mod sync_outcome;
mod system_launcher;
mod update_config;
mod update_manifest;
mod update_target;
