mod check_root_element;
mod check_self_update;
mod cleanup_temp_files;
mod combine_url;
mod compute_worklist;
mod delete_file;
mod download_single_file;
mod download_with_retry;
mod extension_policy;
mod extract_single_entry;
mod fetch_manifest;
mod file_lock;
mod get_hash;
mod is_locally_up_to_date;
mod perform_self_update;
mod sync_files;
mod validate_certificate;
mod validate_manifest;
mod verify_executable_signature;
mod verify_integrity;

pub(crate) use check_root_element::check_root_element;
pub use check_self_update::{check_self_update, UPDATER_VERSION_FILE};
pub(crate) use cleanup_temp_files::{cleanup_temp_files, TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
pub use cleanup_temp_files::TEMP_FILE_MAX_AGE;
pub use combine_url::combine_url;
pub use compute_worklist::{collect_entries, compute_worklist, is_safe_relative_path, normalize_save_path, verify_installed};
pub(crate) use delete_file::delete_file;
pub(crate) use download_single_file::download_single_file;
pub(crate) use download_with_retry::download_with_retry;
pub use extension_policy::{is_extension_allowed, is_extension_blocked};
pub(crate) use extract_single_entry::extract_single_entry;
pub use fetch_manifest::{fetch_manifest, fetch_update_config, CONFIG_FILE, MANIFEST_FILE};
pub use file_lock::{is_lock_error, release_file_lock, wait_for_file_access, LOCK_MAX_WAIT, LOCK_POLL_INTERVAL};
pub use get_hash::get_hash;
pub use is_locally_up_to_date::{is_exempt, is_locally_up_to_date, EXEMPT_FILES};
pub use perform_self_update::perform_self_update;
pub use sync_files::sync_files;
pub use validate_certificate::validate_certificate;
pub use validate_manifest::validate_manifest;
pub use verify_executable_signature::{verify_executable_signature, MIN_EXECUTABLE_SIZE};
pub use verify_integrity::verify_integrity;
