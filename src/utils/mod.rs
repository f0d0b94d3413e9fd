pub mod constants;
pub mod storage;

pub use constants::{BACKEND_URL, STORAGE_KEY_SESSION, STORAGE_KEY_TOKEN};
pub use storage::{load_from_storage, remove_from_storage, save_to_storage};
