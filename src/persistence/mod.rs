pub mod codec;
pub mod files;
pub mod settings;
pub mod slot;

pub use codec::{decode_tasks, encode_tasks};
pub use files::{atomic_write, ensure_data_dir, init_local_data_dir, read_file, settings_file};
pub use settings::{load_settings, save_settings, Settings};
pub use slot::{FileSlot, Slot};
