//! Service adapters: OS specific implementations (filesystem, settings, paths).

pub mod file;
#[cfg(feature = "tui")]
pub mod keybinding;
pub mod paths;
pub mod settings;

pub use file::{FileService, LocalFileProvider};
#[cfg(feature = "tui")]
pub use keybinding::{KeybindingContext, KeybindingService};
pub use paths::{ensure_log_dir, get_log_dir};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
#[cfg(feature = "tui")]
pub use settings::parse_keybinding;
