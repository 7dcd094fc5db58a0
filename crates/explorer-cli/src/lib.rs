//! Library surface of the settings explorer command line tool.

pub mod clipboard;
pub mod location;
pub mod logging;
pub mod settings;

pub use clipboard::{Osc52Clipboard, PrintFallback};
pub use location::{FilterOverrides, build_location};
pub use logging::{LogConfig, LogFormat, init_logging, init_logging_with_writer};
pub use settings::{default_config_path, load_config, resolve_config_path, save_theme};
