pub mod error;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use paths::{default_global_config_path, default_state_root, GLOBAL_STATE_DIR};
pub use settings::{Settings, API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
