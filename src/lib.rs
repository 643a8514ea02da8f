pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the main types for easier access
pub use error::{ConvertError, SettingsError};
pub use generator::yaml::clash_output::{ClashProxy, ClashProxyGroup, ClashYamlOutput};
pub use models::{AppState, VmessNode};
pub use settings::Settings;
