//! Process settings
//!
//! Settings are read once at startup from a YAML or TOML file, overridden by
//! environment variables and command line flags, then handed to the server by
//! value.

pub mod settings_struct;

pub use settings_struct::{
    Settings, DEFAULT_SUBSCRIPTION_URL, DEFAULT_TEMPLATE_PATH, ENV_LISTEN, ENV_PORT, ENV_URL,
};
