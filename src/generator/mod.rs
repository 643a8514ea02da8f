pub mod exports;
pub mod yaml;

// Re-export converters
pub use exports::clash::{default_clash_config, merge_template, proxy_to_clash};
pub use exports::proxy_to_clash::vmess_to_clash;
