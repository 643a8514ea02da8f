//! Core data models
//!
//! Decoded vmess nodes, template proxy groups and the shared server state.

pub mod app_state;
pub mod proxy_group_config;
pub mod vmess_node;

pub use app_state::AppState;
pub use proxy_group_config::{MemberList, ProxyGroupConfig, ProxyGroupConfigs, PROXIES_PLACEHOLDER};
pub use vmess_node::VmessNode;
