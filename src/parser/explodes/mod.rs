pub mod vmess;

pub use vmess::{explode_vmess, VMESS_SCHEME};
