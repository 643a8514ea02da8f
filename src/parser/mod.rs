pub mod explodes;
pub mod subparser;

pub use subparser::{parse_link, parse_nodes, parse_subscription, ParseOutcome};
