pub mod subconverter;

pub use subconverter::{
    convert_document, subconverter, SubconverterConfig, SubconverterConfigBuilder,
    SubconverterResult,
};
