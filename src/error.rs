use thiserror::Error;

/// Failures of a single subscription conversion.
///
/// `DecodeError` and `InvalidPort` are also produced per node; the subscription
/// parser recovers from those by skipping the offending line. Every other
/// variant is terminal for the request.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to fetch subscription: {0}")]
    FetchError(String),

    #[error("failed to decode: {0}")]
    DecodeError(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("no valid vmess nodes found in the subscription")]
    EmptyResult,

    #[error("failed to parse template '{path}': {source}")]
    TemplateParseError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize clash config: {0}")]
    SerializeError(#[from] serde_yaml::Error),
}

/// Failures while loading process settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
