//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `kiln.toml`
/// configuration or a shape-spec string.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A shape-spec string has the wrong format.
    #[error("malformed shape spec '{spec}': {reason}")]
    MalformedShapeSpec {
        /// The offending entry from the shape-spec string.
        spec: String,
        /// Description of what is wrong with it.
        reason: String,
    },
}
