//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Read-side errors are fail-safe: the compatibility checker resolves them as
/// cache misses (rebuild) rather than hard failures. Write-side errors
/// propagate, but a failed cache write must not fail the compile that
/// produced the artifact.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing a cache file.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A profile file contains data that does not decode as a valid profile.
    ///
    /// Covers truncated files, trailing garbage, flat sequences whose length
    /// is not a multiple of the tuple width, and out-of-domain values.
    #[error("malformed profile data: {reason}")]
    MalformedProfile {
        /// Description of what failed to decode.
        reason: String,
    },

    /// A serialization error occurred while encoding a profile.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/tmp/cache/model.profile"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("model.profile"));
    }

    #[test]
    fn malformed_profile_display() {
        let err = CacheError::MalformedProfile {
            reason: "flat value count 5 is not a multiple of 4".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed profile data"));
        assert!(msg.contains("not a multiple of 4"));
    }

    #[test]
    fn serialization_display() {
        let err = CacheError::Serialization {
            reason: "buffer too small".to_string(),
        };
        assert!(err.to_string().contains("buffer too small"));
    }
}
