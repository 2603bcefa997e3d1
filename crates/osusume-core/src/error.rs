use thiserror::Error;

/// Errors that can occur during Osusume core operations.
///
/// Only catalog loading and configuration errors are fatal. Malformed user
/// queries never produce an error: the parser degrades to "no restriction"
/// and the engine to an empty result.
#[derive(Debug, Error)]
pub enum OsusumeError {
    /// The catalog source could not be read.
    #[error("failed to load catalog from {source_name}: {reason}")]
    DataLoad {
        /// Path or label of the catalog source.
        source_name: String,
        /// Why the load failed.
        reason: String,
    },

    /// The catalog header lacks one or more required columns.
    #[error("catalog is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The catalog CSV is malformed.
    #[error("catalog CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O error while reading a catalog or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    /// The configuration file could not be parsed.
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration or vocabulary failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl OsusumeError {
    /// Returns `true` for errors raised while loading the catalog.
    ///
    /// These are start-up fatal and surfaced to the operator.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::DataLoad { .. } | Self::MissingColumns(_) | Self::Csv(_) | Self::Io(_)
        )
    }
}

/// Result type alias for Osusume operations.
pub type Result<T> = std::result::Result<T, OsusumeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = OsusumeError::MissingColumns(vec!["Score".into(), "Type".into()]);
        assert_eq!(
            err.to_string(),
            "catalog is missing required columns: Score, Type"
        );

        let err = OsusumeError::DataLoad {
            source_name: "anime.csv".into(),
            reason: "not found".into(),
        };
        assert!(err.to_string().contains("anime.csv"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn load_errors_are_classified() {
        assert!(OsusumeError::MissingColumns(vec![]).is_load_error());
        assert!(
            OsusumeError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "x"))
                .is_load_error()
        );
        assert!(!OsusumeError::InvalidConfig("cap".into()).is_load_error());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OsusumeError>();
    }
}
