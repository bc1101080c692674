//! Error types for the linear value-function approximation crate.

use crate::feature::FeatureId;

/// A specialized `Result` type for value-function approximation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error enum for all fallible operations within the `linear_vfa` crate.
///
/// Prediction, gradient extraction and weight assignment never fail; errors only come
/// from configuration, from the external feature database, from weight handles that
/// outlived their store, and from snapshot encoding.
#[derive(Debug)]
pub enum Error {
    /// The supplied configuration is invalid.
    Config(String),
    /// The feature database failed, e.g. it cannot be copied in its current configuration.
    FeatureDatabase(String),
    /// A weight handle no longer refers to a live weight in this store.
    StaleHandle {
        /// The feature the handle was issued for.
        feature_id: FeatureId,
    },
    /// A weight snapshot could not be encoded or decoded.
    Serialization(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(s) => write!(f, "Configuration error: {}", s),
            Error::FeatureDatabase(s) => write!(f, "Feature database error: {}", s),
            Error::StaleHandle { feature_id } => {
                write!(f, "Stale weight handle for feature {}", feature_id)
            }
            Error::Serialization(s) => write!(f, "Serialization error: {}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// Helper to create a `FeatureDatabase` error.
    pub fn feature_database(msg: impl Into<String>) -> Self {
        Error::FeatureDatabase(msg.into())
    }
}
