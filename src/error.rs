use thiserror::Error;

/// The error type for `adaptis-burn` operations.
///
/// Blocks are declarative compositions of framework layers, so the only
/// failures surfaced here are inconsistent hyperparameters caught before any
/// device work. Runtime shape mismatches remain the framework's concern.
#[derive(Error, Debug)]
pub enum AdaptisError {
    /// Error for when an invalid block configuration is provided.
    /// This can happen if configuration parameters are logically inconsistent.
    #[error("Invalid block configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for `adaptis-burn` operations.
pub type AdaptisResult<T> = Result<T, AdaptisError>;
