use thiserror::Error;

/// Centralized error types for the application
///
/// All fallible operations in the library are converted to this enum for
/// consistent error handling. Uses `thiserror` for automatic error
/// conversion and display formatting.
///
/// Note that the cart engine itself is infallible by design: keys and
/// prices are pure computations over normalized inputs. Only the storage
/// boundary can fail.
#[derive(Error, Debug)]
pub enum AppError {
    /// IO errors (storage file read/write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
