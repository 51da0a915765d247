//! Error types shared by properties, configurations and the search space.
//!
//! Every failure is raised synchronously at the point of detection and aborts the
//! calling operation. Nothing is logged-and-continued or silently corrected.

/// Type alias for configuration operation results
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// Error kinds for configuration, property and search operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A value was requested from a property that is unspecified or still multi-valued,
    /// or a single-only query was issued on an open property.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// An integer code or a range bound falls outside the admissible domain.
    #[error("Out of domain: {0}")]
    OutOfDomain(String),

    /// A path segment does not match any registered property.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Nothing left to search, or more points requested than the space holds.
    #[error("Degenerate space: {0}")]
    DegenerateSpace(String),

    /// A search point does not cover the open dimensions of a configuration.
    #[error("Mismatch: {0}")]
    Mismatch(String),

    /// Malformed input such as an empty value list or an empty path segment.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The typed accessor narrowed a property to the wrong concrete type.
    #[error("Property at '{path}' is not a {expected}")]
    TypeMismatch { path: String, expected: &'static str },
}

impl ConfigurationError {
    /// Short name of the error kind, used in log records
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigurationError::InvalidState(_) => "invalid_state",
            ConfigurationError::OutOfDomain(_) => "out_of_domain",
            ConfigurationError::NotFound(_) => "not_found",
            ConfigurationError::DegenerateSpace(_) => "degenerate_space",
            ConfigurationError::Mismatch(_) => "mismatch",
            ConfigurationError::InvalidArgument(_) => "invalid_argument",
            ConfigurationError::TypeMismatch { .. } => "type_mismatch",
        }
    }
}
