//! Error types for platform and SDK path operations.

/// Errors that can occur while describing an Apple platform or SDK layout.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The platform name does not match any known variant.
    #[error("unknown platform: '{name}'")]
    UnknownPlatform {
        /// The name that was not recognized.
        name: String,
    },

    /// An SDK path set was missing a required component.
    #[error("invalid SDK paths: {field} {detail}")]
    InvalidSdkPaths {
        /// The offending field (e.g., "sdk-path").
        field: &'static str,
        /// Description of the problem.
        detail: String,
    },
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
