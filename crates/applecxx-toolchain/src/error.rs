//! Toolchain resolution error types.

use std::path::PathBuf;

/// Errors that can occur while resolving a toolchain.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// A required executable is absent from every searched directory.
    #[error("Cannot find tool \"{tool}\" in any of: {}", display_dirs(.searched))]
    ToolNotFound {
        /// Logical tool name (e.g., "clang++").
        tool: String,
        /// Directories that were searched, in search order.
        searched: Vec<PathBuf>,
    },

    /// TOML configuration parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed flag override in the configuration.
    #[error("invalid configuration value for '{key}': {detail}")]
    Config { key: String, detail: String },

    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "(no search directories)".into();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for toolchain operations.
pub type Result<T> = std::result::Result<T, ToolchainError>;
