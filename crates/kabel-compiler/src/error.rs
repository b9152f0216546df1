//! Error types for compilation and option loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a compile call.
///
/// Compilation never returns partial output: on error, no program and no
/// stateful-unit list are produced.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A node's kind is unregistered and so is the configured fallback.
    #[error("no schema for node type \"{kind}\" (fallback \"{fallback}\" is unregistered)")]
    MissingFallback {
        /// Kind tag of the node being compiled.
        kind: String,
        /// The configured fallback kind tag.
        fallback: String,
    },
}

/// Errors that can occur while loading compile options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }
}
