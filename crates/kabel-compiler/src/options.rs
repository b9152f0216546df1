//! Compile options and their TOML form.
//!
//! ```toml
//! [compile]
//! log = true
//! addressing = "registers"
//! fallback_type = "thru"
//! const_type = "n"
//! identifier_prefix = "n"
//! ```
//!
//! The `[compile]` table is optional; the same keys are accepted at the top
//! level. Missing keys take their defaults.

use std::path::Path;

use kabel_graph::kinds;
use kabel_registry::Addressing;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options for one compile call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Promote compile diagnostics from `debug` to `info` level.
    pub log: bool,
    /// Textual convention for slot references.
    pub addressing: Addressing,
    /// Kind substituted when a node's kind is unregistered.
    pub fallback_type: String,
    /// Kind identifying constant nodes, which are inlined.
    pub const_type: String,
    /// Identifier prefix under [`Addressing::Identifiers`].
    pub identifier_prefix: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            log: false,
            addressing: Addressing::Identifiers,
            fallback_type: kinds::THRU.to_string(),
            const_type: kinds::CONST.to_string(),
            identifier_prefix: "n".to_string(),
        }
    }
}

impl CompileOptions {
    /// Sets [`log`](Self::log).
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Sets [`addressing`](Self::addressing).
    pub fn with_addressing(mut self, addressing: Addressing) -> Self {
        self.addressing = addressing;
        self
    }

    /// Sets [`fallback_type`](Self::fallback_type).
    pub fn with_fallback_type(mut self, kind: impl Into<String>) -> Self {
        self.fallback_type = kind.into();
        self
    }

    /// Sets [`const_type`](Self::const_type).
    pub fn with_const_type(mut self, kind: impl Into<String>) -> Self {
        self.const_type = kind.into();
        self
    }

    /// Sets [`identifier_prefix`](Self::identifier_prefix).
    pub fn with_identifier_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.identifier_prefix = prefix.into();
        self
    }

    /// Parse options from a TOML string.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(src)?;
        let options: CompileOptions = match table.remove("compile") {
            Some(section) => section.try_into()?,
            None => toml::Value::Table(table).try_into()?,
        };
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&src)
    }
}
