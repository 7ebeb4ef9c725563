//! Input configuration types.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ErrorPolicy, UnknownPolicy};

/// How a list of inputs is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read all inputs as one concatenated stream
    #[default]
    Concat,
    /// Process inputs one by one
    Each,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "concat" | "cat" => Ok(Mode::Concat),
            "each" => Ok(Mode::Each),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Configuration for a set of named inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Input paths, in reading order
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub mode: Mode,
    /// Error policy: "fast_fail" or "accumulate"
    #[serde(default)]
    pub error_policy: Option<String>,
    /// Read stdin when `paths` is empty
    #[serde(default = "default_stdin_fallback")]
    pub stdin_fallback: bool,
}

fn default_stdin_fallback() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            mode: Mode::default(),
            error_policy: None,
            stdin_fallback: default_stdin_fallback(),
        }
    }
}

impl InputConfig {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: impl Into<String>) -> Self {
        self.error_policy = Some(policy.into());
        self
    }

    pub fn with_stdin_fallback(mut self, enabled: bool) -> Self {
        self.stdin_fallback = enabled;
        self
    }

    /// The configured error policy, or the default when none is set.
    pub fn policy(&self) -> Result<ErrorPolicy, UnknownPolicy> {
        match self.error_policy.as_deref() {
            Some(name) => name.parse(),
            None => Ok(ErrorPolicy::default()),
        }
    }
}
