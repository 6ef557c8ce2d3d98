//! Sequence configuration
//!
//! `SeqConfig` controls the permissive corners of the library: what happens
//! on an unknown operator name, how long a materialized range may get, and
//! how the evaluation stack is sized.
//!
//! # Example
//!
//! ```rust,ignore
//! use lazyseq::{OperatorNamePolicy, SeqConfig};
//!
//! let config = SeqConfig::new()
//!     .with_operator_names(OperatorNamePolicy::Strict)
//!     .with_max_range_len(10_000);
//!
//! // Or from a TOML file
//! let config = SeqConfig::load("lazyseq.toml")?;
//! ```
//!
//! TOML layout (every key optional):
//!
//! ```toml
//! operator_names = "strict"   # or "permissive" (default)
//! max_range_len = 10000
//! stack_capacity = 16
//! ```

use lazyseq_core::DEFAULT_STACK_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when an operator name does not resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorNamePolicy {
    /// Skip the operation silently (logs a warning)
    #[default]
    Permissive,
    /// Return `SeqError::UnresolvedOperator`
    Strict,
}

/// Configuration carried by every sequence expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeqConfig {
    /// Policy for unresolved operator names
    pub operator_names: OperatorNamePolicy,

    /// Upper bound on the number of values `range`/`first` may materialize
    pub max_range_len: Option<usize>,

    /// Initial capacity of the evaluation stack
    pub stack_capacity: usize,
}

impl Default for SeqConfig {
    fn default() -> Self {
        SeqConfig {
            operator_names: OperatorNamePolicy::Permissive,
            max_range_len: None,
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

/// Error loading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(std::io::Error),
    /// The content is not valid configuration TOML
    Parse(toml::de::Error),
    /// The values are out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl SeqConfig {
    /// Create the default (permissive, unbounded) configuration
    pub fn new() -> Self {
        SeqConfig::default()
    }

    /// Set the operator-name policy (builder pattern)
    pub fn with_operator_names(mut self, policy: OperatorNamePolicy) -> Self {
        self.operator_names = policy;
        self
    }

    /// Bound the length of materialized ranges
    pub fn with_max_range_len(mut self, limit: usize) -> Self {
        self.max_range_len = Some(limit);
        self
    }

    /// Set the initial evaluation stack capacity
    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.operator_names == OperatorNamePolicy::Strict
    }

    /// Parse a configuration from TOML content
    ///
    /// Validates the values after parsing.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_capacity == 0 {
            return Err(ConfigError::Invalid(
                "stack_capacity must be at least 1".to_string(),
            ));
        }
        if self.max_range_len == Some(0) {
            return Err(ConfigError::Invalid(
                "max_range_len must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
