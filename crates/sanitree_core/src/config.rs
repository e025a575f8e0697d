//! Sanitizer configuration.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::{Extension, SanitizeError, TraversalLimits};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".sanitree.json";

/// Configuration for the sanitizer.
///
/// The default configuration registers no visitor at all: every element is
/// excluded and only text survives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Named element sets to whitelist.
    #[serde(default)]
    pub extensions: Vec<Extension>,

    /// Additional elements to whitelist. Their children are kept.
    #[serde(default)]
    pub elements: Vec<String>,

    /// Whitelisted elements that are dropped when they end up empty.
    #[serde(default)]
    pub prune_empty: Vec<String>,

    /// Traversal bounds.
    #[serde(default)]
    pub limits: TraversalLimits,
}

impl SanitizerConfig {
    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration written by `sanitree init`.
    pub fn starter() -> Self {
        Self {
            extensions: vec![Extension::Basic],
            ..Self::default()
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SanitizeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SanitizeError::config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parses configuration from JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, SanitizeError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| SanitizeError::config(format!("Invalid JSON: {}", e)))?;

        let schema = schema()?;
        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(SanitizeError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        let config: Self = serde_json::from_value(value)
            .map_err(|e| SanitizeError::config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that also apply to configurations built in code.
    pub fn validate(&self) -> Result<(), SanitizeError> {
        for name in self.elements.iter().chain(&self.prune_empty) {
            if !is_valid_element_name(name) {
                return Err(SanitizeError::config(format!(
                    "Invalid element name '{}'",
                    name
                )));
            }
        }

        if self.limits.max_depth == Some(0) || self.limits.max_nodes == Some(0) {
            return Err(SanitizeError::config("Limits must be at least 1"));
        }

        Ok(())
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SanitizeError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SanitizeError::config(format!("Failed to serialize config: {}", e)))
    }
}

fn schema() -> Result<&'static Validator, SanitizeError> {
    if let Some(schema) = CONFIG_SCHEMA.get() {
        return Ok(schema);
    }

    let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
        .map_err(|e| SanitizeError::config(format!("Invalid embedded config schema: {}", e)))?;
    let validator = Validator::new(&schema_json)
        .map_err(|e| SanitizeError::config(format!("Invalid config schema: {}", e)))?;

    Ok(CONFIG_SCHEMA.get_or_init(|| validator))
}

/// Element names are an ASCII letter followed by ASCII alphanumerics or `-`.
fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
