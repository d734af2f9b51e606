//! Parser configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for script parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Offer chunks to the native query validator (default: true)
    pub passthrough: bool,
    /// Chunks opening with a DSL statement keyword skip the validator (default: false)
    pub dsl_keywords_first: bool,
    /// Error on tokens left after a complete statement (default: true)
    pub reject_trailing_tokens: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            passthrough: true,
            dsl_keywords_first: false,
            reject_trailing_tokens: true,
        }
    }
}

impl ParserConfig {
    /// Decode a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
