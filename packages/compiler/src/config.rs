//! Compiler configuration

use crate::error::{CompilerError, Result};
use serde::{Deserialize, Serialize};

/// Options that shape the emitted markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Class appended to every node that owns an instruction group.
    pub target_class: String,
    /// Tag of the inert node left where a template controller was extracted.
    pub marker_tag: String,
    /// Drop text nodes that contain only whitespace.
    pub strip_whitespace_text: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            target_class: "au".to_string(),
            marker_tag: "au-m".to_string(),
            strip_whitespace_text: false,
        }
    }
}

impl CompilerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CompilerConfig = serde_json::from_str(json)
            .map_err(|e| CompilerError::compile(format!("Invalid compiler configuration: {}", e)))?;
        if config.target_class.trim().is_empty() || config.marker_tag.trim().is_empty() {
            return Err(CompilerError::compile(
                "Invalid compiler configuration: targetClass and markerTag must not be empty",
            ));
        }
        Ok(config)
    }
}
