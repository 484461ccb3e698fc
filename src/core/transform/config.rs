//! Transform Configuration
//!
//! A transform is declared by name, type tag and rules, given either inline
//! or as a path to a CSV file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{TransformError, TransformResult};

/// Declaration of one transform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSpec {
    /// Name used in diagnostics
    pub name: String,

    /// Type tag: `rewrite`, `synonym` or `bag`. Checked when the pipeline is built.
    #[serde(rename = "type")]
    pub kind: String,

    /// Inline rule text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,

    /// Rule file; relative paths resolve against the config file's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,
}

impl TransformSpec {
    pub fn inline(name: impl Into<String>, kind: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            rules: Some(rules.into()),
            rules_path: None,
        }
    }

    /// Load the rule text. A spec without rules yields an empty table.
    pub fn load_rules(&self, base_dir: Option<&Path>) -> TransformResult<String> {
        match (&self.rules, &self.rules_path) {
            (Some(_), Some(_)) => Err(TransformError::ConfigParse(format!(
                "transform '{}' sets both rules and rules_path",
                self.name
            ))),
            (Some(rules), None) => Ok(rules.clone()),
            (None, Some(path)) => {
                let resolved = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                if !resolved.exists() {
                    return Err(TransformError::RulesNotFound {
                        path: resolved.display().to_string(),
                    });
                }
                Ok(std::fs::read_to_string(&resolved)?)
            }
            (None, None) => Ok(String::new()),
        }
    }
}
