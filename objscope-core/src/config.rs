//! Inspector configuration
//!
//! Styling and visibility settings shared by every tree an inspector shell
//! builds. Loaded from TOML; any field left out keeps its default.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for inspector trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Show members whose name begins with an underscore
    pub include_underscore: bool,
    /// Short type names whose representation is left out of labels
    pub no_repr_types: BTreeSet<String>,
    /// CSS for the whole label
    pub item_style: String,
    /// CSS for the field name segment
    pub name_style: String,
    /// CSS for the type segment
    pub type_style: String,
    /// CSS for the representation segment
    pub repr_style: String,
    /// Maximum height of the tree container (CSS length)
    pub max_height: String,
    /// Icon shown on a closed subtree (Font Awesome name)
    pub open_icon: String,
    /// Icon shown on an open subtree (Font Awesome name)
    pub close_icon: String,
    /// Maximum number of documentation lines in a tooltip
    pub max_doc_lines: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            include_underscore: false,
            no_repr_types: BTreeSet::new(),
            item_style: "font-family: Consolas, monospace".to_string(),
            name_style: "color: purple".to_string(),
            type_style: "color: black".to_string(),
            repr_style: "color: darkblue".to_string(),
            max_height: "30em".to_string(),
            open_icon: "caret-right".to_string(),
            close_icon: "caret-down".to_string(),
            max_doc_lines: 30,
        }
    }
}

impl InspectorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Whether labels for this short type name carry a representation
    pub fn shows_repr(&self, type_name: &str) -> bool {
        !self.no_repr_types.contains(type_name)
    }
}
