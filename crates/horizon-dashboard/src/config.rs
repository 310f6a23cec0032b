//! Dashboard configuration.
//!
//! Configuration is read from TOML or JSON. Every key is optional; missing
//! keys take the defaults the dashboard ships with.
//!
//! ```toml
//! [rich-list]
//! add-button-text = "Add Source"
//! menu-alignment = "right"
//! search-case-sensitivity = "case-sensitive"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use horizon_dashboard_core::logging::targets;

use crate::error::{Error, Result};
use crate::forms::{CaseSensitivity, MenuAlignment};

/// Defaults applied to rich list fields built with
/// [`RichListFieldBuilder::config`](crate::forms::RichListFieldBuilder::config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RichListConfig {
    /// Caption of the add button.
    pub add_button_text: String,
    /// Which edge of the add button the menu hangs from.
    pub menu_alignment: MenuAlignment,
    /// How the add menu matches search queries.
    pub search_case_sensitivity: CaseSensitivity,
}

impl Default for RichListConfig {
    fn default() -> Self {
        Self {
            add_button_text: "Add Item".to_string(),
            menu_alignment: MenuAlignment::default(),
            search_case_sensitivity: CaseSensitivity::default(),
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DashboardConfig {
    /// Rich list field defaults.
    pub rich_list: RichListConfig,
}

impl DashboardConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config("TOML", e.to_string()))
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::config("JSON", e.to_string()))
    }

    /// Load configuration from a file, choosing the format by extension.
    ///
    /// `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded dashboard configuration");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config("TOML", e.to_string()))
    }
}
