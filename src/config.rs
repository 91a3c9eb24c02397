use crate::error::XrefError;
use serde::{Deserialize, Serialize};
use std::{fs::read_to_string, path::Path};

pub const DEFAULT_TAG_NAME: &str = "link";
pub const DEFAULT_UNRESOLVED_ATTRIBUTE: &str = "data-throw-if-not-resolved";

/// Settings for one resolution run.
///
/// ```toml
/// tag_name = "xref"
/// unresolved_attribute = "data-throw-if-not-resolved"
/// normalize_markdown_links = true
/// expand_generics = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Element name of link tags, e.g. `link` for `<link uid="...">label</link>`.
    pub tag_name: String,
    /// Attribute set to `"false"` on tags whose target could not be resolved.
    pub unresolved_attribute: String,
    pub normalize_markdown_links: bool,
    pub expand_generics: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            unresolved_attribute: DEFAULT_UNRESOLVED_ATTRIBUTE.to_string(),
            normalize_markdown_links: true,
            expand_generics: true,
        }
    }
}

impl ResolverConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, XrefError> {
        let config: ResolverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, XrefError> {
        let path = path.as_ref();
        tracing::debug!("Attempting to read resolver config from: {:?}", path);
        if !path.exists() {
            tracing::debug!("Config file not found, using default resolver config.");
            return Ok(ResolverConfig::default());
        }
        let content = read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, XrefError> {
        Ok(toml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), XrefError> {
        let is_name = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
        };
        if !is_name(&self.tag_name) {
            return Err(XrefError::Config(format!(
                "tag_name '{}' is not a valid element name",
                self.tag_name
            )));
        }
        if !is_name(&self.unresolved_attribute) {
            return Err(XrefError::Config(format!(
                "unresolved_attribute '{}' is not a valid attribute name",
                self.unresolved_attribute
            )));
        }
        Ok(())
    }
}
