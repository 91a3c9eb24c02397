//! Reading and writing document bundles.
//!
//! A bundle is a list of [Document]s serialized as YAML (`.yml`, `.yaml`) or JSON (`.json`).
//! The format is picked from the file extension.
use crate::{error::XrefError, model::Document};
use std::{
    fs::{read_to_string, write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    Yaml,
    Json,
}

impl BundleFormat {
    pub fn from_path(path: &Path) -> Result<BundleFormat, XrefError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yml") | Some("yaml") => Ok(BundleFormat::Yaml),
            Some("json") => Ok(BundleFormat::Json),
            _ => Err(XrefError::Serialization(format!(
                "Unsupported bundle format for {path:?}, expected .yml, .yaml or .json"
            ))),
        }
    }

    pub fn parse(&self, content: &str) -> Result<Vec<Document>, XrefError> {
        Ok(match self {
            BundleFormat::Yaml => serde_yaml::from_str(content)?,
            BundleFormat::Json => serde_json::from_str(content)?,
        })
    }

    pub fn render(&self, documents: &[Document]) -> Result<String, XrefError> {
        Ok(match self {
            BundleFormat::Yaml => serde_yaml::to_string(documents)?,
            BundleFormat::Json => serde_json::to_string_pretty(documents)?,
        })
    }
}

#[tracing::instrument]
pub fn load(path: &Path) -> Result<Vec<Document>, XrefError> {
    let format = BundleFormat::from_path(path)?;
    let content = read_to_string(path)?;
    let documents = format.parse(&content)?;
    tracing::debug!("Loaded {} documents", documents.len());
    Ok(documents)
}

#[tracing::instrument(skip(documents), fields(documents = documents.len()))]
pub fn save(path: &Path, documents: &[Document]) -> Result<(), XrefError> {
    let format = BundleFormat::from_path(path)?;
    write(path, format.render(documents)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_log::test;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            BundleFormat::from_path(&PathBuf::from("docs.YAML")).unwrap(),
            BundleFormat::Yaml
        );
        assert_eq!(
            BundleFormat::from_path(&PathBuf::from("docs.json")).unwrap(),
            BundleFormat::Json
        );
        assert!(matches!(
            BundleFormat::from_path(&PathBuf::from("docs.toml")),
            Err(XrefError::Serialization(_))
        ));
        assert!(BundleFormat::from_path(&PathBuf::from("docs")).is_err());
    }

    #[test]
    fn test_missing_bundle_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("absent.yml")),
            Err(XrefError::NotFound(_))
        ));
    }

    #[test]
    fn test_yaml_uses_camel_case_fields() {
        let yaml = r#"
- id: a.b.Foo
  package: a.b
  entities:
    - uid: a.b.Foo
      name: Foo
      nameWithType: Foo
      isOwner: true
  references:
    - uid: java.lang.String
      name: String
      nameWithType: String
"#;
        let documents = BundleFormat::Yaml.parse(yaml).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].entities[0].name_with_type, "Foo");
        assert!(documents[0].entities[0].is_owner);
        assert_eq!(
            documents[0].references[0].name_with_type.as_deref(),
            Some("String")
        );
    }
}
