//! Input and output records of a resolution run.
//!
//! A [Document] is the unit of locality: the entities it describes plus the references it
//! mentions. Upstream extraction produces documents; the [crate::compiler::XrefCompiler] rewrites
//! their free-text fields and augments their references; downstream emission persists them.

use crate::error::XrefError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Publication status attached to an entity by an injected
/// [crate::compiler::StatusClassifier].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Deprecated,
    Preview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnValue {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDoc {
    #[serde(rename = "type")]
    pub type_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syntax {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_value: Option<ReturnValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<ExceptionDoc>,
}

/// A documented symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Canonical identifier, e.g. `a.b.SomeClass.method(java.lang.String)`.
    pub uid: String,
    #[serde(default)]
    pub name: String,
    /// Declaring-type-qualified display form, e.g. `SomeClass<T>.method(String value)`.
    #[serde(default)]
    pub name_with_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<Syntax>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_owner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

impl Entity {
    pub fn new(uid: &str, name: &str, name_with_type: &str) -> Self {
        Entity {
            uid: uid.to_string(),
            name: name.to_string(),
            name_with_type: name_with_type.to_string(),
            ..Default::default()
        }
    }

    pub fn owner(mut self) -> Self {
        self.is_owner = true;
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    /// Every free-text field that may contain link tags.
    pub fn texts_mut(&mut self) -> Vec<&mut String> {
        let mut texts = Vec::new();
        if let Some(summary) = self.summary.as_mut() {
            texts.push(summary);
        }
        if let Some(syntax) = self.syntax.as_mut() {
            texts.extend(
                syntax
                    .parameters
                    .iter_mut()
                    .filter_map(|p| p.description.as_mut()),
            );
            if let Some(desc) = syntax
                .return_value
                .as_mut()
                .and_then(|r| r.description.as_mut())
            {
                texts.push(desc);
            }
            texts.extend(
                syntax
                    .exceptions
                    .iter_mut()
                    .filter_map(|e| e.description.as_mut()),
            );
        }
        texts
    }
}

/// One display token of a compound reference. Tokens without a `uid` are punctuation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub name: String,
    pub full_name: String,
}

impl RefPart {
    pub fn is_separator(&self) -> bool {
        self.uid.is_none()
    }
}

/// A pointer to a symbol mentioned by a document, possibly outside the processed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_with_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<RefPart>,
}

impl Reference {
    pub fn new(uid: &str, name: &str) -> Self {
        Reference {
            uid: uid.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_name_with_type(mut self, name_with_type: &str) -> Self {
        self.name_with_type = Some(name_with_type.to_string());
        self
    }

    /// A compound (generic) reference has no display form of its own; it is rendered from
    /// its parts instead.
    pub fn is_compound(&self) -> bool {
        self.name_with_type.is_none()
    }

    /// `*`-suffixed identifiers stand for every overload of a method.
    pub fn is_overload_wildcard(&self) -> bool {
        self.uid.ends_with('*')
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    /// Package of the document's symbols; used to qualify abbreviated links.
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Document {
    pub fn new(id: &str, package: &str) -> Self {
        Document {
            id: id.to_string(),
            package: package.to_string(),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// The entity the document describes: the one flagged as owner, else the first.
    pub fn owner(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.is_owner)
            .or_else(|| self.entities.first())
    }

    pub fn owner_position(&self) -> Option<usize> {
        match self.entities.iter().position(|e| e.is_owner) {
            Some(idx) => Some(idx),
            None if !self.entities.is_empty() => Some(0),
            None => None,
        }
    }

    pub fn validate(&self) -> Result<(), XrefError> {
        if self.id.trim().is_empty() {
            return Err(XrefError::InvalidDocument(
                "document is missing its identifier".to_string(),
            ));
        }
        if let Some(idx) = self.entities.iter().position(|e| e.uid.trim().is_empty()) {
            return Err(XrefError::InvalidDocument(format!(
                "entity #{idx} of document '{}' has an empty uid",
                self.id
            )));
        }
        if let Some(idx) = self.references.iter().position(|r| r.uid.trim().is_empty()) {
            return Err(XrefError::InvalidDocument(format!(
                "reference #{idx} of document '{}' has an empty uid",
                self.id
            )));
        }
        if self.entities.iter().filter(|e| e.is_owner).count() > 1 {
            return Err(XrefError::InvalidDocument(format!(
                "document '{}' flags more than one owner entity",
                self.id
            )));
        }
        Ok(())
    }
}

/// Check every precondition on the input before a run starts.
pub fn validate_documents(documents: &[Document]) -> Result<(), XrefError> {
    let mut seen = BTreeSet::new();
    for doc in documents {
        doc.validate()?;
        if !seen.insert(doc.id.as_str()) {
            return Err(XrefError::InvalidDocument(format!(
                "document identifier '{}' appears more than once",
                doc.id
            )));
        }
    }
    Ok(())
}
