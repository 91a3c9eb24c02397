use std::io;

use regex::Error as RegexError;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use serde_yaml::Error as YamlError;
use thiserror::Error;

/// Errors surfaced to callers of the resolution engine.
///
/// Missing, malformed or ambiguous references are never errors; they degrade to unresolved
/// links plus a [crate::codec::ResolveDiagnostic]. Only broken input structure and I/O at the
/// crate boundary produce an [XrefError].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum XrefError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Custom error: {0}")]
    Custom(String),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for XrefError {
    fn from(src: toml::de::Error) -> XrefError {
        XrefError::Config(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for XrefError {
    fn from(src: toml::ser::Error) -> XrefError {
        XrefError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for XrefError {
    fn from(src: JsonError) -> XrefError {
        XrefError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<YamlError> for XrefError {
    fn from(src: YamlError) -> XrefError {
        XrefError::Serialization(format!("YAML (de)serialization error: {src}"))
    }
}

impl From<io::Error> for XrefError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => XrefError::NotFound(format!("{x}")),
            _ => XrefError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<RegexError> for XrefError {
    fn from(x: RegexError) -> Self {
        XrefError::Config(format!("Regex parse failed: {x}"))
    }
}
