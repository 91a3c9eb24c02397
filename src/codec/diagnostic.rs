//! Diagnostic types for link resolution.
//!
//! Resolution never fails a run. Links that cannot be mapped to a symbol, and payloads that
//! fit no link shape, are recorded here instead and the text is left in a renderable state.

use serde::{Deserialize, Serialize};

/// One link that did not resolve cleanly.
///
/// # Examples
///
/// ```
/// # use docxref::codec::ResolveDiagnostic;
/// let diagnostic = ResolveDiagnostic::Unresolved {
///     document: "a.b.SomeClass".to_string(),
///     payload: "UnknownClass#run()".to_string(),
/// };
/// assert!(diagnostic.is_unresolved());
/// assert_eq!(diagnostic.payload(), "UnknownClass#run()");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveDiagnostic {
    /// The tag was kept, its target emptied and flagged as unknown.
    Unresolved { document: String, payload: String },
    /// The payload fits no link shape; it was kept verbatim and flagged as unknown.
    Malformed { document: String, payload: String },
}

impl ResolveDiagnostic {
    pub fn unresolved(document: &str, payload: &str) -> Self {
        ResolveDiagnostic::Unresolved {
            document: document.to_string(),
            payload: payload.to_string(),
        }
    }

    pub fn malformed(document: &str, payload: &str) -> Self {
        ResolveDiagnostic::Malformed {
            document: document.to_string(),
            payload: payload.to_string(),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolveDiagnostic::Unresolved { .. })
    }

    pub fn document(&self) -> &str {
        match self {
            ResolveDiagnostic::Unresolved { document, .. }
            | ResolveDiagnostic::Malformed { document, .. } => document,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            ResolveDiagnostic::Unresolved { payload, .. }
            | ResolveDiagnostic::Malformed { payload, .. } => payload,
        }
    }
}
