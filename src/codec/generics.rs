//! Generic Reference Expander.
//!
//! A compound identifier such as `java.util.Map<java.lang.String,java.util.List<a.b.Item>>`
//! names several linkable types at once. [tokenize] splits it into identifier and punctuation
//! tokens (kept in order so the display form can be rebuilt), [expand] keeps the identifiers,
//! and [expand_references] materializes them as references of a document.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::model::{Document, RefPart, Reference};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}_$][\w$]*(?:\.[\p{L}_$][\w$]*)*$").expect("identifier regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericToken {
    Identifier(String),
    Punctuation(String),
}

fn push_segment(tokens: &mut Vec<GenericToken>, segment: &str) {
    let mut segment = segment.trim();
    if segment.is_empty() {
        return;
    }
    for bound in ["? extends ", "? super "] {
        if let Some(rest) = segment.strip_prefix(bound) {
            tokens.push(GenericToken::Punctuation(bound.to_string()));
            segment = rest.trim();
        }
    }
    let (segment, varargs) = match segment.strip_suffix("...") {
        Some(rest) => (rest.trim_end(), true),
        None => (segment, false),
    };
    if IDENTIFIER.is_match(segment) {
        tokens.push(GenericToken::Identifier(segment.to_string()));
    } else if !segment.is_empty() {
        tokens.push(GenericToken::Punctuation(segment.to_string()));
    }
    if varargs {
        tokens.push(GenericToken::Punctuation("...".to_string()));
    }
}

/// Split on `<`, `>`, `,` and `[]`, keeping each separator as a punctuation token.
pub fn tokenize(identifier: &str) -> Vec<GenericToken> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut chars = identifier.char_indices();
    while let Some((idx, c)) = chars.next() {
        let separator = match c {
            '<' | '>' | ',' => Some(&identifier[idx..idx + 1]),
            '[' if identifier[idx..].starts_with("[]") => {
                chars.next();
                Some(&identifier[idx..idx + 2])
            }
            _ => None,
        };
        if let Some(separator) = separator {
            push_segment(&mut tokens, &identifier[start..idx]);
            tokens.push(GenericToken::Punctuation(separator.to_string()));
            start = idx + separator.len();
        }
    }
    push_segment(&mut tokens, &identifier[start..]);
    tokens
}

/// The base identifiers referenced by `identifier`, in order. Repeats are kept; deduplication
/// happens when references are materialized.
///
/// ```
/// # use docxref::codec::generics::expand;
/// assert_eq!(
///     expand("a.b.c.List<df.mn.ClassOne<tr.T>>"),
///     vec!["a.b.c.List", "df.mn.ClassOne", "tr.T"]
/// );
/// ```
pub fn expand(identifier: &str) -> Vec<String> {
    tokenize(identifier)
        .into_iter()
        .filter_map(|token| match token {
            GenericToken::Identifier(id) => Some(id),
            GenericToken::Punctuation(_) => None,
        })
        .collect()
}

/// Whether a reference identifier is a compound type to expand. Overload wildcards are never
/// expanded.
pub fn is_expandable(uid: &str) -> bool {
    uid.contains('<') && !uid.ends_with('*')
}

fn simple_name(uid: &str) -> &str {
    uid.rsplit('.').next().unwrap_or(uid)
}

/// Display tokens of a compound identifier, one [RefPart] per token.
pub fn reference_parts(identifier: &str) -> Vec<RefPart> {
    tokenize(identifier)
        .into_iter()
        .map(|token| match token {
            GenericToken::Identifier(id) => RefPart {
                name: simple_name(&id).to_string(),
                full_name: id.clone(),
                uid: Some(id),
            },
            GenericToken::Punctuation(p) => RefPart {
                uid: None,
                name: p.clone(),
                full_name: p,
            },
        })
        .collect()
}

/// Expand every compound reference of `doc`: store its display parts and add one plain
/// reference per base identifier not already present as an entity or reference. Returns the
/// number of references added.
#[tracing::instrument(skip_all, fields(document = %doc.id))]
pub fn expand_references(doc: &mut Document) -> usize {
    let mut known: BTreeSet<String> = doc
        .entities
        .iter()
        .map(|e| e.uid.clone())
        .chain(doc.references.iter().map(|r| r.uid.clone()))
        .collect();
    let mut additions = Vec::new();
    for reference in doc.references.iter_mut() {
        if !is_expandable(&reference.uid) {
            continue;
        }
        reference.parts = reference_parts(&reference.uid);
        for uid in expand(&reference.uid) {
            if known.insert(uid.clone()) {
                let name = simple_name(&uid).to_string();
                additions.push(Reference {
                    name_with_type: Some(name.clone()),
                    full_name: Some(uid.clone()),
                    name,
                    uid,
                    parts: vec![],
                });
            }
        }
    }
    if !additions.is_empty() {
        tracing::debug!("Adding {} expanded references", additions.len());
    }
    let added = additions.len();
    doc.references.extend(additions);
    added
}
