//! Context type for resolving aliases from inside one document.

use super::{LocalTable, SymbolIndex};

/// Local-first view of a [SymbolIndex] bound to one document.
///
/// Two documents may describe classes with the same simple name (e.g. a `v1` and a `v1beta`
/// package both defining `Foo`); an ambiguous short alias in a document's own text resolves
/// against that document's symbols before the rest of the corpus.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    index: &'a SymbolIndex,
    document_id: &'a str,
    local: Option<&'a LocalTable>,
}

impl<'a> ResolutionContext<'a> {
    pub(super) fn new(
        index: &'a SymbolIndex,
        document_id: &'a str,
        local: Option<&'a LocalTable>,
    ) -> Self {
        ResolutionContext {
            index,
            document_id,
            local,
        }
    }

    pub fn document_id(&self) -> &'a str {
        self.document_id
    }

    pub fn index(&self) -> &'a SymbolIndex {
        self.index
    }

    /// Local table first, then the global table.
    pub fn resolve(&self, alias: &str) -> Option<&'a str> {
        self.local
            .and_then(|local| local.get(alias))
            .or_else(|| self.index.global().get(alias).map(String::as_str))
    }

    pub fn contains_key(&self, alias: &str) -> bool {
        self.local.is_some_and(|local| local.contains_key(alias))
            || self.index.global().contains_key(alias)
    }

    /// The first alias registered for the document's owner entity, used to expand
    /// `#member` self-references.
    pub fn owner_identifier(&self) -> Option<&'a str> {
        self.local.and_then(|local| local.owner())
    }
}
