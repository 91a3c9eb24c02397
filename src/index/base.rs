use std::collections::{BTreeMap, BTreeSet};

use crate::{
    alias::entity_aliases,
    codec::generics::{is_expandable, reference_parts},
    model::{Document, RefPart, Reference},
};

use super::ResolutionContext;

/// Alias table of one document.
///
/// The owner identifier is recorded explicitly when the owner entity is registered, rather
/// than recovered from map iteration order. Keys written by the owner entity are protected:
/// later writes from the same document never replace them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalTable {
    owner: Option<String>,
    map: BTreeMap<String, String>,
    protected: BTreeSet<String>,
}

impl LocalTable {
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.map.get(alias).map(String::as_str)
    }

    pub fn contains_key(&self, alias: &str) -> bool {
        self.map.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert `alias -> uid`. Returns false when the key is owned by the owner entity and
    /// the write was dropped.
    pub fn insert(&mut self, alias: &str, uid: &str) -> bool {
        if self.protected.contains(alias) {
            if self.map.get(alias).map(String::as_str) != Some(uid) {
                tracing::debug!(
                    "[LocalTable::insert] keeping owner alias '{alias}', dropping write to '{uid}'"
                );
            }
            return false;
        }
        if let Some(previous) = self.map.insert(alias.to_string(), uid.to_string()) {
            if previous != uid {
                tracing::debug!(
                    "[LocalTable::insert] alias '{alias}' now maps to '{uid}' (was '{previous}')"
                );
            }
        }
        true
    }

    fn insert_owner(&mut self, alias: &str, uid: &str) {
        if self.owner.is_none() {
            self.owner = Some(alias.to_string());
        }
        if self.insert(alias, uid) {
            self.protected.insert(alias.to_string());
        }
    }
}

/// Alias writes of one document: its finished local table and the ordered writes it
/// contributes to the global table.
type DocumentTables = (String, LocalTable, Vec<(String, String)>);

/// Maps every alias of every indexed symbol to its canonical identifier.
///
/// Built once per run from all documents and then only read. Each document gets its own
/// [LocalTable]; the global table is the union of all documents' entity aliases and
/// reference identifiers, merged in document order so that a later document's write to a
/// colliding key wins. Fragments of compound references only ever go to the local table of
/// the document that mentions them.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    global: BTreeMap<String, String>,
    locals: BTreeMap<String, LocalTable>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        SymbolIndex::default()
    }

    #[tracing::instrument(skip_all, fields(documents = documents.len()))]
    pub fn build(documents: &[Document]) -> Self {
        let mut index = SymbolIndex::new();
        for tables in documents.iter().map(Self::document_tables) {
            index.merge(tables);
        }
        index.log_stats();
        index
    }

    /// Same result as [SymbolIndex::build]; the per-document tables are computed on the rayon
    /// pool and merged serially in document order.
    #[cfg(feature = "parallel")]
    #[tracing::instrument(skip_all, fields(documents = documents.len()))]
    pub fn build_parallel(documents: &[Document]) -> Self {
        use rayon::prelude::*;

        let tables: Vec<DocumentTables> =
            documents.par_iter().map(Self::document_tables).collect();
        let mut index = SymbolIndex::new();
        for doc_tables in tables {
            index.merge(doc_tables);
        }
        index.log_stats();
        index
    }

    fn document_tables(doc: &Document) -> DocumentTables {
        let mut local = LocalTable::default();
        let mut global_writes = Vec::new();

        // Owner first, so its aliases claim their keys before any sibling entity.
        let owner_idx = doc.owner_position();
        let ordered = owner_idx
            .into_iter()
            .chain((0..doc.entities.len()).filter(|idx| Some(*idx) != owner_idx));
        for idx in ordered {
            let entity = &doc.entities[idx];
            for (_form, alias) in entity_aliases(entity) {
                global_writes.push((alias.clone(), entity.uid.clone()));
                if Some(idx) == owner_idx {
                    local.insert_owner(&alias, &entity.uid);
                } else {
                    local.insert(&alias, &entity.uid);
                }
            }
        }

        for reference in doc.references.iter() {
            global_writes.push((reference.uid.clone(), reference.uid.clone()));
            local.insert(&reference.uid, &reference.uid);
            if reference.is_compound() {
                Self::register_parts(&mut local, reference);
            }
        }

        (doc.id.clone(), local, global_writes)
    }

    /// Parts not yet attached to a generic reference are derived from its identifier.
    fn register_parts(local: &mut LocalTable, reference: &Reference) {
        let derived: Vec<RefPart>;
        let parts = if reference.parts.is_empty() && is_expandable(&reference.uid) {
            derived = reference_parts(&reference.uid);
            &derived
        } else {
            &reference.parts
        };
        for part in parts.iter() {
            let Some(uid) = part.uid.as_deref() else {
                continue;
            };
            for alias in [part.name.as_str(), part.full_name.as_str()] {
                if !alias.trim().is_empty() {
                    local.insert(alias.trim(), uid);
                }
            }
        }
    }

    fn merge(&mut self, (doc_id, local, global_writes): DocumentTables) {
        for (alias, uid) in global_writes {
            self.insert_global(&alias, &uid);
        }
        if self.locals.insert(doc_id.clone(), local).is_some() {
            tracing::warn!("[SymbolIndex::merge] document '{doc_id}' indexed twice, keeping the last");
        }
    }

    fn log_stats(&self) {
        tracing::debug!(
            "[SymbolIndex] indexed {} documents, {} global aliases, {} local aliases",
            self.locals.len(),
            self.global.len(),
            self.locals.values().map(LocalTable::len).sum::<usize>()
        );
    }

    /// Register an alias visible to every document, e.g. a well-known external symbol.
    pub fn insert_global(&mut self, alias: &str, uid: &str) {
        if let Some(previous) = self.global.insert(alias.to_string(), uid.to_string()) {
            if previous != uid {
                tracing::debug!(
                    "[SymbolIndex::insert_global] alias '{alias}' now maps to '{uid}' (was '{previous}')"
                );
            }
        }
    }

    /// Register an alias visible only inside `document_id`.
    pub fn insert_local(&mut self, document_id: &str, alias: &str, uid: &str) -> bool {
        self.locals
            .entry(document_id.to_string())
            .or_default()
            .insert(alias, uid)
    }

    pub fn global(&self) -> &BTreeMap<String, String> {
        &self.global
    }

    pub fn local(&self, document_id: &str) -> Option<&LocalTable> {
        self.locals.get(document_id)
    }

    pub fn document_count(&self) -> usize {
        self.locals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.locals.values().all(LocalTable::is_empty)
    }

    /// A read-only view bound to one document. Unknown documents get a context that only
    /// sees the global table.
    pub fn context<'a>(&'a self, document_id: &'a str) -> ResolutionContext<'a> {
        ResolutionContext::new(self, document_id, self.locals.get(document_id))
    }
}
