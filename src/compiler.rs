use crate::{
    codec::{
        generics::{expand_references, is_expandable, reference_parts},
        md::normalize_markdown_links,
        LinkRewriter, ResolveDiagnostic,
    },
    config::ResolverConfig,
    error::XrefError,
    index::SymbolIndex,
    model::{validate_documents, Document, Entity, EntityStatus, Reference},
};
use std::collections::BTreeSet;

/// Decides the publication status of an entity, e.g. from deprecation annotations the
/// upstream extractor saw. The engine calls it once per entity and records the answer.
pub trait StatusClassifier: Sync {
    fn classify(&self, entity: &Entity) -> Option<EntityStatus>;
}

/// Leaves every entity's status as it came in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClassification;

impl StatusClassifier for NoClassification {
    fn classify(&self, _entity: &Entity) -> Option<EntityStatus> {
        None
    }
}

impl<F> StatusClassifier for F
where
    F: Fn(&Entity) -> Option<EntityStatus> + Sync,
{
    fn classify(&self, entity: &Entity) -> Option<EntityStatus> {
        self(entity)
    }
}

/// Counters for one compile run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub documents: usize,
    pub markdown_links_normalized: usize,
    pub links_resolved: usize,
    pub links_unresolved: usize,
    pub links_malformed: usize,
    pub references_added: usize,
    pub texts_changed: usize,
}

/// Result of compiling a document collection
#[derive(Debug, Clone, Default)]
pub struct CompileResult {
    pub documents: Vec<Document>,
    pub diagnostics: Vec<ResolveDiagnostic>,
    pub stats: CompileStats,
}

impl CompileResult {
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolveDiagnostic> {
        self.diagnostics.iter().filter(|d| d.is_unresolved())
    }
}

/// Runs the whole resolution pipeline over an in-memory document collection.
///
/// ## Pipeline
///
/// 1. Validate input structure ([validate_documents]); this is the only fatal step
/// 2. Classify entities through the injected [StatusClassifier]
/// 3. Add references for syntax types (parameter, return and exception types) that the
///    document does not mention yet
/// 4. Normalize markdown links into link tags (if enabled)
/// 5. Build the [SymbolIndex] once from all documents
/// 6. Per document: rewrite every link tag in every text field through a
///    [ResolutionContext](crate::index::ResolutionContext) bound to that document
/// 7. Expand compound generic references into linkable sub-references (if enabled)
///
/// Running the compiler again over its own output changes nothing.
pub struct XrefCompiler {
    config: ResolverConfig,
    rewriter: LinkRewriter,
    classifier: Box<dyn StatusClassifier>,
}

impl XrefCompiler {
    pub fn new(config: ResolverConfig) -> Result<Self, XrefError> {
        let rewriter = LinkRewriter::new(&config)?;
        Ok(XrefCompiler {
            config,
            rewriter,
            classifier: Box::new(NoClassification),
        })
    }

    /// Compiler with the default [ResolverConfig].
    pub fn simple() -> Result<Self, XrefError> {
        Self::new(ResolverConfig::default())
    }

    pub fn with_classifier<C: StatusClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn rewriter(&self) -> &LinkRewriter {
        &self.rewriter
    }

    #[tracing::instrument(skip_all, fields(documents = documents.len()))]
    pub fn compile(&self, mut documents: Vec<Document>) -> Result<CompileResult, XrefError> {
        validate_documents(&documents)?;
        let mut stats = CompileStats {
            documents: documents.len(),
            ..Default::default()
        };

        for doc in documents.iter_mut() {
            for entity in doc.entities.iter_mut() {
                if let Some(status) = self.classifier.classify(entity) {
                    entity.status = Some(status);
                }
            }
            stats.references_added += add_syntax_references(doc);
            if self.config.normalize_markdown_links {
                for text in doc.entities.iter_mut().flat_map(Entity::texts_mut) {
                    let (normalized, count) = normalize_markdown_links(text, &self.rewriter);
                    if count > 0 {
                        *text = normalized;
                        stats.markdown_links_normalized += count;
                    }
                }
            }
        }

        #[cfg(feature = "parallel")]
        let index = SymbolIndex::build_parallel(&documents);
        #[cfg(not(feature = "parallel"))]
        let index = SymbolIndex::build(&documents);

        let mut diagnostics = Vec::new();
        for doc in documents.iter_mut() {
            let ctx = index.context(&doc.id);
            for text in doc.entities.iter_mut().flat_map(Entity::texts_mut) {
                let rewrite = self.rewriter.rewrite(text, &doc.package, &ctx);
                stats.links_resolved += rewrite.resolved;
                for diagnostic in rewrite.diagnostics.iter() {
                    if diagnostic.is_unresolved() {
                        stats.links_unresolved += 1;
                    } else {
                        stats.links_malformed += 1;
                    }
                }
                diagnostics.extend(rewrite.diagnostics);
                if rewrite.changed {
                    stats.texts_changed += 1;
                    *text = rewrite.text;
                }
            }
        }

        if self.config.expand_generics {
            for doc in documents.iter_mut() {
                stats.references_added += expand_references(doc);
            }
        }

        tracing::info!(
            "Compiled {} documents: {} links resolved, {} unresolved, {} malformed",
            stats.documents,
            stats.links_resolved,
            stats.links_unresolved,
            stats.links_malformed
        );
        Ok(CompileResult {
            documents,
            diagnostics,
            stats,
        })
    }
}

/// Mention every type named in a syntax block as a reference of the document. Compound
/// generic types are added without a name-with-type and with their display parts.
fn add_syntax_references(doc: &mut Document) -> usize {
    let mut known: BTreeSet<String> = doc
        .entities
        .iter()
        .map(|e| e.uid.clone())
        .chain(doc.references.iter().map(|r| r.uid.clone()))
        .collect();
    let types: Vec<String> = doc
        .entities
        .iter()
        .filter_map(|e| e.syntax.as_ref())
        .flat_map(|syntax| {
            syntax
                .parameters
                .iter()
                .filter_map(|p| p.type_uid.clone())
                .chain(
                    syntax
                        .return_value
                        .iter()
                        .filter_map(|r| r.type_uid.clone()),
                )
                .chain(syntax.exceptions.iter().map(|e| e.type_uid.clone()))
        })
        .collect();

    let mut added = 0;
    for uid in types {
        let uid = uid.trim().to_string();
        // Primitives and type variables (`int`, `T`) are not linkable.
        if !uid.contains('.') || !known.insert(uid.clone()) {
            continue;
        }
        let reference = if is_expandable(&uid) {
            let parts = reference_parts(&uid);
            Reference {
                name: parts.iter().map(|p| p.name.as_str()).collect(),
                full_name: Some(uid.clone()),
                name_with_type: None,
                uid,
                parts,
            }
        } else {
            let name = uid.rsplit('.').next().unwrap_or(&uid).to_string();
            Reference {
                name_with_type: Some(name.clone()),
                full_name: Some(uid.clone()),
                name,
                uid,
                parts: vec![],
            }
        };
        doc.references.push(reference);
        added += 1;
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, ReturnValue, Syntax};
    use test_log::test;

    fn method_with_syntax() -> Entity {
        let mut method = Entity::new(
            "a.b.Box.fill(java.util.List<a.b.Item>)",
            "fill(List<Item>)",
            "Box.fill(List<Item> items)",
        );
        method.syntax = Some(Syntax {
            parameters: vec![Parameter {
                id: "items".to_string(),
                type_uid: Some("java.util.List<a.b.Item>".to_string()),
                description: Some("items, see <link uid=\"Item\">Item</link>".to_string()),
            }],
            ..Default::default()
        });
        method
    }

    #[test]
    fn test_syntax_types_become_references() {
        let mut method = method_with_syntax();
        if let Some(syntax) = method.syntax.as_mut() {
            syntax.return_value = Some(ReturnValue {
                type_uid: Some("int".to_string()),
                description: None,
            });
        }
        let mut doc = Document::new("a.b.Box", "a.b")
            .with_entity(Entity::new("a.b.Box", "Box", "Box"))
            .with_entity(method);
        assert_eq!(add_syntax_references(&mut doc), 1);
        let reference = &doc.references[0];
        assert_eq!(reference.uid, "java.util.List<a.b.Item>");
        assert!(reference.is_compound());
        assert_eq!(reference.name, "List<Item>");
        assert_eq!(add_syntax_references(&mut doc), 0);
    }

    #[test]
    fn test_compile_resolves_through_generic_parts() {
        let doc = Document::new("a.b.Box", "a.b")
            .with_entity(Entity::new("a.b.Box", "Box", "Box"))
            .with_entity(method_with_syntax());
        let result = XrefCompiler::simple().unwrap().compile(vec![doc]).unwrap();
        let description = result.documents[0].entities[1]
            .syntax
            .as_ref()
            .and_then(|s| s.parameters[0].description.clone())
            .unwrap();
        // `Item` is only known as a fragment of the List<Item> parameter type.
        assert_eq!(description, "items, see <link uid=\"a.b.Item\">Item</link>");
        assert_eq!(result.stats.links_resolved, 1);
        let uids: Vec<&str> = result.documents[0]
            .references
            .iter()
            .map(|r| r.uid.as_str())
            .collect();
        assert_eq!(
            uids,
            vec!["java.util.List<a.b.Item>", "java.util.List", "a.b.Item"]
        );
    }

    #[test]
    fn test_classifier_sets_status() {
        let doc = Document::new("a.b.Old", "a.b")
            .with_entity(Entity::new("a.b.Old", "Old", "Old").with_summary("@deprecated"));
        let compiler = XrefCompiler::simple()
            .unwrap()
            .with_classifier(|entity: &Entity| {
                entity
                    .summary
                    .as_deref()
                    .filter(|s| s.contains("@deprecated"))
                    .map(|_| EntityStatus::Deprecated)
            });
        let result = compiler.compile(vec![doc]).unwrap();
        assert_eq!(
            result.documents[0].entities[0].status,
            Some(EntityStatus::Deprecated)
        );
    }

    #[test]
    fn test_invalid_input_is_rejected_before_processing() {
        let docs = vec![Document::new("", "a.b")];
        assert!(matches!(
            XrefCompiler::simple().unwrap().compile(docs),
            Err(XrefError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_disabled_expansion_and_markdown() {
        let doc = Document::new("a.b.Box", "a.b")
            .with_entity(Entity::new("a.b.Box", "Box", "Box").with_summary("[self](Box)"))
            .with_reference(Reference::new("java.util.List<a.b.Item>", "List<Item>"));
        let compiler = XrefCompiler::new(ResolverConfig {
            normalize_markdown_links: false,
            expand_generics: false,
            ..Default::default()
        })
        .unwrap();
        let result = compiler.compile(vec![doc]).unwrap();
        assert_eq!(
            result.documents[0].entities[0].summary.as_deref(),
            Some("[self](Box)")
        );
        assert_eq!(result.documents[0].references.len(), 1);
        assert!(result.documents[0].references[0].parts.is_empty());
    }
}
