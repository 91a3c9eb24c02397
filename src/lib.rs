//! # docxref
//!
//! A cross-reference resolution engine for generated API documentation bundles.
//!
//! ## Overview
//!
//! Documentation bodies extracted from source code carry informal links to other symbols:
//! `ClassName#method(Type)`, `#method()`, `Class.Method`, plain type names. docxref maps each of
//! them to the single canonical identifier (`uid`) of the symbol it denotes, despite name
//! collisions across packages, generics, overloads and abbreviated forms.
//!
//! ### Key Features
//!
//! - **Alias normalization**: every symbol is reachable through a family of textual variants
//!   (with or without packages, parameter names, generic arguments, comma spacing)
//! - **Document locality**: symbols of the document being rewritten win over same-named
//!   symbols elsewhere
//! - **Owner shorthand**: `#member` links resolve against the document's owning type
//! - **Exact, then fuzzy**: full matches first, then `Class#member` by resolving the class alone
//! - **Generic expansion**: `List<a.b.Item>` makes both `List` and `Item` linkable
//! - **Error tolerance**: unresolved links degrade to flagged tags and diagnostics, never errors
//!
//! ## Architecture
//!
//! - **[`alias`]**: Alias Normalizer
//! - **[`index`]**: Symbol Index (global + per-document local tables) and Resolution Context
//! - **[`codec`]**: link classification, link-tag rewriting, markdown links, generic expansion
//! - **[`compiler`]**: the full per-run pipeline (`XrefCompiler`)
//! - **[`model`]**: documents, entities and references
//! - **[`bundle`]**: YAML/JSON bundle I/O used by the CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use docxref::{
//!     compiler::XrefCompiler,
//!     model::{Document, Entity},
//! };
//!
//! # fn main() -> Result<(), docxref::XrefError> {
//! let docs = vec![Document::new("a.b.c.SomeClass", "a.b.c")
//!     .with_entity(Entity::new("a.b.c.SomeClass", "SomeClass", "SomeClass"))
//!     .with_entity(
//!         Entity::new(
//!             "a.b.c.SomeClass.someMethod()",
//!             "someMethod()",
//!             "SomeClass.someMethod()",
//!         )
//!         .with_summary(r##"See <link uid="#someMethod()">it</link>."##),
//!     )];
//!
//! let result = XrefCompiler::simple()?.compile(docs)?;
//! assert_eq!(
//!     result.documents[0].entities[1].summary.as_deref(),
//!     Some(r#"See <link uid="a.b.c.SomeClass.someMethod()">it</link>."#)
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Working with Diagnostics
//!
//! Links that cannot be resolved keep their label, get an empty `uid` plus
//! `data-throw-if-not-resolved="false"`, and are reported:
//!
//! ```rust
//! # use docxref::{compiler::XrefCompiler, model::{Document, Entity}};
//! # fn main() -> Result<(), docxref::XrefError> {
//! # let docs = vec![Document::new("a.Foo", "a")
//! #     .with_entity(Entity::new("a.Foo", "Foo", "Foo").with_summary(r#"<link uid="Nope">x</link>"#))];
//! let result = XrefCompiler::simple()?.compile(docs)?;
//! for diagnostic in result.unresolved() {
//!     println!("{}: unresolved '{}'", diagnostic.document(), diagnostic.payload());
//! }
//! # assert_eq!(result.stats.links_unresolved, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **default**: the library
//! - **bin**: the `docxref` CLI (`docxref resolve <bundle>`)
//! - **parallel**: builds per-document alias tables on the `rayon` thread pool
//!
//! ## Module Guide
//!
//! Start with [`compiler::XrefCompiler`] for whole bundles. For a single lookup, build a
//! [`index::SymbolIndex`], take a [`index::ResolutionContext`] for a document and call
//! [`codec::resolve_link`].

pub mod alias;
pub mod bundle;
pub mod codec;
pub mod compiler;
pub mod config;
pub mod error;
pub mod index;
pub mod model;

pub use error::*;
