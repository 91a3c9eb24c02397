//! Index module: alias tables for cross-reference resolution.
//!
//! # Module Organization
//!
//! - `base`: [`SymbolIndex`], the global alias table plus one [`LocalTable`] per document
//! - `context`: [`ResolutionContext`], the local-first view of the index bound to one document
//!
//! # Public API
//!
//! ```rust
//! use docxref::index::{ResolutionContext, SymbolIndex};
//! use docxref::model::{Document, Entity};
//!
//! let docs = vec![Document::new("a.b.Foo", "a.b")
//!     .with_entity(Entity::new("a.b.Foo", "Foo", "Foo"))];
//! let index = SymbolIndex::build(&docs);
//! let ctx: ResolutionContext<'_> = index.context("a.b.Foo");
//! assert_eq!(ctx.resolve("Foo"), Some("a.b.Foo"));
//! assert_eq!(ctx.owner_identifier(), Some("Foo"));
//! ```

mod base;
mod context;


pub use base::{LocalTable, SymbolIndex};
pub use context::ResolutionContext;
