//! Link extraction, classification and rewriting for documentation text.
//!
//! ## Key Components
//!
//! - [`LinkSpec`] - the three link shapes (`#member`, `Class#member`, plain identifier)
//! - [`resolve_link`] - maps one raw payload to a canonical identifier through a
//!   [`ResolutionContext`](crate::index::ResolutionContext)
//! - [`LinkRewriter`] - rewrites every `<link uid="...">label</link>` tag in a text body
//! - [`md::normalize_markdown_links`] - turns `[label](payload)` into link tags first
//! - [`generics`] - decomposes compound generic identifiers into linkable references
//! - [`ResolveDiagnostic`] - records links that stayed unresolved or were malformed
//!
//! ## Resolution Order
//!
//! For one payload, in order:
//!
//! 1. `#member` payloads are completed with the document's owner identifier
//! 2. exact lookup of the package-qualified form (`#` replaced by `.`)
//! 3. exact lookup of the unqualified form
//! 4. fuzzy lookup: resolve the class half, append the member (and `*` if the member had a
//!    parameter list)
//!
//! Anything else yields an empty identifier, rendered with the configured "unresolved"
//! attribute so downstream rendering does not fail on the missing target.

pub mod diagnostic;
pub mod generics;
pub mod link;
pub mod md;
pub mod rewrite;

pub use diagnostic::ResolveDiagnostic;
pub use link::{resolve_link, LinkSpec};
pub use rewrite::{LinkRewriter, Rewrite};
