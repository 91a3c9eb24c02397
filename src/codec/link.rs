//! Link payload classification and single-link resolution.
//!
//! A payload is the raw target text of a documentation link: `#member(params)`,
//! `Class#member(params)`, or a plain (possibly dotted, possibly parameterized) identifier.
//! [resolve_link] maps one payload to a canonical identifier through a
//! [ResolutionContext]; everything that fails resolves to an empty string.
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use crate::{alias::strip_generics, index::ResolutionContext};

/// One path segment, optionally carrying generic arguments: `Foo`, `Foo<T>`, `Map<K, V>`.
const SEGMENT: &str = r"[\p{L}_$][\w$]*(?:<[\w$.,\s<>?\[\]]*>)?";

static MEMBER_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?P<member>[\p{L}_$][\w$]*)\s*(?:\((?P<params>[^()]*)\))?$")
        .expect("member-only link regex is valid")
});

static QUALIFIED_MEMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<class>{SEGMENT}(?:\.{SEGMENT})*)#(?P<member>[\p{{L}}_$][\w$]*)\s*(?:\((?P<params>[^()]*)\))?$"
    ))
    .expect("qualified member link regex is valid")
});

static PLAIN_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<name>{SEGMENT}(?:\.{SEGMENT})*(?:\[\])*)\s*(?:\((?P<params>[^()]*)\))?(?P<wildcard>\*)?$"
    ))
    .expect("plain identifier link regex is valid")
});

/// The three link shapes a payload can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSpec {
    /// `#member` or `#member(params)`: a member of the document's owner.
    MemberOnly {
        member: String,
        params: Option<String>,
    },
    /// `Class#member` or `Class#member(params)`.
    QualifiedMember {
        class: String,
        member: String,
        params: Option<String>,
    },
    /// `a.b.Class`, `Class.method(params)`, `List<String>`, `a.b.Class.method*`.
    PlainIdentifier {
        name: String,
        params: Option<String>,
        wildcard: bool,
    },
}

impl LinkSpec {
    /// Classify a trimmed payload. None means the payload fits none of the link shapes.
    pub fn parse(payload: &str) -> Option<LinkSpec> {
        let payload = payload.trim();
        let params_of =
            |caps: &regex::Captures<'_>| caps.name("params").map(|m| m.as_str().trim().to_string());
        if let Some(caps) = MEMBER_ONLY.captures(payload) {
            return Some(LinkSpec::MemberOnly {
                member: caps["member"].to_string(),
                params: params_of(&caps),
            });
        }
        if let Some(caps) = QUALIFIED_MEMBER.captures(payload) {
            return Some(LinkSpec::QualifiedMember {
                class: caps["class"].to_string(),
                member: caps["member"].to_string(),
                params: params_of(&caps),
            });
        }
        PLAIN_IDENTIFIER.captures(payload).map(|caps| LinkSpec::PlainIdentifier {
            name: caps["name"].to_string(),
            params: params_of(&caps),
            wildcard: caps.name("wildcard").is_some(),
        })
    }

    pub fn has_params(&self) -> bool {
        match self {
            LinkSpec::MemberOnly { params, .. }
            | LinkSpec::QualifiedMember { params, .. }
            | LinkSpec::PlainIdentifier { params, .. } => params.is_some(),
        }
    }
}

/// Best-effort resolution from fragments: resolve the class half and append the member.
///
/// A member with a parameter list resolves to the `*` overload wildcard, since the exact
/// signature is unknown when only the class is indexed. Already-resolved `Class.member` and
/// `Class.member*` forms re-resolve through their class the same way, so resolved output
/// stays stable.
pub fn fuzzy_resolve(payload: &str, ctx: &ResolutionContext<'_>) -> Option<String> {
    match LinkSpec::parse(payload)? {
        LinkSpec::QualifiedMember {
            class,
            member,
            params,
        } => {
            let class_uid = resolve_class(&class, ctx)?;
            let wildcard = if params.is_some() { "*" } else { "" };
            Some(format!("{class_uid}.{member}{wildcard}"))
        }
        LinkSpec::PlainIdentifier {
            name,
            params: None,
            wildcard,
        } => {
            let (class, member) = name.rsplit_once('.')?;
            let class_uid = resolve_class(class, ctx)?;
            let wildcard = if wildcard { "*" } else { "" };
            Some(format!("{class_uid}.{member}{wildcard}"))
        }
        _ => None,
    }
}

/// `Foo<T>` falls back to `Foo` when the generic spelling is not indexed.
fn resolve_class<'a>(class: &str, ctx: &ResolutionContext<'a>) -> Option<&'a str> {
    ctx.resolve(class).or_else(|| {
        let plain = strip_generics(class);
        (plain != class).then(|| ctx.resolve(&plain)).flatten()
    })
}

/// Direct index lookup of a `#`-free payload, package-qualified first.
pub fn exact_resolve<'a>(
    dotted: &str,
    package: &str,
    ctx: &ResolutionContext<'a>,
) -> Option<&'a str> {
    let qualified: Cow<'_, str> = if package.is_empty() || dotted.starts_with(&format!("{package}."))
    {
        Cow::Borrowed(dotted)
    } else {
        Cow::Owned(format!("{package}.{dotted}"))
    };
    ctx.resolve(&qualified).or_else(|| ctx.resolve(dotted))
}

/// Resolve one raw link payload to a canonical identifier, or an empty string.
///
/// 1. `#member` payloads are prefixed with the document's owner identifier.
/// 2. The package-qualified exact form wins, then the unqualified exact form, then the
///    fuzzy class-plus-member form.
pub fn resolve_link(raw: &str, package: &str, ctx: &ResolutionContext<'_>) -> String {
    let payload = raw.trim();
    if payload.is_empty() {
        return String::new();
    }
    let payload: Cow<'_, str> = match (payload.starts_with('#'), ctx.owner_identifier()) {
        (true, Some(owner)) => Cow::Owned(format!("{owner}{payload}")),
        _ => Cow::Borrowed(payload),
    };
    let fuzzy = fuzzy_resolve(&payload, ctx);
    let dotted = payload.replace('#', ".");
    match exact_resolve(&dotted, package, ctx) {
        Some(uid) => uid.to_string(),
        None => fuzzy.unwrap_or_else(|| {
            tracing::debug!(
                "[resolve_link] '{raw}' unresolved in document '{}'",
                ctx.document_id()
            );
            String::new()
        }),
    }
}
