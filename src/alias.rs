//! [crate::alias] holds the pure string transforms that produce the equivalent spellings of a
//! canonical identifier, and [AliasForm], the fixed list of compositions the
//! [crate::index::SymbolIndex] registers for every entity.
//!
//! All transforms only touch the part of an identifier they are about: package stripping
//! looks at the path before the parameter list, parameter transforms look inside the first
//! top-level `( ... )`.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Entity;

static COMMA_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("comma spacing regex is valid"));

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}_$][\w$]*(?:\.[\p{L}_$][\w$]*)*")
        .expect("qualified name regex is valid")
});

/// Splits `head(params)tail` at the first `(` and its matching `)`.
fn split_signature(s: &str) -> (&str, Option<&str>, &str) {
    let Some(open) = s.find('(') else {
        return (s, None, "");
    };
    let mut depth = 0usize;
    for (idx, c) in s[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + idx;
                    return (&s[..open], Some(&s[open + 1..close]), &s[close + 1..]);
                }
            }
            _ => {}
        }
    }
    // Unbalanced, treat everything after '(' as the parameter list.
    (&s[..open], Some(&s[open + 1..]), "")
}

fn join_signature(head: &str, params: Option<&str>, tail: &str) -> String {
    match params {
        Some(params) => format!("{head}({params}){tail}"),
        None => format!("{head}{tail}"),
    }
}

/// Splits a parameter list on the commas that are not nested inside `<...>`.
pub fn split_top_level(params: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (idx, c) in params.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth <= 0 => {
                out.push(&params[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    out.push(&params[start..]);
    out
}

/// Remove every `<...>` segment, nested ones included.
pub fn strip_generics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Drop the package prefix: everything up to the first path segment that starts with an
/// uppercase letter. Identifiers without such a segment are returned unchanged.
pub fn strip_package(s: &str) -> String {
    let (head, params, tail) = split_signature(s);
    // Generic arguments of the head keep their own qualifiers.
    let path_end = head.find('<').unwrap_or(head.len());
    let path = &head[..path_end];
    let mut offset = 0;
    for segment in path.split('.') {
        if segment.chars().next().is_some_and(|c| c.is_uppercase()) {
            return join_signature(&head[offset..], params, tail);
        }
        offset += segment.len() + 1;
    }
    s.to_string()
}

/// Remove package qualifiers from every type named inside the parameter list.
pub fn strip_param_packages(s: &str) -> String {
    let (head, params, tail) = split_signature(s);
    let Some(params) = params else {
        return s.to_string();
    };
    let stripped = QUALIFIED_NAME.replace_all(params, |caps: &regex::Captures<'_>| {
        strip_package(&caps[0])
    });
    join_signature(head, Some(&stripped), tail)
}

/// Keep only the type of each parameter, dropping a trailing parameter name.
pub fn strip_param_names(s: &str) -> String {
    let (head, params, tail) = split_signature(s);
    let Some(params) = params else {
        return s.to_string();
    };
    if params.trim().is_empty() {
        return join_signature(head, Some(""), tail);
    }
    let types = split_top_level(params)
        .into_iter()
        .map(|param| {
            let param = param.trim();
            let mut depth = 0i32;
            let mut last_space = None;
            for (idx, c) in param.char_indices() {
                match c {
                    '<' => depth += 1,
                    '>' => depth -= 1,
                    c if c.is_whitespace() && depth == 0 => last_space = Some(idx),
                    _ => {}
                }
            }
            match last_space {
                Some(idx) => param[..idx].trim_end(),
                None => param,
            }
        })
        .collect::<Vec<&str>>()
        .join(", ");
    join_signature(head, Some(&types), tail)
}

/// `a,b` and `a , b` both become `a, b`.
pub fn comma_spaced(s: &str) -> String {
    COMMA_SPACING.replace_all(s, ", ").into_owned()
}

/// `a, b` becomes `a,b`.
pub fn comma_tight(s: &str) -> String {
    COMMA_SPACING.replace_all(s, ",").into_owned()
}

/// The alias shapes registered for every entity, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasForm {
    /// Name-with-type, generics stripped. The owner entity's value of this form is the
    /// document's owner identifier.
    NameWithType,
    Uid,
    Href,
    UidWithoutParamPackages,
    UidWithoutPackage,
    NameWithTypeWithoutParamNames,
    RawNameWithTypeWithoutParamNames,
    SpacedUid,
    SpacedUidWithoutParamPackages,
    SpacedUidWithoutPackage,
    TightNameWithTypeWithoutParamNames,
}

impl AliasForm {
    pub const ALL: [AliasForm; 11] = [
        AliasForm::NameWithType,
        AliasForm::Uid,
        AliasForm::Href,
        AliasForm::UidWithoutParamPackages,
        AliasForm::UidWithoutPackage,
        AliasForm::NameWithTypeWithoutParamNames,
        AliasForm::RawNameWithTypeWithoutParamNames,
        AliasForm::SpacedUid,
        AliasForm::SpacedUidWithoutParamPackages,
        AliasForm::SpacedUidWithoutPackage,
        AliasForm::TightNameWithTypeWithoutParamNames,
    ];

    /// The alias of `entity` under this form, or None when the source field is empty.
    pub fn apply(&self, entity: &Entity) -> Option<String> {
        let uid = entity.uid.as_str();
        let nwt = entity.name_with_type.as_str();
        let alias = match self {
            AliasForm::NameWithType => strip_generics(nwt),
            AliasForm::Uid => uid.to_string(),
            AliasForm::Href => entity.href.clone().unwrap_or_default(),
            AliasForm::UidWithoutParamPackages => strip_param_packages(uid),
            AliasForm::UidWithoutPackage => strip_package(uid),
            AliasForm::NameWithTypeWithoutParamNames => strip_param_names(&strip_generics(nwt)),
            AliasForm::RawNameWithTypeWithoutParamNames => strip_param_names(nwt),
            AliasForm::SpacedUid => comma_spaced(uid),
            AliasForm::SpacedUidWithoutParamPackages => comma_spaced(&strip_param_packages(uid)),
            AliasForm::SpacedUidWithoutPackage => comma_spaced(&strip_package(uid)),
            AliasForm::TightNameWithTypeWithoutParamNames => {
                comma_tight(&strip_param_names(&strip_generics(nwt)))
            }
        };
        let alias = alias.trim();
        (!alias.is_empty()).then(|| alias.to_string())
    }
}

/// All aliases of `entity` in [AliasForm::ALL] order, empty forms skipped. Duplicates are
/// kept; the index treats a repeated key as a no-op rewrite.
pub fn entity_aliases(entity: &Entity) -> Vec<(AliasForm, String)> {
    AliasForm::ALL
        .iter()
        .filter_map(|form| form.apply(entity).map(|alias| (*form, alias)))
        .collect()
}
