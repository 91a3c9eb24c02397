//! Batch rewriting of link tags inside a text body.
use regex::{escape as re_escape, Captures, Regex};

use crate::{
    codec::{
        diagnostic::ResolveDiagnostic,
        link::{resolve_link, LinkSpec},
    },
    config::ResolverConfig,
    error::XrefError,
    index::ResolutionContext,
};

/// Result of rewriting one text body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub changed: bool,
    pub resolved: usize,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

/// Finds `<TAG uid="PAYLOAD" ...>LABEL</TAG>` occurrences and replaces each payload with the
/// identifier it resolves to. Labels and any other attributes are left as they are.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    tag_re: Regex,
    flag_re: Regex,
    tag_name: String,
    unresolved_attribute: String,
}

impl LinkRewriter {
    pub fn new(config: &ResolverConfig) -> Result<Self, XrefError> {
        let tag_name = re_escape(&config.tag_name);
        let tag_re = Regex::new(&format!(
            r#"(?s)<{tag_name}\s+uid="(?P<uid>[^"]*)"(?P<attrs>[^>]*)>(?P<label>.*?)</{tag_name}>"#
        ))?;
        let flag_re = Regex::new(&format!(
            r#"\s+{}="[^"]*""#,
            re_escape(&config.unresolved_attribute)
        ))?;
        Ok(LinkRewriter {
            tag_re,
            flag_re,
            tag_name: config.tag_name.clone(),
            unresolved_attribute: config.unresolved_attribute.clone(),
        })
    }

    /// A tag carrying `payload` as its target, before resolution.
    pub fn tag(&self, payload: &str, label: &str) -> String {
        format!(
            "<{tag} uid=\"{payload}\">{label}</{tag}>",
            tag = self.tag_name
        )
    }

    /// Render a resolved tag the way [LinkRewriter::rewrite] emits it.
    pub fn render(&self, uid: &str, label: &str) -> String {
        if !uid.is_empty() {
            return self.tag(uid, label);
        }
        format!(
            "<{tag} uid=\"\" {flag}=\"false\">{label}</{tag}>",
            tag = self.tag_name,
            flag = self.unresolved_attribute
        )
    }

    #[tracing::instrument(skip_all, fields(document = ctx.document_id()))]
    pub fn rewrite(&self, text: &str, package: &str, ctx: &ResolutionContext<'_>) -> Rewrite {
        let mut resolved = 0;
        let mut diagnostics = Vec::new();
        let new_text = self.tag_re.replace_all(text, |caps: &Captures<'_>| {
            let payload = caps["uid"].trim();
            let attrs = self.flag_re.replace_all(&caps["attrs"], "");
            let flag = format!(" {}=\"false\"", self.unresolved_attribute);
            if !payload.is_empty() && LinkSpec::parse(payload).is_none() {
                // Raw payload is kept as written; the flag stops renderers from chasing it.
                tracing::info!("Malformed link payload '{payload}', keeping it unresolved");
                diagnostics.push(ResolveDiagnostic::malformed(ctx.document_id(), payload));
                return format!(
                    "<{tag} uid=\"{raw}\"{flag}{attrs}>{label}</{tag}>",
                    tag = self.tag_name,
                    raw = &caps["uid"],
                    label = &caps["label"],
                );
            }
            let uid = resolve_link(payload, package, ctx);
            let flag = if uid.is_empty() {
                diagnostics.push(ResolveDiagnostic::unresolved(ctx.document_id(), payload));
                flag
            } else {
                resolved += 1;
                String::new()
            };
            format!(
                "<{tag} uid=\"{uid}\"{flag}{attrs}>{label}</{tag}>",
                tag = self.tag_name,
                label = &caps["label"],
            )
        });
        let changed = new_text != text;
        Rewrite {
            text: new_text.into_owned(),
            changed,
            resolved,
            diagnostics,
        }
    }
}
