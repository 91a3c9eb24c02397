//! Markdown link normalization.
//!
//! Documentation bodies written in markdown carry links as `[LABEL](PAYLOAD)`. Before
//! resolution these are turned into link tags so the tag rewriter sees a single form. Only
//! payloads that parse as a [LinkSpec] are converted; URLs, relative paths and anything else
//! stay as written. Javadoc bodies mix markdown with raw HTML blocks, so links are matched
//! textually rather than through a CommonMark parser, which would skip HTML blocks.
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{link::LinkSpec, rewrite::LinkRewriter};

static MD_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<bang>!?)\[(?P<label>[^\[\]]*)\]\((?P<payload>[^()\s]+(?:\s*\([^()]*\))?)\)")
        .expect("markdown link regex is valid")
});

/// Convert markdown links with symbol payloads into link tags. Returns the new text and the
/// number of links converted.
pub fn normalize_markdown_links(text: &str, rewriter: &LinkRewriter) -> (String, usize) {
    let mut converted = 0;
    let out = MD_LINK.replace_all(text, |caps: &Captures<'_>| {
        let payload = caps["payload"].trim();
        if !caps["bang"].is_empty() || LinkSpec::parse(payload).is_none() {
            return caps[0].to_string();
        }
        converted += 1;
        // The payload is carried as the tag's target until the rewriter resolves it.
        rewriter.tag(payload, &caps["label"])
    });
    (out.into_owned(), converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use test_log::test;

    fn rewriter() -> LinkRewriter {
        LinkRewriter::new(&ResolverConfig::default()).unwrap()
    }

    #[test]
    fn test_symbol_links_become_tags() {
        let (text, count) = normalize_markdown_links(
            "See [the list](java.util.List) and [put](#put(String key, int value)).",
            &rewriter(),
        );
        assert_eq!(
            text,
            r##"See <link uid="java.util.List">the list</link> and <link uid="#put(String key, int value)">put</link>."##
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_urls_and_images_are_untouched() {
        let source = "Go to [docs](https://example.com/docs) ![logo](logo.png) [rel](../a/b.md)";
        let (text, count) = normalize_markdown_links(source, &rewriter());
        assert_eq!(text, source);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_links_inside_html_blocks() {
        let (text, count) =
            normalize_markdown_links("<p>\nUse [Foo](Foo#bar()) here.\n</p>", &rewriter());
        assert_eq!(text, "<p>\nUse <link uid=\"Foo#bar()\">Foo</link> here.\n</p>");
        assert_eq!(count, 1);
    }
}
