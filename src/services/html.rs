use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[a-zA-Z0-9#]+;").expect("entity pattern is valid"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// Order matters: `&amp;` goes before `&lt;`/`&gt;` so double-encoded markup
// becomes real markup and is stripped in the same pass.
const KNOWN_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&#x27;", "'"),
    ("&#x2F;", "/"),
    ("&hellip;", "..."),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
];

/// Reduce an HTML fragment to a single line of plain text.
///
/// Known entities are decoded, tags stripped, leftover entities blanked, and
/// whitespace collapsed. Decoding can surface new markup (`&lt;b&gt;`), so the
/// first three steps repeat until the text stops changing; every step that
/// changes the text shortens it, so the loop terminates. The result is a fixed
/// point: sanitizing it again returns it unchanged.
pub fn sanitize_html(html: &str) -> String {
    let mut text = html.to_string();

    loop {
        let mut next = text.clone();
        for (entity, replacement) in KNOWN_ENTITIES {
            next = next.replace(entity, replacement);
        }
        let next = TAG_RE.replace_all(&next, "");
        let next = ENTITY_RE.replace_all(&next, " ").into_owned();

        if next == text {
            break;
        }
        text = next;
    }

    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_decodes_entities() {
        let html = "<p>Build&nbsp;APIs &amp; services</p>\n<ul><li>Rust</li> <li>Go&hellip;</li></ul>";
        assert_eq!(sanitize_html(html), "Build APIs & services Rust Go...");
    }

    #[test]
    fn test_decoded_markup_is_stripped() {
        assert_eq!(sanitize_html("&lt;b&gt;bold&lt;/b&gt; text"), "bold text");
        assert_eq!(sanitize_html("&amp;lt;script&amp;gt;x"), "x");
    }

    #[test]
    fn test_unknown_entities_become_spaces() {
        assert_eq!(sanitize_html("caf&eacute;&#8217;s menu"), "caf s menu");
    }

    #[test]
    fn test_collapses_whitespace_and_blank_lines() {
        let html = "  Line one\n\n\n   Line two\t\tend  ";
        assert_eq!(sanitize_html(html), "Line one Line two end");
    }

    #[test]
    fn test_typographic_entities() {
        assert_eq!(
            sanitize_html("2020&ndash;2024 &mdash; &quot;great&quot; &#39;team&#x27;"),
            "2020\u{2013}2024 \u{2014} \"great\" 'team'"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_html(""), "");
        assert_eq!(sanitize_html("<div></div>"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            "<h1>Senior Engineer</h1>\n<p>We&#39;re hiring &amp; growing&hellip;</p>",
            "&amp;lt;i&amp;gt;nested&amp;lt;/i&amp;gt; &amp;amp;",
            "a &lt; b and c &gt; d",
            "plain text with & ampersand and 5 < 6",
            "&amp;nbsp;&amp;nbsp;spaced",
        ];

        for sample in samples {
            let once = sanitize_html(sample);
            assert_eq!(sanitize_html(&once), once, "not idempotent for {:?}", sample);
            assert!(!TAG_RE.is_match(&once), "tag left in {:?}", once);
            assert!(!ENTITY_RE.is_match(&once), "entity left in {:?}", once);
        }
    }
}
