use serde::{Deserialize, Serialize};

/// Message body text with inline formatting spans, the in-memory side of the
/// HTML serialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    pub spans: Vec<Span>,
}

/// Byte offsets into `StyledText::text`, lying on char boundaries. Spans may
/// overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    Bold,
    Italic,
    Link { href: String },
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        StyledText {
            text: text.into(),
            spans: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.spans.is_empty()
    }
}

mod from_html_impl;
mod to_html_impl;

/// Parses an HTML message body into styled text. Best effort: unsupported
/// tags are stripped and malformed input degrades to plain text with no
/// spans, it never fails.
pub fn from_html(content: &str) -> StyledText {
    from_html_impl::from_html(content)
}

/// Renders styled text as its canonical HTML form. Spans that do not fit the
/// text (out of bounds, empty, not on char boundaries) are dropped silently.
pub fn to_html(text: &StyledText) -> String {
    to_html_impl::to_html(text)
}

/// Serde adapter persisting a `StyledText` field as a plain HTML string,
/// for use with `#[serde(with = "richtext::html")]`. A null or missing
/// string decodes to an empty value rather than an error.
pub mod html {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::StyledText;

    pub fn serialize<S>(text: &StyledText, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_html(text))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<StyledText, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(super::from_html(raw.as_deref().unwrap_or("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, kind: SpanKind) -> Span {
        Span { start, end, kind }
    }

    fn link(href: &str) -> SpanKind {
        SpanKind::Link {
            href: href.to_string(),
        }
    }

    #[test]
    fn decode_empty_input_yields_empty_text() {
        assert_eq!(from_html(""), StyledText::default());
    }

    #[test]
    fn decode_plain_text_has_no_spans() {
        let text = from_html("just words");
        assert_eq!(text.text, "just words");
        assert!(text.spans.is_empty());
    }

    #[test]
    fn decode_link_records_offsets_and_href() {
        let text = from_html(r#"hi <a href="https://example.com/a">there</a>"#);
        assert_eq!(text.text, "hi there");
        assert_eq!(text.spans, vec![span(3, 8, link("https://example.com/a"))]);
    }

    #[test]
    fn decode_strong_and_em_map_to_bold_and_italic() {
        let text = from_html("<strong>loud</strong> and <em>slanted</em>");
        assert_eq!(text.text, "loud and slanted");
        assert_eq!(
            text.spans,
            vec![span(0, 4, SpanKind::Bold), span(9, 16, SpanKind::Italic)]
        );
    }

    #[test]
    fn decode_strips_unsupported_tags() {
        let text = from_html(r#"<p><span class="x">a</span> <u>b</u></p>"#);
        assert_eq!(text.text, "a b");
        assert!(text.spans.is_empty());
    }

    #[test]
    fn decode_br_becomes_newline() {
        let text = from_html("a<br>b<br/>c");
        assert_eq!(text.text, "a\nb\nc");
    }

    #[test]
    fn decode_resolves_entities() {
        let text = from_html("fish &amp; chips &lt;3");
        assert_eq!(text.text, "fish & chips <3");
    }

    #[test]
    fn decode_anchor_without_href_is_plain() {
        let text = from_html("<a>bare</a>");
        assert_eq!(text.text, "bare");
        assert!(text.spans.is_empty());
    }

    #[test]
    fn decode_unclosed_tags_never_fails() {
        let text = from_html("<b><i>broken");
        assert_eq!(text.text, "broken");
        assert_eq!(
            text.spans,
            vec![span(0, 6, SpanKind::Bold), span(0, 6, SpanKind::Italic)]
        );
    }

    #[test]
    fn decode_stray_end_tags_never_fails() {
        let text = from_html("</b>fine</a>");
        assert_eq!(text.text, "fine");
        assert!(text.spans.is_empty());
    }

    #[test]
    fn encode_plain_text_has_no_markup() {
        let html = to_html(&StyledText::plain("hello there"));
        assert_eq!(html, "hello there");
    }

    #[test]
    fn encode_escapes_text_and_newlines() {
        let html = to_html(&StyledText::plain("a < b & c\nd"));
        assert_eq!(html, "a &lt; b &amp; c<br>d");
    }

    #[test]
    fn encode_renders_supported_kinds() {
        let text = StyledText {
            text: "bold italic linked".to_string(),
            spans: vec![
                span(0, 4, SpanKind::Bold),
                span(5, 11, SpanKind::Italic),
                span(12, 18, link("https://example.com/?a=1&b=2")),
            ],
        };
        assert_eq!(
            to_html(&text),
            r#"<b>bold</b> <i>italic</i> <a href="https://example.com/?a=1&amp;b=2">linked</a>"#
        );
    }

    #[test]
    fn encode_drops_spans_that_do_not_fit() {
        let text = StyledText {
            text: "short".to_string(),
            spans: vec![
                span(0, 50, SpanKind::Bold),
                span(3, 3, SpanKind::Italic),
                span(2, 1, SpanKind::Bold),
            ],
        };
        assert_eq!(to_html(&text), "short");
    }

    #[test]
    fn round_trip_preserves_span_boundaries() {
        let text = StyledText {
            text: "aaa bbb ccc".to_string(),
            spans: vec![
                span(0, 3, SpanKind::Bold),
                span(4, 7, SpanKind::Italic),
                span(8, 11, link("https://example.com/")),
            ],
        };
        assert_eq!(from_html(&to_html(&text)), text);
    }

    #[test]
    fn round_trip_preserves_overlapping_spans() {
        // Encoding has to split the italic span to nest tags, decoding
        // reassembles it.
        let text = StyledText {
            text: "abcdefghi".to_string(),
            spans: vec![span(0, 5, SpanKind::Bold), span(3, 9, SpanKind::Italic)],
        };
        assert_eq!(to_html(&text), "<b>abc<i>de</i></b><i>fghi</i>");
        assert_eq!(from_html(&to_html(&text)), text);
    }

    #[test]
    fn round_trip_preserves_multibyte_text() {
        let text = StyledText {
            text: "héllo wörld".to_string(),
            spans: vec![span(0, 6, SpanKind::Bold)],
        };
        assert_eq!(from_html(&to_html(&text)), text);
    }
}
