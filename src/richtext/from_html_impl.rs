use html5ever::tendril::SliceExt;
use html5ever::tokenizer::{BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer};

use crate::richtext::{Span, SpanKind, StyledText};

struct Html2StyledTextSink {
    text: String,
    spans: Vec<Span>,
    open: Vec<OpenSpan>,
}

struct OpenSpan {
    kind: SpanKind,
    start: usize,
}

impl Html2StyledTextSink {
    fn open_span(&mut self, kind: SpanKind) {
        self.open.push(OpenSpan {
            kind,
            start: self.text.len(),
        });
    }

    fn process_start_link(&mut self, tag: &Tag) {
        if self
            .open
            .iter()
            .any(|open| matches!(open.kind, SpanKind::Link { .. }))
        {
            // Nested links make no sense, keep the outer one.
            return;
        }

        let href = tag
            .attrs
            .iter()
            .find(|attr| attr.name.local.to_string().as_str() == "href");
        match href {
            None => {
                // do nothing
            }
            Some(attr) => {
                self.open_span(SpanKind::Link {
                    href: attr.value.to_string(),
                });
            }
        }
    }

    fn process_start_tag(&mut self, tag: &Tag) {
        match tag.name.to_string().as_str() {
            "br" => {
                self.text.push('\n');
            }
            "b" | "strong" => {
                self.open_span(SpanKind::Bold);
            }
            "i" | "em" => {
                self.open_span(SpanKind::Italic);
            }
            "a" => {
                self.process_start_link(tag);
            }
            _ => {
                // do nothing
            }
        }
    }

    fn process_end_tag(&mut self, tag: &Tag) {
        match tag.name.to_string().as_str() {
            "b" | "strong" => {
                self.close_span(|kind| matches!(kind, SpanKind::Bold));
            }
            "i" | "em" => {
                self.close_span(|kind| matches!(kind, SpanKind::Italic));
            }
            "a" => {
                self.close_span(|kind| matches!(kind, SpanKind::Link { .. }));
            }
            _ => {
                // do nothing
            }
        }
    }

    fn close_span(&mut self, matches_kind: impl Fn(&SpanKind) -> bool) {
        // Stray end tags with no matching open span are ignored.
        if let Some(idx) = self.open.iter().rposition(|open| matches_kind(&open.kind)) {
            let open = self.open.remove(idx);
            self.emit(open);
        }
    }

    fn emit(&mut self, open: OpenSpan) {
        let end = self.text.len();
        if open.start < end {
            self.spans.push(Span {
                start: open.start,
                end,
                kind: open.kind,
            });
        }
    }

    fn into_styled_text(&mut self) -> StyledText {
        let mut spans = std::mem::take(&mut self.spans);
        spans.sort_by_key(|span| (span.start, span.end));
        StyledText {
            text: std::mem::take(&mut self.text),
            spans: merge_abutting(spans),
        }
    }
}

/// Two spans of identical kind that touch or overlap are canonically one
/// span. This also reassembles spans the encoder split for tag nesting.
fn merge_abutting(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(prev) = merged.iter_mut().rev().find(|prev| prev.kind == span.kind) {
            if span.start <= prev.end {
                prev.end = prev.end.max(span.end);
                continue;
            }
        }
        merged.push(span);
    }
    merged.sort_by_key(|span| (span.start, span.end));
    merged
}

impl TokenSink for Html2StyledTextSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<Self::Handle> {
        match token {
            Token::CharacterTokens(bs) => {
                self.text.push_str(&bs);
            }
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    self.process_start_tag(&tag);
                    if tag.self_closing {
                        self.process_end_tag(&tag);
                    }
                }
                TagKind::EndTag => {
                    self.process_end_tag(&tag);
                }
            },
            Token::EOFToken => {
                // Unclosed spans run to the end of the text.
                for open in std::mem::take(&mut self.open) {
                    self.emit(open);
                }
            }
            Token::NullCharacterToken
            | Token::DoctypeToken(_)
            | Token::CommentToken(_)
            | Token::ParseError(_) => {
                // Best effort: parse errors degrade to whatever text was
                // recovered, they are never surfaced.
            }
        }
        TokenSinkResult::Continue
    }
}

pub fn from_html(content: &str) -> StyledText {
    let mut tokenizer = Tokenizer::new(
        Html2StyledTextSink {
            text: String::new(),
            spans: vec![],
            open: vec![],
        },
        Default::default(),
    );

    let mut queue = BufferQueue::new();
    queue.push_back(content.to_tendril());

    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();

    tokenizer.sink.into_styled_text()
}
