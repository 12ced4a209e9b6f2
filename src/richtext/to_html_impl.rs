use crate::richtext::{Span, SpanKind, StyledText};

pub fn to_html(text: &StyledText) -> String {
    let mut spans: Vec<&Span> = text
        .spans
        .iter()
        .filter(|span| fits(span, &text.text))
        .collect();
    // Open order at the same position: widest span first, so it nests
    // outermost.
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.text.len());
    let mut stack: Vec<&Span> = vec![];
    let mut next = 0;
    let mut pos = 0;

    loop {
        // Close every span ending here. A span below the top of the stack is
        // closed by closing the tags above it first and reopening them after;
        // the decoder merges the pieces back together.
        while stack.iter().any(|span| span.end == pos) {
            let mut reopen = vec![];
            while let Some(top) = stack.pop() {
                push_close(&mut out, &top.kind);
                if top.end == pos {
                    break;
                }
                reopen.push(top);
            }
            while let Some(span) = reopen.pop() {
                push_open(&mut out, &span.kind);
                stack.push(span);
            }
        }

        while next < spans.len() && spans[next].start == pos {
            push_open(&mut out, &spans[next].kind);
            stack.push(spans[next]);
            next += 1;
        }

        if pos >= text.text.len() {
            break;
        }

        let mut stop = text.text.len();
        if next < spans.len() {
            stop = stop.min(spans[next].start);
        }
        for span in &stack {
            stop = stop.min(span.end);
        }
        push_text(&mut out, &text.text[pos..stop]);
        pos = stop;
    }

    out
}

fn fits(span: &Span, text: &str) -> bool {
    span.start < span.end
        && span.end <= text.len()
        && text.is_char_boundary(span.start)
        && text.is_char_boundary(span.end)
}

fn push_open(out: &mut String, kind: &SpanKind) {
    match kind {
        SpanKind::Bold => out.push_str("<b>"),
        SpanKind::Italic => out.push_str("<i>"),
        SpanKind::Link { href } => {
            out.push_str("<a href=\"");
            push_attr(out, href);
            out.push_str("\">");
        }
    }
}

fn push_close(out: &mut String, kind: &SpanKind) {
    match kind {
        SpanKind::Bold => out.push_str("</b>"),
        SpanKind::Italic => out.push_str("</i>"),
        SpanKind::Link { .. } => out.push_str("</a>"),
    }
}

fn push_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
}

fn push_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
