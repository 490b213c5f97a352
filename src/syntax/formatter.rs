//! Line formatter
//!
//! `format_line` turns one line into spans by running every rule of a
//! table over it. Rules run in table order and their spans are reported in
//! that order; when spans overlap, the one produced later wins, which is
//! what `resolve` computes for display.

use super::rules::Rule;
use super::style::{Span, Style};
use super::tokens::TokenType;

/// Compute the spans of one line, in application order.
///
/// For each rule the search restarts at the end of the previous match, so
/// matches of one rule never overlap each other. A zero-length match emits
/// nothing and the search resumes one character further on, so each rule
/// performs at most `chars + 1` searches.
pub fn format_line(line: &str, rules: &[Rule]) -> Vec<Span> {
    let mut spans = Vec::new();

    for rule in rules {
        let mut pos = 0;
        while let Some(m) = rule.find_at(line, pos) {
            if m.end() > m.start() {
                spans.push(Span::new(m.start(), m.end() - m.start(), rule.token(), rule.style()));
                pos = m.end();
            } else {
                match line[m.start()..].chars().next() {
                    Some(ch) => pos = m.start() + ch.len_utf8(),
                    None => break,
                }
            }
        }
    }

    spans
}

/// Flatten spans into non-overlapping runs, sorted by offset.
///
/// Spans are painted in order onto a per-byte map, so a later span replaces
/// whatever an earlier one set on the bytes they share. Adjacent bytes with
/// the same token and style form one run. Spans reaching past `line_len` are
/// clipped.
pub fn resolve(line_len: usize, spans: &[Span]) -> Vec<Span> {
    if line_len == 0 || spans.is_empty() {
        return Vec::new();
    }

    let mut painted: Vec<Option<(TokenType, Style)>> = vec![None; line_len];
    for span in spans {
        let end = span.end().min(line_len);
        for slot in painted.iter_mut().take(end).skip(span.start) {
            *slot = Some((span.token, span.style));
        }
    }

    let mut runs: Vec<Span> = Vec::new();
    for (pos, slot) in painted.into_iter().enumerate() {
        let Some((token, style)) = slot else {
            continue;
        };
        match runs.last_mut() {
            Some(run) if run.end() == pos && run.token == token && run.style == style => {
                run.length += 1;
            }
            _ => runs.push(Span::new(pos, 1, token, style)),
        }
    }

    runs
}
