// steplog - core/format.rs
//
// Text layout for the progress log: the label gutter, hard wrapping,
// duration rendering and rule lines. Pure functions, no I/O.
//
// Wrapping counts Unicode scalar values (`char`), not bytes or graphemes.

use crate::util::constants;
use std::time::Duration;

/// Render the gutter for `label` at `width` columns.
///
/// The label is truncated to `width - 2` characters and framed by one
/// leading and one trailing space, then padded so the result is always
/// exactly `width` characters wide.
pub fn gutter(label: &str, width: usize) -> String {
    let inner = width.saturating_sub(2);
    let shown: String = label.chars().take(inner).collect();
    let pad = inner - shown.chars().count();
    let mut out = String::with_capacity(width + shown.len());
    out.push(' ');
    out.push_str(&shown);
    out.push(' ');
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Split `message` into consecutive chunks of at most `width` characters.
///
/// Splits blindly on character count, never on word boundaries. An empty
/// message yields no chunks.
pub fn wrap(message: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in message.char_indices() {
        if count == width {
            chunks.push(&message[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < message.len() {
        chunks.push(&message[start..]);
    }
    chunks
}

/// Lay out one message as physical lines joined by `\n`, without a
/// trailing newline.
///
/// Each chunk of `line_width - label_width` characters gets the gutter for
/// `label` in front of it. An empty message renders as an empty string.
pub fn layout(label: &str, message: &str, label_width: usize, line_width: usize) -> String {
    let prefix = gutter(label, label_width);
    let chunk_width = line_width.saturating_sub(label_width);
    wrap(message, chunk_width)
        .into_iter()
        .map(|chunk| format!("{prefix}{chunk}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a duration as `H:MM:SS`, with `.ffffff` microseconds when
/// non-zero and a `N day(s), ` prefix past one day.
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let micros = d.subsec_micros();
    let days = total_secs / 86_400;
    let rem = total_secs % 86_400;
    let (h, m, s) = (rem / 3_600, (rem % 3_600) / 60, rem % 60);

    let mut out = String::new();
    if days > 0 {
        let plural = if days == 1 { "" } else { "s" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{h}:{m:02}:{s:02}"));
    if micros > 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}

/// A horizontal rule of `width` rule characters.
pub fn rule(width: usize) -> String {
    std::iter::repeat(constants::RULE_CHAR).take(width).collect()
}
