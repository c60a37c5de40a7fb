//! Line assembly and word segmentation over extracted spans.
//!
//! Spans are grouped into lines by baseline proximity to produce the page
//! text and title; independently, each span is split on whitespace into word
//! occurrences with per-word bounding boxes.

use crate::model::{BoundingBox, Word};

use super::spans::TextSpan;

/// Group spans into lines by Y position and assemble the page text, lines
/// joined with newlines in top-to-bottom reading order.
pub fn page_text(spans: &[TextSpan]) -> String {
    let lines = group_into_lines(spans);
    lines
        .iter()
        .map(|line| line_text(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group spans into lines, top-to-bottom, spans within a line left-to-right.
fn group_into_lines(spans: &[TextSpan]) -> Vec<Vec<TextSpan>> {
    if spans.is_empty() {
        return vec![];
    }

    // Sort by Y (descending, since PDF Y is bottom-up) then X.
    let mut sorted = spans.to_vec();
    sorted.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<Vec<TextSpan>> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in sorted {
        let y_tolerance = span.font_size * 0.3;

        match current_y {
            Some(y) if (span.y - y).abs() <= y_tolerance => {
                current.push(span);
            }
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Combine the spans of one line, inserting a space when the horizontal gap
/// between adjacent spans is wider than a fraction of the character width.
fn line_text(spans: &[TextSpan]) -> String {
    let mut result = String::new();

    for (i, span) in spans.iter().enumerate() {
        if i == 0 {
            result.push_str(&span.text);
            continue;
        }

        let prev = &spans[i - 1];
        let gap = span.x - (prev.x + prev.width);
        let space_threshold = span.char_width() * 0.2;

        let prev_ends_with_space = prev.text.ends_with(' ') || prev.text.ends_with('\u{00A0}');
        let curr_starts_with_space = span.text.starts_with(' ') || span.text.starts_with('\u{00A0}');

        if gap > space_threshold && !prev_ends_with_space && !curr_starts_with_space {
            result.push(' ');
        }

        result.push_str(&span.text);
    }

    result
}

/// Split a span into word occurrences with estimated bounding boxes.
///
/// Horizontal extents are apportioned by character offset using the span's
/// estimated character width; vertical extents come from the span's
/// ascender/descender approximation. Boxes are converted to top-left-origin
/// coordinates using the page height.
pub fn segment_words(span: &TextSpan, page_height: f32) -> Vec<Word> {
    let char_w = span.char_width();
    let mut words = Vec::new();

    let mut start: Option<usize> = None;
    let chars: Vec<char> = span.text.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push(make_word(span, &chars[s..i], s, char_w, page_height));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        words.push(make_word(span, &chars[s..], s, char_w, page_height));
    }

    words
}

fn make_word(
    span: &TextSpan,
    chars: &[char],
    start_offset: usize,
    char_w: f32,
    page_height: f32,
) -> Word {
    let text: String = chars.iter().collect();
    let x0 = span.x + start_offset as f32 * char_w;
    let x1 = x0 + chars.len() as f32 * char_w;
    let bbox = BoundingBox::from_pdf_coords(x0, span.bottom(), x1, span.top(), page_height);

    Word {
        text,
        font_size: span.font_size,
        bbox,
    }
}

/// Segment every span on a page into word occurrences, preserving
/// content-stream order.
pub fn page_words(spans: &[TextSpan], page_height: f32) -> Vec<Word> {
    spans
        .iter()
        .flat_map(|span| segment_words(span, page_height))
        .collect()
}
