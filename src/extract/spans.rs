//! Content-stream interpretation: positioned text spans.
//!
//! Walks a page's content stream tracking the text matrix and the current
//! font, and emits one span per shown-text operation with its position and
//! effective font size. Text is decoded through the font's encoding when
//! lopdf can resolve it, with a byte-level fallback otherwise.

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// A text span with position and font information, in PDF (bottom-up)
/// coordinates.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a new span. Width is estimated from the character count since
    /// per-glyph metrics are not loaded; half the font size per character is
    /// a workable approximation for Latin text.
    pub fn new(text: String, x: f32, y: f32, font_size: f32) -> Self {
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    /// Approximate ascender Y (PDF coords).
    pub fn top(&self) -> f32 {
        self.y + self.font_size * 0.8
    }

    /// Approximate descender Y (PDF coords).
    pub fn bottom(&self) -> f32 {
        self.y - self.font_size * 0.2
    }

    /// Estimated width of a single character in this span.
    pub fn char_width(&self) -> f32 {
        let chars = self.text.chars().count();
        if chars > 0 && self.width > 0.0 {
            self.width / chars as f32
        } else {
            self.font_size * 0.5
        }
    }
}

/// Read and concatenate a page's content stream(s).
///
/// A page without a `Contents` entry yields empty content; a page with no
/// text must not fail the run.
pub fn get_page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return s
                    .get_plain_content()
                    .map_err(|e| Error::PdfParse(e.to_string()));
            }
            Err(Error::PdfParse("Invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = s.get_plain_content() {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::PdfParse("Invalid content stream".to_string())),
    }
}

/// Extract positioned text spans from a page.
pub fn extract_spans(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<TextSpan>> {
    let lopdf_fonts = doc.get_page_fonts(page_id).unwrap_or_default();

    let content = get_page_content(doc, page_id)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }

    let content =
        lopdf::content::Content::decode(&content).map_err(|e| Error::TextExtract(e.to_string()))?;

    let mut spans = Vec::new();
    let mut current_font_name: Vec<u8> = Vec::new();
    let mut current_font_size: f32 = 12.0;
    let mut text_matrix = TextMatrix::default();
    let mut in_text_block = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                text_matrix = TextMatrix::default();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(font_name) = &op.operands[0] {
                        current_font_name = font_name.clone();
                    }
                    current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    text_matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    text_matrix.set(
                        get_number(&op.operands[0]).unwrap_or(1.0),
                        get_number(&op.operands[1]).unwrap_or(0.0),
                        get_number(&op.operands[2]).unwrap_or(0.0),
                        get_number(&op.operands[3]).unwrap_or(1.0),
                        get_number(&op.operands[4]).unwrap_or(0.0),
                        get_number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
            }
            "T*" => {
                text_matrix.next_line();
            }
            "Tj" | "TJ" => {
                if in_text_block {
                    let encoding = lopdf_fonts
                        .get(&current_font_name)
                        .and_then(|f| f.get_font_encoding(doc).ok());

                    let text = if op.operator == "TJ" {
                        // TJ: array of strings and kerning adjustments in
                        // 1/1000 text space units. Large negative values
                        // usually stand in for word spaces.
                        if let Some(Object::Array(arr)) = op.operands.first() {
                            decode_tj_array(arr, encoding.as_ref())
                        } else {
                            String::new()
                        }
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        decode_with_encoding(encoding.as_ref(), bytes)
                    } else {
                        String::new()
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = text_matrix.get_position();
                        let effective_size = current_font_size * text_matrix.get_scale();
                        spans.push(TextSpan::new(text, x, y, effective_size));
                    }
                }
            }
            "'" | "\"" => {
                text_matrix.next_line();
                if in_text_block {
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let encoding = lopdf_fonts
                            .get(&current_font_name)
                            .and_then(|f| f.get_font_encoding(doc).ok());

                        let text = decode_with_encoding(encoding.as_ref(), bytes);
                        if !text.trim().is_empty() {
                            let (x, y) = text_matrix.get_position();
                            let effective_size = current_font_size * text_matrix.get_scale();
                            spans.push(TextSpan::new(text, x, y, effective_size));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    log::debug!("extracted {} spans from page object {:?}", spans.len(), page_id);

    Ok(spans)
}

/// Decode a TJ operand array into a single string.
fn decode_tj_array(arr: &[Object], encoding: Option<&lopdf::Encoding>) -> String {
    let mut combined = String::new();
    // ~200 units of negative adjustment reads as a word space for most fonts.
    let space_threshold = 200.0;

    for item in arr {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode_with_encoding(encoding, bytes));
            }
            Object::Integer(n) => {
                push_adjustment_space(&mut combined, -(*n as f32), space_threshold);
            }
            Object::Real(n) => {
                push_adjustment_space(&mut combined, -n, space_threshold);
            }
            _ => {}
        }
    }

    combined
}

fn push_adjustment_space(combined: &mut String, adjustment: f32, threshold: f32) {
    if adjustment > threshold
        && !combined.is_empty()
        && !combined.ends_with(' ')
        && !combined.ends_with('\u{00A0}')
    {
        combined.push(' ');
    }
}

/// Decode a text byte sequence through the font's encoding when available.
fn decode_with_encoding(encoding: Option<&lopdf::Encoding>, bytes: &[u8]) -> String {
    if let Some(enc) = encoding {
        if let Ok(text) = LopdfDocument::decode_text(enc, bytes) {
            return text;
        }
    }
    decode_text_simple(bytes)
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    // Try UTF-8
    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Helper to extract a number from a PDF object.
pub fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default line leading (could be set by the TL operator)
        self.f -= 12.0 * self.d;
    }

    fn get_position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn get_scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
