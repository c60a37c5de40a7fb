//! The serializable report: one record per page plus the word mapping.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

use super::{BoundingBox, PageLayout};

/// Font size and geometry recorded for a word in the report mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    /// Effective font size in points
    pub font_size: f32,
    /// Word bounding box
    pub dimensions: BoundingBox,
}

/// Insertion-ordered mapping from word text to [`WordInfo`].
///
/// Keys keep their first-insertion position; inserting an existing key
/// overwrites the value in place, so the last occurrence of a duplicated
/// word wins. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordMap {
    entries: Vec<(String, WordInfo)>,
}

impl WordMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word. Overwrites the existing value when the text is already
    /// present, keeping the key's original position.
    pub fn insert(&mut self, text: String, info: WordInfo) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == text) {
            entry.1 = info;
        } else {
            self.entries.push((text, info));
        }
    }

    /// Look up a word by text.
    pub fn get(&self, text: &str) -> Option<&WordInfo> {
        self.entries.iter().find(|(k, _)| k == text).map(|(_, v)| v)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordInfo)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for WordMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WordMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct WordMapVisitor;

        impl<'de> Visitor<'de> for WordMapVisitor {
            type Value = WordMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of word text to word info")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<WordMap, A::Error> {
                let mut map = WordMap::new();
                while let Some((key, value)) = access.next_entry::<String, WordInfo>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(WordMapVisitor)
    }
}

/// The serializable summary of one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page number (1-indexed, strictly increasing across the report)
    pub page_number: u32,

    /// First line of the extracted text, trimmed
    pub title: String,

    /// Full extracted text
    pub text: String,

    /// Number of detected table regions
    pub tables_count: usize,

    /// Number of image placements
    pub images_count: usize,

    /// Word text mapped to font size and bounding box
    pub words_with_font_and_dimensions: WordMap,

    /// Isolated per-page failure, when extraction ran in lenient mode
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl PageRecord {
    /// Build a record from a page layout.
    pub fn from_layout(layout: &PageLayout) -> Self {
        let mut words = WordMap::new();
        for word in &layout.words {
            words.insert(
                word.text.clone(),
                WordInfo {
                    font_size: word.font_size,
                    dimensions: word.bbox,
                },
            );
        }

        Self {
            page_number: layout.number,
            title: layout.title(),
            text: layout.text.clone(),
            tables_count: layout.tables.len(),
            images_count: layout.images.len(),
            words_with_font_and_dimensions: words,
            error: layout.error.clone(),
        }
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// The full extraction report for a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Path of the input document
    pub pdf_path: String,

    /// One record per page, in page order
    pub pages: Vec<PageRecord>,
}

impl Report {
    /// Build a report from per-page layouts. Records appear in the order of
    /// the input slice, which the extractor guarantees is page order.
    pub fn from_layouts(pdf_path: impl Into<String>, layouts: &[PageLayout]) -> Self {
        Self {
            pdf_path: pdf_path.into(),
            pages: layouts.iter().map(PageRecord::from_layout).collect(),
        }
    }

    /// Number of pages in the report.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };

        result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Word;

    fn word_info(size: f32, top: f32) -> WordInfo {
        WordInfo {
            font_size: size,
            dimensions: BoundingBox::new(10.0, top, 50.0, top + 12.0),
        }
    }

    #[test]
    fn test_word_map_insertion_order() {
        let mut map = WordMap::new();
        map.insert("zebra".to_string(), word_info(12.0, 0.0));
        map.insert("apple".to_string(), word_info(12.0, 20.0));

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_word_map_duplicate_overwrites_in_place() {
        let mut map = WordMap::new();
        map.insert("the".to_string(), word_info(12.0, 100.0));
        map.insert("cat".to_string(), word_info(12.0, 100.0));
        map.insert("the".to_string(), word_info(14.0, 200.0));

        assert_eq!(map.len(), 2);
        // Last occurrence wins, but the key keeps its original position.
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["the", "cat"]);
        assert_eq!(map.get("the").unwrap().font_size, 14.0);
        assert_eq!(map.get("the").unwrap().dimensions.top, 200.0);
    }

    #[test]
    fn test_word_map_serializes_in_order() {
        let mut map = WordMap::new();
        map.insert("second".to_string(), word_info(12.0, 0.0));
        map.insert("first".to_string(), word_info(12.0, 0.0));

        let json = serde_json::to_string(&map).unwrap();
        let second_pos = json.find("second").unwrap();
        let first_pos = json.find("first").unwrap();
        assert!(second_pos < first_pos);
    }

    #[test]
    fn test_word_map_round_trip() {
        let mut map = WordMap::new();
        map.insert("alpha".to_string(), word_info(10.0, 5.0));
        map.insert("beta".to_string(), word_info(11.0, 25.0));

        let json = serde_json::to_string(&map).unwrap();
        let parsed: WordMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_record_from_layout_duplicate_word() {
        let mut layout = PageLayout::new(1, 612.0, 792.0);
        layout.text = "the cat\nthe dog".to_string();
        layout.words = vec![
            Word {
                text: "the".to_string(),
                font_size: 12.0,
                bbox: BoundingBox::new(72.0, 62.0, 90.0, 74.0),
            },
            Word {
                text: "cat".to_string(),
                font_size: 12.0,
                bbox: BoundingBox::new(96.0, 62.0, 114.0, 74.0),
            },
            Word {
                text: "the".to_string(),
                font_size: 12.0,
                bbox: BoundingBox::new(72.0, 102.0, 90.0, 114.0),
            },
        ];

        let record = PageRecord::from_layout(&layout);
        assert_eq!(record.title, "the cat");
        assert_eq!(record.words_with_font_and_dimensions.len(), 2);
        // The second occurrence's box survives.
        let the = record.words_with_font_and_dimensions.get("the").unwrap();
        assert_eq!(the.dimensions.top, 102.0);
    }

    #[test]
    fn test_report_json_shape() {
        let mut layout = PageLayout::new(1, 612.0, 792.0);
        layout.text = "Title\nbody".to_string();
        let report = Report::from_layouts("input.pdf", &[layout]);

        let json = report.to_json(JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"pdf_path\""));
        assert!(json.contains("\"pages\""));
        assert!(json.contains("\"words_with_font_and_dimensions\""));
        assert!(json.contains("\"tables_count\""));
        // No error field when extraction succeeded.
        assert!(!json.contains("\"error\""));
        assert!(json.contains('\n')); // Pretty has newlines

        let compact = report.to_json(JsonFormat::Compact).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_report_round_trip() {
        let mut layout = PageLayout::new(1, 612.0, 792.0);
        layout.text = "Hello World".to_string();
        layout.words = vec![Word {
            text: "Hello".to_string(),
            font_size: 12.0,
            bbox: BoundingBox::new(72.0, 62.4, 102.0, 74.4),
        }];
        let report = Report::from_layouts("doc.pdf", &[layout]);

        let json = report.to_json(JsonFormat::Pretty).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.page_count(), report.page_count());
        assert_eq!(parsed.pdf_path, report.pdf_path);
        assert_eq!(parsed.pages[0].title, report.pages[0].title);
        assert_eq!(parsed.pages[0].tables_count, report.pages[0].tables_count);
        assert_eq!(
            parsed.pages[0].words_with_font_and_dimensions,
            report.pages[0].words_with_font_and_dimensions
        );
    }
}
