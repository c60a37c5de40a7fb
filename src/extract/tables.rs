//! Table region detection from text alignment (Stream mode algorithm).
//!
//! Detects tabular regions by looking for left edges that repeat across
//! multiple rows, without relying on graphical ruling lines. Only region
//! bounding boxes are reported; cell structure is discarded.

use std::collections::HashMap;

use crate::model::BoundingBox;

use super::spans::TextSpan;

/// X positions within one bucket are treated as the same column edge.
const EDGE_BUCKET_SIZE: f32 = 5.0;

/// Tolerance when matching a span's left edge against a detected column.
const EDGE_MATCH_TOLERANCE: f32 = 3.0;

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Minimum number of aligned rows to consider as a table
    pub min_rows: usize,
    /// Minimum number of columns to consider as a table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum fraction of multi-span rows an edge must appear in
    pub min_alignment_ratio: f32,
    /// Minimum gap between detected column edges (points)
    pub min_column_gap: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

/// A row of spans grouped by Y position.
#[derive(Debug, Clone)]
struct Row {
    y: f32,
    spans: Vec<TextSpan>,
}

/// Detects table regions in a list of text spans.
pub struct TableDetector {
    config: TableConfig,
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
        }
    }

    /// Create a detector with custom configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Detect table regions and return their bounding boxes in
    /// top-left-origin page coordinates.
    pub fn detect(&self, spans: &[TextSpan], page_height: f32) -> Vec<BoundingBox> {
        if spans.len() < self.config.min_rows * self.config.min_columns {
            return vec![];
        }

        let rows = self.group_into_rows(spans);
        if rows.len() < self.config.min_rows {
            return vec![];
        }

        let columns = self.detect_column_edges(&rows);
        log::debug!(
            "table detector: {} rows, column edges at {:?}",
            rows.len(),
            columns
        );

        if columns.len() < self.config.min_columns {
            return vec![];
        }

        let mut regions = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if self.row_column_coverage(row, &columns) >= self.config.min_columns {
                if run_start.is_none() {
                    run_start = Some(i);
                }
            } else if let Some(start) = run_start.take() {
                if i - start >= self.config.min_rows {
                    regions.push((start, i - 1));
                }
            }
        }
        if let Some(start) = run_start {
            if rows.len() - start >= self.config.min_rows {
                regions.push((start, rows.len() - 1));
            }
        }

        log::debug!("table detector: {} candidate regions", regions.len());

        regions
            .into_iter()
            .filter_map(|(start, end)| {
                let region_rows = &rows[start..=end];

                // Reject regions with too many columns: usually word-level
                // splitting of prose, not a table.
                let covered = self.region_column_count(region_rows, &columns);
                if covered > self.config.max_columns {
                    log::debug!(
                        "table detector: skipping region with {} columns (max {})",
                        covered,
                        self.config.max_columns
                    );
                    return None;
                }

                Some(region_bbox(region_rows, page_height))
            })
            .collect()
    }

    /// Group spans into rows by Y position (top-down order).
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<Row> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| {
            let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
            if y_cmp == std::cmp::Ordering::Equal {
                a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
            } else {
                y_cmp
            }
        });

        let mut rows: Vec<Row> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted {
            let y_tolerance = span.font_size * self.config.y_tolerance_factor;

            match current_y {
                Some(y) if (span.y - y).abs() <= y_tolerance => {
                    current.push(span);
                }
                _ => {
                    if !current.is_empty() {
                        let avg_y =
                            current.iter().map(|s| s.y).sum::<f32>() / current.len() as f32;
                        rows.push(Row {
                            y: avg_y,
                            spans: std::mem::take(&mut current),
                        });
                    }
                    current_y = Some(span.y);
                    current.push(span);
                }
            }
        }

        if !current.is_empty() {
            let avg_y = current.iter().map(|s| s.y).sum::<f32>() / current.len() as f32;
            rows.push(Row {
                y: avg_y,
                spans: current,
            });
        }

        rows
    }

    /// Find column left edges that repeat across multi-span rows.
    fn detect_column_edges(&self, rows: &[Row]) -> Vec<f32> {
        let multi_span_rows: Vec<&Row> = rows.iter().filter(|r| r.spans.len() >= 2).collect();
        if multi_span_rows.len() < self.config.min_rows {
            return vec![];
        }

        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        for row in &multi_span_rows {
            // Count each bucket only once per row.
            let mut row_buckets: std::collections::HashSet<i32> = std::collections::HashSet::new();
            for span in &row.spans {
                row_buckets.insert((span.x / EDGE_BUCKET_SIZE).round() as i32);
            }
            for bucket in row_buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((multi_span_rows.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .into_iter()
            .filter(|(_, count)| *count >= min_occurrences)
            .map(|(bucket, _)| bucket as f32 * EDGE_BUCKET_SIZE)
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Merge edges closer than the minimum column gap.
        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(&prev) if edge - prev < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }

        merged
    }

    /// How many detected columns a row's spans line up with.
    fn row_column_coverage(&self, row: &Row, columns: &[f32]) -> usize {
        columns
            .iter()
            .filter(|&&col| {
                row.spans
                    .iter()
                    .any(|s| (s.x - col).abs() <= EDGE_BUCKET_SIZE / 2.0 + EDGE_MATCH_TOLERANCE)
            })
            .count()
    }

    /// Distinct columns covered anywhere in a region.
    fn region_column_count(&self, rows: &[Row], columns: &[f32]) -> usize {
        columns
            .iter()
            .filter(|&&col| {
                rows.iter().any(|row| {
                    row.spans
                        .iter()
                        .any(|s| (s.x - col).abs() <= EDGE_BUCKET_SIZE / 2.0 + EDGE_MATCH_TOLERANCE)
                })
            })
            .count()
    }
}

/// Bounding box of a row region, converted to top-left-origin coordinates.
fn region_bbox(rows: &[Row], page_height: f32) -> BoundingBox {
    let spans = rows.iter().flat_map(|r| r.spans.iter());

    let mut x0 = f32::MAX;
    let mut x1 = f32::MIN;
    let mut y_top = f32::MIN;
    let mut y_bottom = f32::MAX;

    for span in spans {
        x0 = x0.min(span.x);
        x1 = x1.max(span.x + span.width);
        y_top = y_top.max(span.top());
        y_bottom = y_bottom.min(span.bottom());
    }

    BoundingBox::from_pdf_coords(x0, y_bottom, x1, y_top, page_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, 12.0)
    }

    fn grid(rows: usize) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        for r in 0..rows {
            let y = 700.0 - r as f32 * 20.0;
            spans.push(span("alpha", 72.0, y));
            spans.push(span("beta", 300.0, y));
        }
        spans
    }

    #[test]
    fn test_detects_aligned_grid() {
        let detector = TableDetector::new();
        let tables = detector.detect(&grid(3), 792.0);
        assert_eq!(tables.len(), 1);

        let bbox = &tables[0];
        assert!((bbox.x0 - 72.0).abs() < 0.01);
        // Rightmost span: "beta" at 300 + 4 chars * 6pt.
        assert!((bbox.x1 - 324.0).abs() < 0.01);
        // Top row at y=700: ascender 709.6, so top = 792 - 709.6.
        assert!((bbox.top - 82.4).abs() < 0.01);
        // Bottom row at y=660: descender 657.6, so bottom = 792 - 657.6.
        assert!((bbox.bottom - 134.4).abs() < 0.01);
    }

    #[test]
    fn test_prose_is_not_a_table() {
        // Single span per line, nothing aligned into columns.
        let spans = vec![
            span("This is a paragraph of text", 72.0, 700.0),
            span("continuing on the next line", 72.0, 680.0),
            span("and one more for good measure", 72.0, 660.0),
        ];
        let detector = TableDetector::new();
        assert!(detector.detect(&spans, 792.0).is_empty());
    }

    #[test]
    fn test_single_row_is_not_a_table() {
        let detector = TableDetector::new();
        assert!(detector.detect(&grid(1), 792.0).is_empty());
    }

    #[test]
    fn test_empty_spans() {
        let detector = TableDetector::new();
        assert!(detector.detect(&[], 792.0).is_empty());
    }

    #[test]
    fn test_title_row_excluded_from_region() {
        // A single-span heading above an aligned grid: the grid is detected,
        // the heading row is not part of it.
        let mut spans = vec![span("Quarterly results", 72.0, 740.0)];
        spans.extend(grid(3));

        let detector = TableDetector::new();
        let tables = detector.detect(&spans, 792.0);
        assert_eq!(tables.len(), 1);
        // Region top stays at the grid's first row, not the heading.
        assert!((tables[0].top - 82.4).abs() < 0.01);
    }

    #[test]
    fn test_max_columns_rejects_word_soup() {
        // 8 aligned "columns" of single characters in 2 rows: above the
        // default max_columns, rejected.
        let mut spans = Vec::new();
        for r in 0..2 {
            let y = 700.0 - r as f32 * 20.0;
            for c in 0..8 {
                spans.push(span("x", 72.0 + c as f32 * 40.0, y));
            }
        }
        let detector = TableDetector::new();
        assert!(detector.detect(&spans, 792.0).is_empty());
    }
}
