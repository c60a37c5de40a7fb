//! The end-to-end pipeline: extract, report, annotate.

use std::fs;
use std::path::Path;

use crate::annotate::{AnnotationStyle, Annotator};
use crate::error::Result;
use crate::extract::{ExtractOptions, PageExtractor};
use crate::model::{JsonFormat, Report};

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Extraction options. Lenient by default so one bad page does not
    /// abort the whole document.
    pub extract: ExtractOptions,
    /// Annotation appearance
    pub style: AnnotationStyle,
    /// JSON output format
    pub json: JsonFormat,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::new().lenient(),
            style: AnnotationStyle::default(),
            json: JsonFormat::default(),
        }
    }
}

/// Run the pipeline with default options: extract every page, write the
/// JSON report and an annotated copy of the input.
pub fn run<P, Q, R>(input: P, output_pdf: Q, output_json: R) -> Result<Report>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    run_with_options(input, output_pdf, output_json, PipelineOptions::default())
}

/// Run the pipeline.
///
/// Parent directories of both output paths are created when missing. The
/// returned report is the same data written to `output_json`.
pub fn run_with_options<P, Q, R>(
    input: P,
    output_pdf: Q,
    output_json: R,
    options: PipelineOptions,
) -> Result<Report>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let input = input.as_ref();
    let output_pdf = output_pdf.as_ref();
    let output_json = output_json.as_ref();

    let extractor = PageExtractor::open_with_options(input, options.extract)?;
    let layouts = extractor.extract()?;
    let report = Report::from_layouts(input.display().to_string(), &layouts);

    let mut annotator = Annotator::open(input)?;
    for layout in &layouts {
        annotator.annotate_page(layout, &options.style)?;
    }

    ensure_parent_dir(output_pdf)?;
    ensure_parent_dir(output_json)?;

    annotator.save(output_pdf)?;
    log::info!("wrote annotated PDF to {}", output_pdf.display());

    fs::write(output_json, report.to_json(options.json)?)?;
    log::info!("wrote report to {}", output_json.display());

    Ok(report)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
