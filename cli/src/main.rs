//! layoutscan CLI - PDF layout extraction and annotation tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use layoutscan::{pipeline, AnnotationStyle, ExtractOptions, JsonFormat, PipelineOptions};

#[derive(Parser)]
#[command(name = "layoutscan")]
#[command(version)]
#[command(about = "Extract PDF page layouts to JSON and annotate bounding boxes", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Annotated PDF output path (default: <stem>_annotated.pdf)
    #[arg(value_name = "OUTPUT_PDF")]
    output_pdf: Option<PathBuf>,

    /// JSON report output path (default: <stem>.json)
    #[arg(value_name = "OUTPUT_JSON")]
    output_json: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,

    #[command(flatten)]
    style: StyleArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract page layouts to JSON only
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Write an annotated copy of the PDF only
    Annotate {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (default: <stem>_annotated.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Abort on the first failing page instead of recording the error
    #[arg(long)]
    strict: bool,

    /// Process pages sequentially instead of in parallel
    #[arg(long)]
    sequential: bool,
}

impl RunArgs {
    fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new();
        if !self.strict {
            options = options.lenient();
        }
        if !self.sequential {
            options = options.parallel();
        }
        options
    }

    fn json_format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

#[derive(Args, Clone)]
struct StyleArgs {
    /// Stroke color as "r,g,b" with components in 0.0-1.0
    #[arg(long, value_parser = parse_color, default_value = "1,0,0")]
    color: (f32, f32, f32),

    /// Stroke width in points
    #[arg(long, default_value = "2.0")]
    line_width: f32,

    /// Skip word boxes
    #[arg(long)]
    no_words: bool,

    /// Skip table region boxes
    #[arg(long)]
    no_tables: bool,

    /// Skip image placement boxes
    #[arg(long)]
    no_images: bool,
}

impl StyleArgs {
    fn to_style(&self) -> AnnotationStyle {
        let (r, g, b) = self.color;
        let mut style = AnnotationStyle::new()
            .with_color(r, g, b)
            .with_line_width(self.line_width);
        if self.no_words {
            style = style.without_words();
        }
        if self.no_tables {
            style = style.without_tables();
        }
        if self.no_images {
            style = style.without_images();
        }
        style
    }
}

fn parse_color(s: &str) -> Result<(f32, f32, f32), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected \"r,g,b\", got \"{}\"", s));
    }

    let mut components = [0.0f32; 3];
    for (i, part) in parts.iter().enumerate() {
        let value: f32 = part
            .parse()
            .map_err(|_| format!("invalid color component \"{}\"", part))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("color component {} out of range 0.0-1.0", value));
        }
        components[i] = value;
    }

    Ok((components[0], components[1], components[2]))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract { input, output, run }) => {
            cmd_extract(&input, output.as_deref(), &run)
        }
        Some(Commands::Annotate {
            input,
            output,
            style,
        }) => cmd_annotate(&input, output.as_deref(), &style),
        Some(Commands::Info { input }) => cmd_info(&input),
        None => {
            if let Some(input) = cli.input {
                cmd_run(
                    &input,
                    cli.output_pdf.as_deref(),
                    cli.output_json.as_deref(),
                    &cli.run,
                    &cli.style,
                )
            } else {
                println!(
                    "{}",
                    "Usage: layoutscan <FILE> [OUTPUT_PDF] [OUTPUT_JSON]".yellow()
                );
                println!("       layoutscan --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}{}", stem, suffix))
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn cmd_run(
    input: &Path,
    output_pdf: Option<&Path>,
    output_json: Option<&Path>,
    run: &RunArgs,
    style: &StyleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_pdf = output_pdf
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, "_annotated.pdf"));
    let output_json = output_json
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, ".json"));

    let pb = spinner("Analyzing PDF...");

    let options = PipelineOptions {
        extract: run.extract_options(),
        style: style.to_style(),
        json: run.json_format(),
    };
    let report = pipeline::run_with_options(input, &output_pdf, &output_json, options)?;

    pb.finish_and_clear();

    println!("{} {} pages", "Analyzed".green().bold(), report.page_count());
    for page in &report.pages {
        if let Some(error) = &page.error {
            println!(
                "  {} page {}: {}",
                "!".yellow().bold(),
                page.page_number,
                error
            );
        } else {
            println!(
                "  page {}: {} words, {} tables, {} images",
                page.page_number,
                page.words_with_font_and_dimensions.len(),
                page.tables_count,
                page.images_count
            );
        }
    }

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), output_pdf.display());
    println!("  {} {}", "└─".dimmed(), output_json.display());

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    run: &RunArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = layoutscan::analyze_file_with_options(input, run.extract_options())?;
    let json = report.to_json(run.json_format())?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_annotate(
    input: &Path,
    output: Option<&Path>,
    style: &StyleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, "_annotated.pdf"));

    let pb = spinner("Annotating PDF...");
    layoutscan::annotate_file(input, &output, &style.to_style())?;
    pb.finish_and_clear();

    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let version = layoutscan::detect_version_from_path(input)?;
    let report =
        layoutscan::analyze_file_with_options(input, ExtractOptions::new().lenient().parallel())?;

    println!("{}", "Document information:".green().bold());
    println!("  File:    {}", input.display());
    println!("  Version: PDF {}", version);
    println!("  Pages:   {}", report.page_count());

    let tables: usize = report.pages.iter().map(|p| p.tables_count).sum();
    let images: usize = report.pages.iter().map(|p| p.images_count).sum();
    let words: usize = report
        .pages
        .iter()
        .map(|p| p.words_with_font_and_dimensions.len())
        .sum();
    println!("  Words:   {}", words);
    println!("  Tables:  {}", tables);
    println!("  Images:  {}", images);

    let failed = report.pages.iter().filter(|p| p.error.is_some()).count();
    if failed > 0 {
        println!("  {} {} pages failed to extract", "!".yellow().bold(), failed);
    }

    Ok(())
}
