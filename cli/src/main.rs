//! unocr CLI - OCR layout reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unocr::{
    Document, JsonFormat, JsonShape, PageSelection, ReconstructOptions, Reconstruction,
    ReconstructionRecord, Reconstructor, RenderOptions,
};

#[derive(Parser)]
#[command(name = "unocr")]
#[command(author = "iyulab")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Rebuild OCR analysis output into sections, as JSON, Markdown, and text", long_about = None)]
struct Cli {
    /// Analysis response files (several files are merged as one paginated result)
    #[arg(value_name = "FILE")]
    input: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    #[command(flatten)]
    reconstruct: ReconstructArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to all formats (JSON, Markdown, text)
    Convert {
        /// Analysis response files
        #[arg(value_name = "FILE", required = true)]
        input: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Convert to JSON
    Json {
        /// Analysis response files
        #[arg(value_name = "FILE", required = true)]
        input: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Key each section by its line text
        #[arg(long, conflicts_with = "record")]
        keyed: bool,

        /// Wrap the pages in a storage record
        #[arg(long)]
        record: bool,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Convert to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Analysis response files
        #[arg(value_name = "FILE", required = true)]
        input: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave out sections without key-value pairs or tables
        #[arg(long)]
        structured_only: bool,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Convert to plain text
    Text {
        /// Analysis response files
        #[arg(value_name = "FILE", required = true)]
        input: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Show document information
    Info {
        /// Analysis response files
        #[arg(value_name = "FILE", required = true)]
        input: Vec<PathBuf>,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Show version information
    Version,
}

/// Flags shared by every command that reconstructs pages.
#[derive(Args, Clone, Default)]
struct ReconstructArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Keep going when a page fails, skipping it
    #[arg(long)]
    lenient: bool,

    /// Reconstruct pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Order lines top to bottom instead of stored order
    #[arg(long)]
    sort_lines: bool,

    /// Drop key-value pairs that sit inside tables
    #[arg(long = "exclude-table-kv")]
    exclude_table_kv: bool,
}

impl ReconstructArgs {
    fn page_selection(&self) -> Result<PageSelection, Box<dyn std::error::Error>> {
        match self.pages.as_deref() {
            Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
            None => Ok(PageSelection::All),
        }
    }

    fn options(&self) -> Result<ReconstructOptions, Box<dyn std::error::Error>> {
        let mut options = ReconstructOptions::new()
            .with_pages(self.page_selection()?)
            .with_parallel(!self.sequential)
            .with_table_key_values_excluded(self.exclude_table_kv);
        if self.lenient {
            options = options.lenient();
        }
        if self.sort_lines {
            options = options.positional();
        }
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            reconstruct,
        }) => cmd_convert(&input, output.as_deref(), &reconstruct),
        Some(Commands::Json {
            input,
            output,
            compact,
            keyed,
            record,
            reconstruct,
        }) => cmd_json(&input, output.as_deref(), compact, keyed, record, &reconstruct),
        Some(Commands::Markdown {
            input,
            output,
            structured_only,
            reconstruct,
        }) => cmd_markdown(&input, output.as_deref(), structured_only, &reconstruct),
        Some(Commands::Text {
            input,
            output,
            reconstruct,
        }) => cmd_text(&input, output.as_deref(), &reconstruct),
        Some(Commands::Info { input, reconstruct }) => cmd_info(&input, &reconstruct),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if cli.input.is_empty() {
                println!("{}", "Usage: unocr <FILE...> [-o DIR]".yellow());
                println!("       unocr --help for more information");
                Ok(())
            } else {
                cmd_convert(&cli.input, cli.output.as_deref(), &cli.reconstruct)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load one response, or merge several paginated ones.
fn load(input: &[PathBuf]) -> unocr::Result<Document> {
    let doc = match input {
        [single] => unocr::load_file(single)?,
        _ => {
            log::debug!("Merging {} paginated responses", input.len());
            unocr::load_files(input)?
        }
    };
    log::debug!(
        "Loaded {} blocks across {} pages",
        doc.fragments.len(),
        doc.page_count()
    );
    Ok(doc)
}

fn reconstruct(
    doc: &Document,
    args: &ReconstructArgs,
) -> Result<Reconstruction, Box<dyn std::error::Error>> {
    let options = args.options()?;
    log::debug!(
        "Reconstructing with {:?} errors, {:?} line order, parallel: {}",
        options.error_mode,
        options.line_order,
        options.parallel
    );
    let reconstruction = Reconstructor::with_options(options).reconstruct(doc)?;
    for failure in &reconstruction.failures {
        eprintln!(
            "{} page {}: {}",
            "Skipped".yellow(),
            failure.page,
            failure.message
        );
    }
    Ok(reconstruction)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn file_stem(input: &[PathBuf]) -> String {
    input
        .first()
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn cmd_convert(
    input: &[PathBuf],
    output: Option<&Path>,
    args: &ReconstructArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let stem = file_stem(input);
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(format!("{}_output", stem)));

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading response...");
    let doc = load(input)?;
    pb.inc(1);

    pb.set_message("Reconstructing pages...");
    let reconstruction = reconstruct(&doc, args)?;
    pb.inc(1);

    let render_options = RenderOptions::new().with_pages(args.page_selection()?);

    pb.set_message("Generating JSON...");
    let json = unocr::render::to_json(&reconstruction, JsonFormat::Pretty, &render_options)?;
    fs::write(output_dir.join(format!("{}.json", stem)), &json)?;
    pb.inc(1);

    pb.set_message("Generating Markdown and text...");
    let markdown = unocr::render::to_markdown(&reconstruction, &render_options)?;
    fs::write(output_dir.join(format!("{}.md", stem)), &markdown)?;
    let text = unocr::render::to_text(&reconstruction, &render_options)?;
    fs::write(output_dir.join(format!("{}.txt", stem)), &text)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}.json", "├─".dimmed(), stem);
    println!("  {} {}.md", "├─".dimmed(), stem);
    println!("  {} {}.txt", "└─".dimmed(), stem);

    Ok(())
}

fn cmd_json(
    input: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    keyed: bool,
    record: bool,
    args: &ReconstructArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;
    let reconstruction = reconstruct(&doc, args)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if record {
        let file_path = input
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let record = ReconstructionRecord::new(file_stem(input), file_path, reconstruction);
        unocr::render::record_to_json(&record, format)?
    } else {
        let shape = if keyed {
            JsonShape::Keyed
        } else {
            JsonShape::Structured
        };
        let render_options = RenderOptions::new()
            .with_pages(args.page_selection()?)
            .with_json_shape(shape);
        unocr::render::to_json(&reconstruction, format, &render_options)?
    };

    write_output(output, &json)
}

fn cmd_markdown(
    input: &[PathBuf],
    output: Option<&Path>,
    structured_only: bool,
    args: &ReconstructArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;
    let reconstruction = reconstruct(&doc, args)?;

    let render_options = RenderOptions::new()
        .with_pages(args.page_selection()?)
        .with_plain_sections(!structured_only);

    let markdown = unocr::render::to_markdown(&reconstruction, &render_options)?;
    write_output(output, &markdown)
}

fn cmd_text(
    input: &[PathBuf],
    output: Option<&Path>,
    args: &ReconstructArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;
    let reconstruction = reconstruct(&doc, args)?;

    let render_options = RenderOptions::new().with_pages(args.page_selection()?);
    let text = unocr::render::to_text(&reconstruction, &render_options)?;
    write_output(output, &text)
}

fn cmd_info(input: &[PathBuf], args: &ReconstructArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for path in input {
        println!("{}: {}", "File".bold(), path.display());
    }
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Blocks".bold(), doc.fragments.len());
    for (kind, count) in doc.kind_counts() {
        println!("  {} {}: {}", "·".dimmed(), kind, count);
    }

    // Info should still report on documents with broken pages
    let reconstruction = reconstruct(&doc, &ReconstructArgs {
        lenient: true,
        ..args.clone()
    })?;
    let stats = reconstruction.stats();

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Key-values".bold(), stats.key_value_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    if stats.failed_page_count > 0 {
        println!(
            "{}: {}",
            "Failed pages".bold(),
            stats.failed_page_count.to_string().red()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unocr".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR layout reconstruction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unocr".dimmed());
    println!("License: MIT");
}
