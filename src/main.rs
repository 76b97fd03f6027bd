//! CLI for bibtex-publications - Build publication lists from BibTeX files.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use bibtex_publications::{
    builtin_style, builtin_style_names, load_settings, Metadata, PluginSettings,
    PublicationsPlugin, SourceLayout,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Build categorized publication lists from BibTeX files
#[derive(Parser)]
#[command(name = "bibtex-publications")]
#[command(version)]
#[command(after_help = "\
Examples:
  bibtex-publications process --meta page.json
  bibtex-publications process --set journal_src=pubs/journal.bib --set conference_src=pubs/conf.bib
  bibtex-publications process --layout combined --set publications_src=all.bib -o context.json
  bibtex-publications styles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate a rendering context from the BibTeX files named in page metadata
    #[command(after_help = "\
Metadata keys (per-category layout):
  journal_src, conference_src, invited_src, patents_src (or patent_src),
  bookchapter_src (or book_chapter_src), book_src
Metadata key (combined layout):
  publications_src")]
    Process {
        /// Page metadata as a JSON object of string values
        #[arg(short, long)]
        meta: Option<PathBuf>,

        /// Metadata entry KEY=PATH (repeatable, overrides --meta)
        #[arg(long = "set", value_name = "KEY=PATH")]
        set: Vec<String>,

        /// Plugin settings file (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Citation style (see 'styles' command)
        #[arg(short, long)]
        style: Option<String>,

        /// How the metadata names BibTeX files
        #[arg(short, long, value_enum)]
        layout: Option<LayoutArg>,

        /// Directory relative source paths are resolved against
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available builtin citation styles
    Styles,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    PerCategory,
    Combined,
}

impl From<LayoutArg> for SourceLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::PerCategory => SourceLayout::PerCategory,
            LayoutArg::Combined => SourceLayout::Combined,
        }
    }
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — metadata file not found / invalid, or bad --set
    Metadata(String),
    /// Exit 11 — settings file not found / invalid
    Settings(String),
    /// Exit 12 — unknown citation style
    Style(String),
    /// Exit 13 — required metadata key missing
    Config(String),
    /// Exit 15 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Metadata(_) => 10,
            AppError::Settings(_) => 11,
            AppError::Style(_) => 12,
            AppError::Config(_) => 13,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Metadata(msg) => {
                write!(
                    f,
                    "{}\n  hint: metadata must be a JSON object such as {{\"journal_src\": \"journal.bib\"}}",
                    msg
                )
            }
            AppError::Settings(msg) => {
                write!(
                    f,
                    "{}\n  hint: settings accept \"style\", \"layout\" and \"base_dir\"",
                    msg
                )
            }
            AppError::Style(msg) => {
                let names = builtin_style_names().join(", ");
                write!(f, "{}\n  available builtin styles: {}", msg, names)
            }
            AppError::Config(msg) => {
                write!(
                    f,
                    "{}\n  hint: pass --set publications_src=PATH or use --layout per-category",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            meta,
            set,
            settings,
            style,
            layout,
            base_dir,
            output,
        } => {
            let options = ProcessOptions {
                meta: meta.as_deref(),
                set: &set,
                settings: settings.as_deref(),
                style: style.as_deref(),
                layout,
                base_dir,
            };
            process_command(&options, output.as_deref())?;
        }
        Commands::Styles => {
            styles_command();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

struct ProcessOptions<'a> {
    meta: Option<&'a Path>,
    set: &'a [String],
    settings: Option<&'a Path>,
    style: Option<&'a str>,
    layout: Option<LayoutArg>,
    base_dir: Option<PathBuf>,
}

/// Populate a context and write it as JSON.
fn process_command(options: &ProcessOptions<'_>, output: Option<&Path>) -> Result<(), AppError> {
    // 1. Settings: file first, then command-line overrides
    let mut settings = match options.settings {
        Some(path) => load_settings(path)
            .map_err(|e| AppError::Settings(format!("'{}': {}", path.display(), e)))?,
        None => PluginSettings::default(),
    };
    if let Some(name) = options.style {
        settings.style = builtin_style(name)
            .ok_or_else(|| AppError::Style(format!("'{}' is not a builtin style name", name)))?;
    }
    if let Some(layout) = options.layout {
        settings.layout = layout.into();
    }
    if let Some(dir) = &options.base_dir {
        settings.base_dir = Some(dir.clone());
    }

    // 2. Page metadata
    let mut metadata = match options.meta {
        Some(path) => load_metadata(path)?,
        None => Metadata::new(),
    };
    for pair in options.set {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            AppError::Metadata(format!("--set expects KEY=PATH, got '{}'", pair))
        })?;
        metadata.insert(key.trim().to_string(), value.trim().to_string());
    }

    // 3. Populate
    let plugin = PublicationsPlugin::new(settings);
    let mut context = Map::new();
    let report = plugin
        .populate(&metadata, &mut context)
        .map_err(|e| AppError::Config(e.to_string()))?;

    // 4. Write to file or stdout
    let json = serde_json::to_string_pretty(&Value::Object(context))
        .map_err(|e| AppError::OutputFile(format!("serialization: {}", e)))?;
    if let Some(output_path) = output {
        fs::write(output_path, format!("{}\n", json)).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        eprintln!(
            "processed {} publication(s) from {} file(s), wrote {}",
            report.entries,
            report.loaded.len(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", json)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

/// Reads page metadata, keeping string values only.
fn load_metadata(path: &Path) -> Result<Metadata, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Metadata(format!("'{}': {}", path.display(), e)))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| AppError::Metadata(format!("'{}': {}", path.display(), e)))?;
    let object = match value {
        Value::Object(object) => object,
        _ => {
            return Err(AppError::Metadata(format!(
                "'{}': metadata must be a JSON object",
                path.display()
            )))
        }
    };
    Ok(object
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect())
}

/// List available builtin citation styles.
fn styles_command() {
    for name in builtin_style_names() {
        println!("{}", name);
    }
}
