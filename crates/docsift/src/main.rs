//! # docsift CLI
//!
//! Command-line interface for docsift, a document content extraction engine.
//!
//! docsift pulls plain text out of PDF, DOCX, HTML, XML and TXT documents,
//! whether they sit on disk, behind a URL, inside a data URL, or behind a
//! Google Docs, Google Drive, Dropbox or OneDrive share link.
//!
//! ## Commands
//!
//! - `docsift extract <INPUT>` - Extract text from a file, URL or data URL
//! - `docsift detect <PATH>` - Report the format a file's bytes look like
//! - `docsift config show|init|path` - Inspect configuration
//!
//! ## Examples
//!
//! ```bash
//! # Extract a local PDF
//! docsift extract ~/Documents/report.pdf
//!
//! # Extract a shared Google Doc as JSON, cleaned up and capped at 2000 chars
//! docsift --format json extract "https://docs.google.com/document/d/ID/edit" \
//!     --cleanup --max-length 2000
//!
//! # Extract using a full document reference
//! docsift extract https://cdn.example.com/blob --reference '{"fileName":"a.docx"}'
//! ```

use anyhow::{Context, Result, bail};
use base64::{Engine as _, engine::general_purpose};
use clap::{Parser, Subcommand};
use docsift_core::{DocumentFormat, DocumentReference, ExtractionOptions, ExtractionOutput};
use docsift_pipeline::ExtractionPipeline;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Extract plain text from documents wherever they live")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/docsift/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Bearer token for generic downloads (overrides the config file)
    #[arg(long, global = true, env = "DOCSIFT_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a document
    Extract {
        /// Local file path, http(s) URL, or data URL
        input: String,

        /// File name reported in the output (defaults to the local file's name)
        #[arg(short, long)]
        name: Option<String>,

        /// Additional document reference fields as JSON
        #[arg(short, long)]
        reference: Option<String>,

        /// Normalise whitespace and punctuation spacing
        #[arg(long)]
        cleanup: bool,

        /// Truncate text to this many characters (0 = unlimited)
        #[arg(short, long)]
        max_length: Option<usize>,

        /// Omit format metadata
        #[arg(long)]
        no_metadata: bool,
    },

    /// Detect a file's format from its leading bytes
    Detect {
        /// File to inspect
        path: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print sample configuration file
    Init,
    /// Show config file path
    Path,
}

/// Output structure for detection.
#[derive(Serialize)]
struct DetectOutput {
    path: String,
    detected: DocumentFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_extension: Option<DocumentFormat>,
    size_bytes: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(token) = cli.auth_token.clone() {
        config.fetch.auth_token = Some(token);
    }

    init_logging(&config, cli.verbose)?;

    match cli.command {
        Commands::Extract {
            input,
            name,
            reference,
            cleanup,
            max_length,
            no_metadata,
        } => {
            let reference = build_reference(&input, name, reference.as_deref()).await?;

            let mut options = config.extraction_options();
            if cleanup {
                options.cleanup_text = true;
            }
            if let Some(max) = max_length {
                options.max_text_length = max;
            }
            if no_metadata {
                options.extract_metadata = false;
            }

            let pipeline = ExtractionPipeline::from_fetch_config(config.fetch_config())
                .context("Failed to create extraction pipeline")?;

            info!("Extracting {}", reference.label());
            let output = pipeline
                .extract(&reference, &options)
                .await
                .with_context(|| format!("Failed to extract {}", display_input(&input)))?;

            print_output(&output, cli.format, &options)?;
        }

        Commands::Detect { path } => {
            let data = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let output = DetectOutput {
                path: path.display().to_string(),
                detected: DocumentFormat::sniff(&data),
                by_extension: path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(DocumentFormat::from_extension),
                size_bytes: data.len() as u64,
            };

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    println!("{}: {}", output.path, output.detected);
                    if let Some(declared) = output.by_extension {
                        if declared != output.detected {
                            println!("   Extension suggests {declared}");
                        }
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let shown = config.redacted();
                match cli.format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&shown)
                                .context("Failed to serialize config")?
                        );
                    }
                    OutputFormat::Text => {
                        println!(
                            "{}",
                            toml::to_string_pretty(&shown)
                                .context("Failed to serialize config")?
                        );
                    }
                }
            }
            ConfigAction::Init => {
                println!("{}", Config::sample_toml());
            }
            ConfigAction::Path => {
                if let Some(path) = Config::config_path() {
                    println!("{}", path.display());
                } else {
                    println!("Could not determine config directory");
                }
            }
        },
    }

    Ok(())
}

/// Install the global tracing subscriber.
fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        config
            .logging
            .level
            .parse::<Level>()
            .unwrap_or(Level::INFO)
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    let installed = match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    installed.context("Failed to set tracing subscriber")
}

/// Turn the `extract` input into a document reference.
///
/// URLs and data URLs become `src` as-is; anything else is read from disk and
/// embedded as base64.
async fn build_reference(
    input: &str,
    name: Option<String>,
    reference_json: Option<&str>,
) -> Result<DocumentReference> {
    let mut reference: DocumentReference = match reference_json {
        Some(json) => serde_json::from_str(json).context("Invalid --reference JSON")?,
        None => DocumentReference::default(),
    };

    if is_remote(input) {
        reference.src = Some(input.to_string());
    } else {
        let path = Path::new(input);
        if !path.is_file() {
            bail!("Input is neither a URL nor a readable file: {input}");
        }
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Read {} bytes from {}", data.len(), path.display());

        if reference.file_name.is_none() {
            reference.file_name = path
                .file_name()
                .map(|file_name| file_name.to_string_lossy().into_owned());
        }
        reference.size_bytes = Some(i64::try_from(data.len()).unwrap_or(i64::MAX));
        reference.src = Some(general_purpose::STANDARD.encode(&data));
    }

    if let Some(name) = name {
        reference.file_name = Some(name);
    }

    Ok(reference)
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://") || input.starts_with("data:")
}

/// Shorten data URLs for error messages.
fn display_input(input: &str) -> String {
    if input.starts_with("data:") {
        let header = input.split(',').next().unwrap_or(input);
        format!("{header},...")
    } else {
        input.to_string()
    }
}

fn print_output(
    output: &ExtractionOutput,
    format: OutputFormat,
    options: &ExtractionOptions,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(output)?);
        }
        OutputFormat::Text => {
            let name = if output.filename.is_empty() {
                "<unnamed>"
            } else {
                output.filename.as_str()
            };
            println!(
                "{} ({}, {} words, {} chars)",
                name, output.format, output.word_count, output.character_count
            );
            if options.extract_metadata {
                if let Some(metadata) = &output.metadata {
                    println!("   Metadata: {}", serde_json::to_string(metadata)?);
                }
            }
            println!();
            println!("{}", output.text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a.pdf"));
        assert!(is_remote("http://example.com/a.pdf"));
        assert!(is_remote("data:text/plain;base64,aGk="));
        assert!(!is_remote("./notes.txt"));
        assert!(!is_remote("httpfile.txt"));
    }

    #[test]
    fn test_display_input_hides_data_payload() {
        assert_eq!(
            display_input("data:text/plain;base64,aGVsbG8="),
            "data:text/plain;base64,..."
        );
        assert_eq!(display_input("https://a.example/x"), "https://a.example/x");
    }

    #[tokio::test]
    async fn test_build_reference_from_local_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let reference = build_reference(path.to_str().unwrap(), None, None)
            .await
            .unwrap();

        assert_eq!(reference.file_name.as_deref(), Some("notes.txt"));
        assert_eq!(reference.size_bytes, Some(5));
        assert_eq!(reference.src.as_deref(), Some("aGVsbG8="));
        assert_eq!(reference.declared_extension().as_deref(), Some("txt"));
    }

    #[tokio::test]
    async fn test_build_reference_merges_json_and_name() {
        let reference = build_reference(
            "https://cdn.example/blob",
            Some("report.pdf".to_string()),
            Some(r#"{"extension": "pdf", "sizeBytes": 42}"#),
        )
        .await
        .unwrap();

        assert_eq!(reference.src.as_deref(), Some("https://cdn.example/blob"));
        assert_eq!(reference.file_name.as_deref(), Some("report.pdf"));
        assert_eq!(reference.extension.as_deref(), Some("pdf"));
        assert_eq!(reference.size_bytes, Some(42));
    }

    #[tokio::test]
    async fn test_build_reference_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.pdf");
        assert!(build_reference(missing.to_str().unwrap(), None, None).await.is_err());
    }

    #[tokio::test]
    async fn test_build_reference_invalid_json() {
        let result = build_reference("https://a.example/x", None, Some("{not json")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_extract_flags() {
        let cli = Cli::try_parse_from([
            "docsift",
            "--format",
            "json",
            "extract",
            "doc.pdf",
            "--cleanup",
            "--max-length",
            "100",
            "--no-metadata",
        ])
        .unwrap();

        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Extract {
                input,
                cleanup,
                max_length,
                no_metadata,
                ..
            } => {
                assert_eq!(input, "doc.pdf");
                assert!(cleanup);
                assert_eq!(max_length, Some(100));
                assert!(no_metadata);
            }
            _ => panic!("Expected extract command"),
        }
    }
}
