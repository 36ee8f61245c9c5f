//! Basic example: Extracting text from a local file
//!
//! This example demonstrates how to run the extraction pipeline
//! programmatically on a file from disk.
//!
//! Run with:
//! ```bash
//! cargo run --example extract_file -- /path/to/document.pdf
//! ```

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};
use docsift_core::{DocumentReference, ExtractionOptions, FetchConfig};
use docsift_pipeline::ExtractionPipeline;
use std::env;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file>", args[0]);
        eprintln!("\nExample:");
        eprintln!("  {} ./report.docx", args[0]);
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    if !path.is_file() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data = std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    info!("Read {:?} ({} bytes)", path, data.len());

    // Inline the file as base64, the way an upload would arrive
    let reference = DocumentReference {
        file_name: path.file_name().map(|name| name.to_string_lossy().into_owned()),
        size_bytes: i64::try_from(data.len()).ok(),
        src: Some(general_purpose::STANDARD.encode(&data)),
        ..Default::default()
    };

    let pipeline = ExtractionPipeline::from_fetch_config(FetchConfig::default())?;
    let options = ExtractionOptions {
        cleanup_text: true,
        ..Default::default()
    };
    let output = pipeline.extract(&reference, &options).await?;

    println!("\n=== {} ===", output.filename);
    println!("Format:     {}", output.format);
    println!("Words:      {}", output.word_count);
    println!("Characters: {}", output.character_count);
    if let Some(metadata) = &output.metadata {
        println!("Metadata:   {}", serde_json::to_string(metadata)?);
    }
    println!("\n{}", output.text);

    Ok(())
}
