//! Generate Test PDFs
//!
//! This binary writes every reference document into the fixtures directory,
//! or into the directory given as the first argument.

use anyhow::Result;
use quill_pdf_test_suite::generators::generate_all;
use quill_pdf_test_suite::utils::fixtures_dir;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| fixtures_dir().join("generated"));

    println!("Generating test PDFs in {}...", output_dir.display());
    generate_all(&output_dir)?;
    println!("Test PDF generation complete!");
    Ok(())
}
