//! Test Suite for quill-pdf
//!
//! This crate provides the testing infrastructure for checking generated
//! files: a structural reader for the object layout and cross-reference
//! table, a content stream validator and a set of reference documents.

pub mod generators;
pub mod validators;

pub use generators::scenarios::{Scenario, SCENARIOS};
pub use validators::{ContentValidator, ParsedPdf, StructureValidator};

/// Common test utilities
pub mod utils {
    use std::path::PathBuf;

    /// Get the path to the test fixtures directory
    pub fn fixtures_dir() -> PathBuf {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        PathBuf::from(manifest_dir).join("fixtures")
    }

    /// Create a temporary directory for test outputs
    pub fn create_test_output_dir() -> anyhow::Result<tempfile::TempDir> {
        Ok(tempfile::tempdir()?)
    }

    /// Route `tracing` output to the test writer; safe to call repeatedly
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}
