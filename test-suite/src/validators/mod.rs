//! PDF Validators
//!
//! This module contains validators for checking generated files.

pub mod content_validator;
pub mod structure_validator;

pub use content_validator::{ContentOperation, ContentValidationReport, ContentValidator};
pub use structure_validator::{ParsedPdf, StructureReport, StructureValidator};
