//! PDF Test Generators
//!
//! This module builds reference documents through the public API.

pub mod scenarios;

pub use scenarios::{generate_all, Scenario, SCENARIOS};
