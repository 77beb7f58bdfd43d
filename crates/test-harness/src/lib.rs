//! Test harness for lumber documents.
//!
//! Scripts multi-step edits against a real host application, checks the
//! result at every step and renders diagnostic reports.
//!
//! # Key Components
//!
//! - [`LumberBuilder`]: Fluent API for building and verifying lumber documents
//! - [`report`]: Structured text document descriptions
//! - [`helpers`]: Error type, unit conversion, mesh math, logging setup
//! - [`assertions`]: Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod report;
pub mod workflow;

pub use helpers::{init_test_logging, HarnessError};
pub use report::DocumentReport;
pub use workflow::LumberBuilder;
