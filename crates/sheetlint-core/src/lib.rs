//! # sheetlint-core
//!
//! Core framework for stylesheet linting.
//!
//! This crate provides the foundational traits and types for building
//! stylesheet lint rules. It includes:
//!
//! - [`ast`] with a raw-preserving parser, selector sub-parser and traversal
//! - [`Rule`] trait for per-file rules
//! - [`options`] for validating a rule's primary and secondary options
//! - [`Reporter`] for emitting precisely-located [`Violation`]s
//! - [`Analyzer`] for orchestrating lint execution
//!
//! ## Example
//!
//! ```ignore
//! use sheetlint_core::{Analyzer, RuleOptions};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./styles")
//!     .rule_with_options(FontWeightNotation::default(), RuleOptions::new("numeric"))
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod report;
mod rule;
mod types;

pub mod ast;
pub mod options;
pub mod reference;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use ast::{NodeKind, Root};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use options::RuleOptions;
pub use reference::KeywordSets;
pub use report::Reporter;
pub use rule::{Rule, RuleBox};
pub use types::{
    LintResult, Location, RuleMessage, Severity, Suggestion, Violation, ViolationDiagnostic,
    ViolationKind,
};
pub use utils::allowance::AllowCheck;
