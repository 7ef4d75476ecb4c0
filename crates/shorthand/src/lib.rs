//! Shorthand category generation for prefixed Objective-C libraries
//!
//! This crate provides functionality to:
//! - Scan a source tree for `Object+Category.h` headers
//! - Classify declaration lines via the documented regex patterns
//! - Generate a shorthand header/implementation pair where every
//!   unprefixed method forwards to its prefixed counterpart
//! - Annotate the original headers with deprecation macros

pub mod classify;
pub mod config;
pub mod error;
pub mod generate;
pub mod render;
pub mod scanner;

pub use classify::{classify_line, Declaration, MethodSig};
pub use config::ShorthandConfig;
pub use error::{Result, ShorthandError};
pub use generate::{FileOutcome, GenerationReport, Generator, SkipReason};

/// Reserved method-name prefix marking library methods
pub const RESERVED_PREFIX: &str = "MR_";

/// Macro token marking an already-deprecated declaration
pub const DEPRECATION_MARKER: &str = "MRDeprecated";

/// Feature flag wrapping the generated files
pub const SHORTHAND_FLAG: &str = "MR_SHORTHAND";

/// Suffix appended to the category name in generated interfaces
pub const SHORTHAND_CATEGORY_SUFFIX: &str = "ShortHand";

/// Type substring forcing an iOS-only compile guard around a declaration
pub const PLATFORM_CONDITIONAL_TYPE: &str = "FetchedResultsController";

/// Filename pattern for category headers
pub const CATEGORY_HEADER_GLOB: &str = "*+*.h";
