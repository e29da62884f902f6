//! Shared types, error model, and configuration for internparse.
//!
//! This crate is the foundation depended on by all other internparse crates.
//! It provides:
//! - [`InternParseError`]: the unified error type
//! - Domain types ([`PostingId`], [`Currency`], [`WorkingHours`], [`PostingStatus`])
//! - Configuration ([`AppConfig`], [`MatcherConfig`], [`BatchConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BatchConfig, BatchSection, MatcherConfig, MatcherSection, OutputSection,
    TaxonomySection, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{InternParseError, Result};
pub use types::{
    Currency, PLACEHOLDER_VALUE, PayPeriod, PostingId, PostingStatus, WorkingHours,
    is_blank_value,
};
