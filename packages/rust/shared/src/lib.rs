//! Shared types, error model, and configuration for the Congreso normalizers.
//!
//! This crate is the foundation depended on by all other workspace crates.
//! It provides:
//! - [`CongresoError`]: the unified error type
//! - Normalized output shapes ([`NormalizedInitiative`], [`DetailRecord`], [`AuthorRef`], ...)
//! - Configuration ([`AppConfig`], [`ExtractOptions`], config loading)
//! - Term code conversion ([`roman`])

pub mod config;
pub mod error;
pub mod roman;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DetailConfig, ExtractOptions, ListingConfig, config_dir, config_file_path,
    init_config, init_config_at, load_config, load_config_from,
};
pub use error::{CongresoError, Result};
pub use roman::{int_to_roman, parse_term_code, roman_to_int};
pub use types::{
    AuthorRef, Boe, Bulletin, CompetentCommission, DetailRecord, Diary, ListingPage,
    NormalizedInitiative, Term, TopologyData, TramitationEvent,
};
