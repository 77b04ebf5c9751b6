//! # AMDB Common Library
//!
//! Shared code for the AMDB admin client including:
//! - Wire models for names, lineups, song credits and autocomplete results
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
