//! # reel-core
//!
//! Core types, traits, and abstractions for the reelfinder pipeline.
//!
//! This crate provides the request-scoped data model, the capability traits
//! the pipeline is assembled from, and the local filtering rules that other
//! reelfinder crates depend on.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod traits;
pub mod vocab;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filter::{apply_filters, apply_rating_floor, apply_theme};
pub use models::*;
pub use traits::*;
pub use vocab::{canonical_genre, language_alias, normalize_language, CANONICAL_GENRES};
