//! # reel-catalog
//!
//! Outbound catalog access for reelfinder:
//!
//! - Title catalog client (autocomplete, person filmographies, curated lists)
//! - Title details client (supplementary fields by IMDb id)
//! - Static snapshot source for offline operation
//! - Live gathering strategy over the catalog client
//! - Best-effort enrichment with per-field fallbacks

pub mod client;
pub mod details;
pub mod enrich;
pub mod gather;
pub mod snapshot;

// Re-export core types
pub use reel_core::*;

pub use client::{CatalogClient, CatalogConfig};
pub use details::{DetailsClient, DetailsConfig, TitleDetails};
pub use enrich::Enricher;
pub use gather::LiveSource;
pub use snapshot::CatalogSnapshot;
