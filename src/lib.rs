//! Typed edge-list preparation for graph mining.

pub mod error;
pub mod extractor;
pub mod filter;
pub mod packed;
pub mod types;
