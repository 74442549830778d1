//! `storefront-core` — presentation building blocks for the storefront page.
//!
//! This crate contains **pure** logic (no IO, no HTTP): number formatting,
//! product records and card rendering. Transport and view wiring live in
//! `storefront-client`.

pub mod card;
pub mod error;
pub mod id;
pub mod number;
pub mod product;
pub mod stats;

pub use card::ProductCard;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use number::{format_count, format_raw, parse_lenient};
pub use product::Product;
pub use stats::{StatElement, StatKind, hydrate_stats};
