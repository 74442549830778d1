//! `storefront-client`
//!
//! **Responsibility:** the interactive half of the storefront product page.
//!
//! This crate provides:
//! - The transport seam to the storefront backend ([`StorefrontApi`])
//! - "View more" pagination of the top-rated grid
//! - Add-to-cart submission with an optimistic cart counter
//!
//! The page itself is abstracted behind the traits in [`view`]; the backend
//! stays the authority for catalog and cart state.

pub mod api;
pub mod cart;
pub mod config;
pub mod cookies;
pub mod paginator;
pub mod view;

pub use api::{ApiError, CartRequest, CartResponse, HttpStorefrontApi, StorefrontApi};
pub use cart::{CartActionHandler, CartError, CartOutcome, TriggerEvent};
pub use config::ClientConfig;
pub use cookies::csrf_token_from_cookies;
pub use paginator::{LoadError, LoadOutcome, LoadPhase, ProductListPaginator};
