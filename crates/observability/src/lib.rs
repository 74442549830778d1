//! Log setup for the storefront client binaries.

/// Log at `info` and above unless `RUST_LOG` says otherwise.
///
/// Repeat calls leave the first subscriber in place.
pub fn init() {
    tracing::init("info");
}

/// Subscriber construction.
pub mod tracing;
