//! JSON log output for the storefront binaries.
//!
//! Records go to stderr; `storefront-browse` prints card HTML on stdout.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber with `default_directive` as the filter.
///
/// A `RUST_LOG` value takes precedence. If a subscriber is already installed
/// (another call, or a test harness) this does nothing.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init("debug");
        super::init("warn");
        ::tracing::info!("still logging after repeated init");
    }
}
