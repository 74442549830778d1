//! Client configuration from environment variables.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::cookies::csrf_token_from_cookies;
use crate::paginator::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings for the storefront client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the storefront backend.
    pub api_url: String,
    /// Raw cookie string scanned for the CSRF token.
    pub cookie: Option<String>,
    /// Full page size; a shorter page means the listing is exhausted.
    pub page_size: usize,
    pub timeout: Duration,
    /// Also show a notice after a successful add-to-cart.
    pub announce_success: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cookie: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            announce_success: false,
        }
    }
}

impl ClientConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (environment, file, test map).
    ///
    /// Missing or invalid values fall back to defaults with a log line.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup("STOREFRONT_API_URL").unwrap_or_else(|| {
            tracing::warn!("STOREFRONT_API_URL not set; using {}", defaults.api_url);
            defaults.api_url.clone()
        });

        let cookie = lookup("STOREFRONT_COOKIE").filter(|c| !c.trim().is_empty());
        if cookie.is_none() {
            tracing::info!("STOREFRONT_COOKIE not set; requests carry no CSRF token");
        }

        let page_size = parse_or(&lookup, "STOREFRONT_PAGE_SIZE", defaults.page_size);
        let page_size = if page_size == 0 {
            tracing::warn!("STOREFRONT_PAGE_SIZE must be positive; using {DEFAULT_PAGE_SIZE}");
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        let timeout_secs = parse_or(&lookup, "STOREFRONT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let announce_success =
            parse_or(&lookup, "STOREFRONT_ANNOUNCE_SUCCESS", defaults.announce_success);

        Self {
            api_url,
            cookie,
            page_size,
            timeout: Duration::from_secs(timeout_secs),
            announce_success,
        }
    }

    /// CSRF token from the configured cookie string.
    pub fn csrf_token(&self) -> Option<String> {
        self.cookie.as_deref().and_then(csrf_token_from_cookies)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("invalid {key} value {raw:?}: {e}; using default {default}");
            default
        }),
    }
}
