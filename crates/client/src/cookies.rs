//! Cookie string lookup (`document.cookie` format).

use percent_encoding::percent_decode_str;

/// Name of the cookie holding the CSRF token.
pub const CSRF_COOKIE: &str = "csrf_token";

/// Value of the first cookie called `name`, percent-decoded.
///
/// `cookies` is a `;`-separated list of `name=value` pairs. Entries are
/// trimmed before matching; names are case-sensitive.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|entry| {
            entry
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// CSRF token issued by the backend, if the cookie is present.
pub fn csrf_token_from_cookies(cookies: &str) -> Option<String> {
    cookie_value(cookies, CSRF_COOKIE)
}
