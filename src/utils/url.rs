//! URL utilities for locating the inference server
//!
//! Base URLs come from the command line, from `OLLAMA_HOST`, or from the
//! built-in default, and may be written loosely (`localhost`, `127.0.0.1:8080`,
//! `http://box:11434/`). Everything is normalized here before endpoints are
//! appended.

use crate::core::constants::DEFAULT_BASE_URL;

const DEFAULT_PORT: u16 = 11434;

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use lochat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:11434"), "http://localhost:11434");
/// assert_eq!(normalize_base_url("http://localhost:11434///"), "http://localhost:11434");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete API endpoint URL from a base URL and endpoint path
///
/// # Examples
///
/// ```
/// use lochat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:11434/", "/api/generate"),
///     "http://localhost:11434/api/generate"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Turn a loosely written host into a base URL: add `http://` when no scheme
/// is given and the default port when no port is given.
pub fn host_to_base_url(host: &str) -> String {
    let host = host.trim();
    let (scheme, rest) = match host.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("http", host),
    };
    let (authority, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };
    let has_port = match authority.rfind(']') {
        // Bracketed IPv6 literal: a port can only follow the bracket.
        Some(bracket) => authority[bracket..].contains(':'),
        None => authority.contains(':'),
    };
    let authority = if has_port || authority.is_empty() || scheme != "http" {
        authority.to_string()
    } else {
        format!("{authority}:{DEFAULT_PORT}")
    };
    normalize_base_url(&format!("{scheme}://{authority}{path}"))
}

/// Pick the base URL: explicit flag first, then the environment, then the
/// built-in default. Blank values are skipped.
pub fn resolve_base_url(flag: Option<&str>, env_value: Option<&str>) -> String {
    flag.into_iter()
        .chain(env_value)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(host_to_base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
