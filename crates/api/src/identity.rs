//! Acting-identity extraction from the request.

use axum::http::HeaderMap;

/// Header the upstream proxy sets with the authenticated user, unless
/// overridden via configuration.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-acting-user";

/// Sentinel identity when the header is absent or unreadable.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Extracts the acting identity for event attribution.
///
/// Pure function over the request headers. Always total: a missing or
/// non-UTF-8 header yields the [`UNKNOWN_IDENTITY`] sentinel, never an
/// error, so every emitted event carries a `created_by` value.
pub fn extract_identity(headers: &HeaderMap, header: &str) -> String {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_IDENTITY)
        .to_string()
}
