//! Client identification utilities
//!
//! Common functions for reading client identity out of HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Why a bearer credential could not be read from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Authorization header is required")]
    Missing,

    #[error("Authorization header format must be 'Bearer <token>'")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header
///
/// The header must consist of exactly two space-separated parts, the
/// first being `Bearer` (any case) and the second a non-empty token.
///
/// ## Returns
/// * `Ok(&str)` - The raw token
/// * `Err(BearerError::Missing)` - No `Authorization` header
/// * `Err(BearerError::Malformed)` - Header present but not a bearer credential
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(BearerError::Malformed),
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
