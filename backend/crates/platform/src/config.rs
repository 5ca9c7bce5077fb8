//! Environment Configuration Helpers
//!
//! Typed readers over process environment variables. An unset or empty
//! variable falls back to the supplied default; a present but unparsable
//! value is an error rather than a silent default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Raw value of `key`, treating empty as unset
pub fn env_opt(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Value of `key`, failing when unset
pub fn env_required(key: &'static str) -> Result<String, ConfigError> {
    env_opt(key).ok_or(ConfigError::Missing(key))
}

/// Value of `key` or `default`
pub fn env_or(key: &'static str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Parsed value of `key` or `default`
pub fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value: raw,
        }),
    }
}

/// Duration of `key` (see [`parse_duration`]) or `default`
pub fn env_duration(key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env_opt(key) {
        None => Ok(default),
        Some(raw) => parse_duration(&raw).map_err(|reason| ConfigError::Invalid {
            key,
            value: raw,
            reason,
        }),
    }
}

/// Comma-separated list of `key` or `default`
pub fn env_list(key: &'static str, default: &[&str]) -> Vec<String> {
    match env_opt(key) {
        None => default.iter().map(|s| s.to_string()).collect(),
        Some(raw) => parse_list(&raw),
    }
}

/// Split a comma-separated value, dropping blank entries
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a duration such as `15m`, `168h`, `1h30m`, `1.5h` or `7d`
///
/// A sequence of decimal numbers each followed by a unit: `ns`, `us`
/// (or `µs`), `ms`, `s`, `m`, `h`, `d`. A bare `0` is accepted.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let s = raw.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = 0f64;
    let mut rest = s;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration {s:?}"))?;
        if number_len == 0 {
            return Err(format!("expected a number in duration {s:?}"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| format!("invalid number in duration {s:?}"))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3_600.0 * 1e9,
            "d" => 86_400.0 * 1e9,
            unit => return Err(format!("unknown unit {unit:?} in duration {s:?}")),
        };
        rest = &rest[unit_len..];

        total += value * nanos_per_unit;
    }

    if !total.is_finite() || total > u64::MAX as f64 {
        return Err(format!("duration {s:?} is out of range"));
    }
    Ok(Duration::from_nanos(total.round() as u64))
}
