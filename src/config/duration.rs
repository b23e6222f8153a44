//! Duration strings such as `"30s"`, `"1m30s"` or `"1.5h"`.
//!
//! A duration is an optional sign followed by one or more `<number><unit>`
//! groups. Numbers may be fractional. Units are `ns`, `us` (or `µs`), `ms`,
//! `s`, `m` and `h`. The bare string `"0"` is the only unit-less value.

use std::time::Duration;

use thiserror::Error;

/// Error type for duration parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration '{input}': {reason}")]
pub struct DurationError {
    /// The rejected input
    pub input: String,
    /// What was wrong with it
    pub reason: &'static str,
}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

// Same ceiling as a signed 64-bit nanosecond count (about 292 years).
const MAX_NANOS: u128 = i64::MAX as u128;

// Fraction digits beyond this cannot change the nanosecond total of any unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses a duration string.
///
/// # Errors
///
/// Returns [`DurationError`] for empty input, a missing or unknown unit,
/// a negative value, or a value that overflows.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = |reason| DurationError {
        input: input.to_string(),
        reason,
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_end = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, next) = after.split_at(unit_end);
        if unit.is_empty() {
            return Err(invalid("missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| invalid("unknown unit"))?;

        let group = group_nanos(whole, fraction, scale).ok_or_else(|| invalid("overflow"))?;
        total = total
            .checked_add(group)
            .filter(|t| *t <= MAX_NANOS)
            .ok_or_else(|| invalid("overflow"))?;

        rest = next;
    }

    if negative && total > 0 {
        return Err(invalid("negative durations are not allowed"));
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| invalid("overflow"))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SECOND,
        "m" => 60 * NANOS_PER_SECOND,
        "h" => 3600 * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(nanos)
}

fn group_nanos(whole: &str, fraction: &str, scale: u128) -> Option<u128> {
    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let mut nanos = whole_value.checked_mul(scale)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let numerator: u128 = fraction.parse().ok()?;
        let denominator = 10u128.pow(u32::try_from(fraction.len()).ok()?);
        nanos = nanos.checked_add(numerator * scale / denominator)?;
    }

    Some(nanos)
}
