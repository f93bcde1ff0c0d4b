//! Parsing of presign expiry strings such as `10m`, `1h30m` or `1.5h`.

use std::time::Duration;

use crate::errors::BotError;

const NANOS_PER_SEC: u128 = 1_000_000_000;

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 3600 * NANOS_PER_SEC),
];

/// Parses a span made of `<number><unit>` segments, e.g. `2h45m` or `300ms`.
///
/// A bare `0` is accepted. Negative spans are rejected: an expiry in the
/// past cannot be signed.
///
/// # Errors
///
/// Returns `BotError::ArgumentError` if the string is empty, malformed, uses
/// an unknown unit, overflows, or is negative.
pub fn parse_duration(input: &str) -> Result<Duration, BotError> {
    let invalid = || BotError::ArgumentError(format!("invalid duration `{input}`"));

    let (negative, mut rest) = match input.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, after_number) = rest.split_at(number_len);

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(invalid)?;

        let segment = scale_number(number, scale).ok_or_else(invalid)?;
        total_nanos = total_nanos.checked_add(segment).ok_or_else(invalid)?;
        rest = remaining;
    }

    if negative && total_nanos > 0 {
        return Err(BotError::ArgumentError(format!(
            "duration `{input}` is negative"
        )));
    }

    let secs = u64::try_from(total_nanos / NANOS_PER_SEC).map_err(|_| invalid())?;
    let nanos = u32::try_from(total_nanos % NANOS_PER_SEC).map_err(|_| invalid())?;
    Ok(Duration::new(secs, nanos))
}

/// `<int>[.<frac>]` multiplied by `scale` nanoseconds, fraction truncated.
fn scale_number(number: &str, scale: u128) -> Option<u128> {
    let (whole, fraction) = match number.split_once('.') {
        Some((w, f)) => (w, f),
        None => (number, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole_value: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole_value.checked_mul(scale)?;

    if !fraction.is_empty() {
        // Digits beyond nanosecond precision cannot change the result.
        let digits = &fraction[..fraction.len().min(18)];
        let fraction_value: u128 = digits.parse().ok()?;
        let divisor = 10_u128.checked_pow(u32::try_from(digits.len()).ok()?)?;
        nanos = nanos.checked_add(fraction_value.checked_mul(scale)? / divisor)?;
    }

    Some(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_single_units() {
        assert_eq!(parse_duration("10m").unwrap(), Duration::from_secs(600));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("300ms").unwrap(), Duration::from_millis(300));
    }

    #[test]
    fn test_parses_compound_and_fractional_spans() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("+5m").unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_parses_sub_second_fractions_exactly() {
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("250us").unwrap(), Duration::from_micros(250));
    }

    #[test]
    fn test_accepts_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_rejects_negative_spans() {
        let err = parse_duration("-5m").unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_rejects_malformed_input() {
        for input in ["", "10", "m", "10x", "ten minutes", "1..5h", "5m-", "."] {
            assert!(parse_duration(input).is_err(), "accepted {input:?}");
        }
    }
}
