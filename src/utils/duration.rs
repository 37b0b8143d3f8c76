//! Parser for the `expires_in` field of create requests.
//!
//! Accepts a sequence of `<number><unit>` pairs such as `90s`, `1h30m` or
//! `1.5h`. Units go up to hours: `ns`, `us` (`µs`), `ms`, `s`, `m`, `h`.
//! Day and year suffixes (`30d`, `1y`) are rejected; callers wanting a month
//! write `720h`.

use chrono::Duration;

use crate::application::errors::LinkError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this are ignored.
const MAX_FRACTION_DIGITS: usize = 18;

fn invalid(input: &str, reason: impl std::fmt::Display) -> LinkError {
    LinkError::InvalidDuration(format!("time: {reason} in duration \"{input}\""))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Splits the leading run of characters matching `pred`.
fn split_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses a duration string.
///
/// # Errors
///
/// Returns [`LinkError::InvalidDuration`] for empty or negative input, a
/// missing or unknown unit, or a value that does not fit in a [`Duration`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_duration("1h30m")?, Duration::minutes(90));
/// assert!(parse_duration("30d").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, LinkError> {
    let mut rest = input;

    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    } else if rest.starts_with('-') {
        return Err(invalid(input, "negative durations are not allowed"));
    }

    if rest.is_empty() {
        return Err(invalid(input, "empty value"));
    }

    if rest == "0" {
        return Ok(Duration::zero());
    }

    let mut total: u128 = 0;

    while !rest.is_empty() {
        let (whole, after_whole) = split_while(rest, |c| c.is_ascii_digit());
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_while(after_dot, |c| c.is_ascii_digit()),
            None => ("", after_whole),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid(input, "invalid number"));
        }

        let (unit, after_unit) = split_while(after_number, |c| !c.is_ascii_digit() && c != '.');
        if unit.is_empty() {
            return Err(invalid(input, "missing unit"));
        }

        let Some(scale) = unit_nanos(unit) else {
            return Err(match unit {
                "d" | "w" | "y" => invalid(
                    input,
                    format!("unit \"{unit}\" is not supported, use hours (e.g. \"720h\")"),
                ),
                _ => invalid(input, format!("unknown unit \"{unit}\"")),
            });
        };

        let whole_value: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| invalid(input, "number out of range"))?
        };

        let mut nanos = whole_value
            .checked_mul(scale)
            .ok_or_else(|| invalid(input, "value out of range"))?;

        let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
        if !fraction.is_empty() {
            let fraction_value: u128 = fraction
                .parse()
                .map_err(|_| invalid(input, "invalid number"))?;
            let exponent = u32::try_from(fraction.len()).unwrap_or(u32::MAX);
            nanos = nanos
                .checked_add(fraction_value * scale / 10u128.pow(exponent))
                .ok_or_else(|| invalid(input, "value out of range"))?;
        }

        total = total
            .checked_add(nanos)
            .ok_or_else(|| invalid(input, "value out of range"))?;
        rest = after_unit;
    }

    let nanos = i64::try_from(total).map_err(|_| invalid(input, "value out of range"))?;

    Ok(Duration::nanoseconds(nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse_duration("10s").unwrap(), Duration::seconds(10));
        assert_eq!(parse_duration("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_duration("720h").unwrap(), Duration::days(30));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::milliseconds(250));
        assert_eq!(parse_duration("3us").unwrap(), Duration::microseconds(3));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::nanoseconds(7));
    }

    #[test]
    fn test_parse_compound_and_fractional() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::seconds(30));
        assert_eq!(
            parse_duration("2h45m30s").unwrap(),
            Duration::seconds(2 * 3600 + 45 * 60 + 30)
        );
        assert_eq!(parse_duration("+1h").unwrap(), Duration::hours(1));
        assert_eq!(parse_duration("0").unwrap(), Duration::zero());
    }

    #[test]
    fn test_rejects_day_and_year_units() {
        for input in ["30d", "1y", "2w", "1d12h"] {
            let err = parse_duration(input).unwrap_err();
            assert!(matches!(err, LinkError::InvalidDuration(_)), "{input}");
            assert!(err.to_string().contains("not supported"), "{input}");
        }
    }

    #[test]
    fn test_rejects_malformed_input() {
        for input in ["", "h", "10", "abc", "1h30", "1x", "-1h", "1..5h", "+"] {
            assert!(
                matches!(parse_duration(input), Err(LinkError::InvalidDuration(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(parse_duration("99999999999999999999h").is_err());
        assert!(parse_duration("3000000h").is_err());
    }

    #[test]
    fn test_rejects_overflow_in_fraction() {
        let err = parse_duration("94522879700260684295381835.9h").unwrap_err();
        assert!(matches!(err, LinkError::InvalidDuration(_)));
        assert!(err.to_string().contains("out of range"));
    }
}
