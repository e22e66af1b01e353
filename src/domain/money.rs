use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For EUR/USD, 1 unit = 100 cents, so a 0.05 payment = 5 cents.
pub type Cents = i64;

/// Format cents as a human-readable currency string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    // unsigned_abs: i64::MIN has no i64 absolute value
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
///
/// Only plain decimal notation is accepted: an optional leading minus,
/// ASCII digits, at most one dot. Anything past two decimal places is
/// truncated. Amounts that do not fit in [`Cents`] are an error, not a
/// wraparound — this parser sits on the wire path and must never panic.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimal_str) = match unsigned.split_once('.') {
        Some((units, decimal)) => (units, decimal),
        None => (unsigned, ""),
    };

    // Each part must be pure ASCII digits; this rejects embedded signs,
    // a second dot, and multibyte characters in one place.
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(units_str) || !is_digits(decimal_str) {
        return Err(ParseCentsError::InvalidFormat);
    }
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::OutOfRange)?
    };

    // Pad or truncate the decimal part to two digits. Slicing is safe:
    // the digit check above guarantees single-byte characters.
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().unwrap_or(0) * 10,
        _ => decimal_str[..2].parse().unwrap_or(0),
    };

    let magnitude = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::OutOfRange)?;

    Ok(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::OutOfRange => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

/// Serde representation for monetary amounts: exact decimal strings on the
/// wire ("0.05"), integer cents in memory. Use with `#[serde(with = "serde_cents")]`.
pub mod serde_cents {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Cents, format_cents, parse_cents};

    pub fn serialize<S>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_cents(*cents))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Cents, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_cents(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(100), "1.00");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_format_cents_extremes() {
        assert_eq!(format_cents(i64::MAX), "92233720368547758.07");
        assert_eq!(format_cents(i64::MIN), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.34"), Ok(1234));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents("0.05"), Ok(5));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("12."), Ok(1200));
        assert_eq!(parse_cents(" 7.25 "), Ok(725));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents("100.999"), Ok(10099)); // Truncates
    }

    #[test]
    fn test_parse_cents_rejects_garbage() {
        assert_eq!(parse_cents("abc"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents(""), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("."), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("-"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(
            parse_cents("12.34.56"),
            Err(ParseCentsError::InvalidFormat)
        );
    }

    #[test]
    fn test_parse_cents_rejects_embedded_signs() {
        // i64::from_str would happily take these fragments
        assert_eq!(parse_cents("1.-5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("--5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("+5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1.+5"), Err(ParseCentsError::InvalidFormat));
    }

    #[test]
    fn test_parse_cents_rejects_multibyte_input_without_panicking() {
        assert_eq!(parse_cents("1.€50"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("€1.50"), Err(ParseCentsError::InvalidFormat));
    }

    #[test]
    fn test_parse_cents_rejects_overflow() {
        assert_eq!(
            parse_cents("922337203685477581"),
            Err(ParseCentsError::OutOfRange)
        );
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::OutOfRange)
        );
        // Largest representable amount still parses
        assert_eq!(parse_cents("92233720368547758.07"), Ok(i64::MAX));
    }
}
