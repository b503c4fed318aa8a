//! Locale-aware (ru-RU) number and date formatting.
//!
//! Grouping uses U+00A0 the same way browsers render `ru-RU` numbers, so
//! formatted amounts never wrap inside a report cell.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Group separator used by the ru-RU locale.
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Decimal separator used by the ru-RU locale.
pub const DECIMAL_SEPARATOR: char = ',';

/// Currency sign appended to formatted amounts.
pub const CURRENCY_SIGN: &str = "₽";

/// Formats an amount as rubles with exactly two fraction digits.
///
/// `1000` becomes `"1 000,00 ₽"` (with non-breaking spaces).
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let mut digits = rounded.abs().to_string();
    match digits.find('.') {
        None => digits.push_str(".00"),
        Some(dot) => {
            for _ in (digits.len() - dot - 1)..2 {
                digits.push('0');
            }
        }
    }

    format!(
        "{}{GROUP_SEPARATOR}{CURRENCY_SIGN}",
        localize(&digits, rounded.is_sign_negative() && !rounded.is_zero())
    )
}

/// Formats a plain number with ru-RU grouping and without trailing zeros.
#[must_use]
pub fn format_number(value: Decimal) -> String {
    let normalized = value.normalize();
    localize(
        &normalized.abs().to_string(),
        normalized.is_sign_negative() && !normalized.is_zero(),
    )
}

/// Formats a date as `dd.mm.yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Formats a timestamp as `dd.mm.yyyy, HH:MM`.
#[must_use]
pub fn format_datetime(at: NaiveDateTime) -> String {
    at.format("%d.%m.%Y, %H:%M").to_string()
}

/// Parses a date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep the calendar date written in them, without shifting zones.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Inserts group separators into an unsigned `123456.78` string and swaps the
/// decimal point for the locale's separator.
fn localize(unsigned: &str, negative: bool) -> String {
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(unsigned.len() + int_part.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "0,00\u{a0}₽")]
    #[case(dec!(999), "999,00\u{a0}₽")]
    #[case(dec!(1000), "1\u{a0}000,00\u{a0}₽")]
    #[case(dec!(1234567.5), "1\u{a0}234\u{a0}567,50\u{a0}₽")]
    #[case(dec!(10.005), "10,01\u{a0}₽")]
    #[case(dec!(-2500), "-2\u{a0}500,00\u{a0}₽")]
    #[case(dec!(-0.001), "0,00\u{a0}₽")]
    fn test_format_money(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_money(amount), expected);
    }

    #[rstest]
    #[case(dec!(0), "0")]
    #[case(dec!(12.50), "12,5")]
    #[case(dec!(100000), "100\u{a0}000")]
    #[case(dec!(-1000.25), "-1\u{a0}000,25")]
    fn test_format_number(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "07.03.2024");
    }

    #[test]
    fn test_format_datetime() {
        let at = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_datetime(at), "31.12.2024, 09:05");
    }

    #[rstest]
    #[case("2024-05-01", Some((2024, 5, 1)))]
    #[case("2024-05-01T23:30:00+03:00", Some((2024, 5, 1)))]
    #[case("2024-05-01T10:00:00Z", Some((2024, 5, 1)))]
    #[case("2024-05-01T10:00:00.123456", Some((2024, 5, 1)))]
    #[case("", None)]
    #[case("01.05.2024", None)]
    fn test_parse_date(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(parse_date(raw), expected);
    }
}
