//! Pure display formatting for dates and amounts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// Rendered in place of a value that is absent or unparsable.
pub const PLACEHOLDER: &str = "-";

/// Digit grouping of the integer part of an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567 (last three digits, then pairs)
    #[default]
    Indian,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimals: usize,
    pub grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            decimals: 2,
            grouping: Grouping::Indian,
        }
    }
}

/// Parses a backend transaction date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as
/// UTC) and plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_transaction_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Formats a transaction date as `DD Mon YYYY`, e.g. `10 Jan 2024`.
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_transaction_date)
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_currency(amount: Option<f64>, currency: &CurrencyFormat) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    let fixed = format!("{:.*}", currency.decimals, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    // "-0.00" would read oddly, so the sign is dropped when the rounded value is zero.
    if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&currency.symbol);
    out.push_str(&group_digits(int_part, currency.grouping));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let (head, tail) = if digits.len() > 3 {
        digits.split_at(digits.len() - 3)
    } else {
        return digits.to_string();
    };
    let group = match grouping {
        Grouping::Thousands => 3,
        Grouping::Indian => 2,
    };
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thousands(symbol: &str) -> CurrencyFormat {
        CurrencyFormat {
            symbol: symbol.to_string(),
            decimals: 2,
            grouping: Grouping::Thousands,
        }
    }

    #[test]
    fn date_from_rfc3339() {
        assert_eq!(format_date(Some("2024-01-10T09:30:00.000Z")), "10 Jan 2024");
        assert_eq!(format_date(Some("2024-03-05T23:00:00+00:00")), "05 Mar 2024");
    }

    #[test]
    fn date_from_naive_forms() {
        assert_eq!(format_date(Some("2024-01-10")), "10 Jan 2024");
        assert_eq!(format_date(Some("2023-12-31T18:45:10")), "31 Dec 2023");
        assert_eq!(format_date(Some("2023-12-31T18:45:10.250")), "31 Dec 2023");
    }

    #[test]
    fn date_placeholder_when_missing_or_garbage() {
        assert_eq!(format_date(None), PLACEHOLDER);
        assert_eq!(format_date(Some("")), PLACEHOLDER);
        assert_eq!(format_date(Some("not a date")), PLACEHOLDER);
        assert_eq!(format_date(Some("2024-13-40")), PLACEHOLDER);
    }

    #[test]
    fn currency_indian_grouping() {
        let inr = CurrencyFormat::default();
        assert_eq!(format_currency(Some(1234567.0), &inr), "₹12,34,567.00");
        assert_eq!(format_currency(Some(125000.5), &inr), "₹1,25,000.50");
        assert_eq!(format_currency(Some(999.0), &inr), "₹999.00");
        assert_eq!(format_currency(Some(1000.0), &inr), "₹1,000.00");
    }

    #[test]
    fn currency_thousands_grouping() {
        let usd = thousands("$");
        assert_eq!(format_currency(Some(1234567.891), &usd), "$1,234,567.89");
        assert_eq!(format_currency(Some(0.0), &usd), "$0.00");
        assert_eq!(format_currency(Some(100000.0), &usd), "$100,000.00");
    }

    #[test]
    fn currency_negative_and_zero_decimals() {
        let usd = CurrencyFormat {
            decimals: 0,
            ..thousands("$")
        };
        assert_eq!(format_currency(Some(-4500.4), &usd), "-$4,500");
        assert_eq!(format_currency(Some(-0.001), &thousands("$")), "$0.00");
    }

    #[test]
    fn currency_placeholder_for_missing_amount() {
        assert_eq!(format_currency(None, &CurrencyFormat::default()), PLACEHOLDER);
        assert_eq!(format_currency(Some(f64::NAN), &CurrencyFormat::default()), PLACEHOLDER);
    }
}
