use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// US-dollar currency: `$` symbol, thousands separators, two decimals,
/// half-away-from-zero rounding. `-$1,234.50` for negatives.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(2);

    let text = rounded.to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}${}.{}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        cents
    )
}

/// Currency for an optional form value; an empty input renders as zero.
pub fn format_optional_currency(amount: Option<Decimal>) -> String {
    format_currency(amount.unwrap_or(Decimal::ZERO))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse the date strings a browser date input (or an ISO timestamp)
/// produces. Returns `None` for anything else, including an empty string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Long-form date, e.g. `March 5, 2024`. Unparseable input degrades to
/// [`INVALID_DATE`] rather than failing.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// A percentage as entered, e.g. `43.5%`. An empty input renders as `0%`.
pub fn format_percent(value: Option<Decimal>) -> String {
    format!("{}%", value.unwrap_or(Decimal::ZERO).normalize())
}

/// An optional count; an empty input renders as `0`.
pub fn format_count<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "0".to_string())
}

/// Footer timestamp in the short US style: `3/5/2024 at 2:07:09 PM`.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    format!(
        "{} at {}",
        at.format("%-m/%-d/%Y"),
        at.format("%-I:%M:%S %p")
    )
}
