// Brazilian real formatting: "R$ 1.234,56"

use chrono::DateTime;

const SYMBOL: &str = "R$";
const THOUSANDS: char = '.';
const DECIMAL: char = ',';

/// Format an amount for display, rounded to cents
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{} {}", sign, SYMBOL, format_cents(cents))
}

/// Masked price entry: every digit typed so far, with the last two as cents.
/// Returns an empty string when there are no digits.
pub fn format_currency_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let trimmed = digits.trim_start_matches('0');
    if digits.is_empty() {
        return String::new();
    }
    match trimmed.parse::<u128>() {
        Ok(cents) => format!("{} {}", SYMBOL, format_cents(cents)),
        Err(_) if trimmed.is_empty() => format!("{} {}", SYMBOL, format_cents(0)),
        Err(_) => String::new(),
    }
}

/// Parse user-entered text back into an amount. Keeps digits and the decimal
/// comma, reads the longest numeric prefix, and yields 0 when nothing parses
/// or the digits overflow to infinity.
pub fn parse_currency(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == DECIMAL)
        .collect();
    let cleaned = cleaned.replacen(DECIMAL, ".", 1);

    let mut seen_point = false;
    let prefix: String = cleaned
        .chars()
        .take_while(|c| {
            if *c == '.' {
                let first = !seen_point;
                seen_point = true;
                first
            } else {
                c.is_ascii_digit()
            }
        })
        .collect();

    prefix.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `dd/mm/yyyy` for an RFC 3339 timestamp; unparsable input is returned as is
pub fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%d/%m/%Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn format_cents(cents: u128) -> String {
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS);
        }
        grouped.push(ch);
    }
    format!("{}{}{:02}", grouped, DECIMAL, cents % 100)
}
