//! Display formatting shared by every screen.
//!
//! Output follows what `Intl.NumberFormat` / `Intl.DateTimeFormat` produce for
//! the supported locales, so amounts read the same as in the billing API's own
//! dashboards.

use billing_types::{Discount, Timestamp};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};

const NBSP: char = '\u{a0}';

/// Zero-decimal currencies: amounts are already whole units.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "JPY", "KMF", "KRW", "MGA", "PYG", "RWF", "UGX", "VND", "VUV",
    "XAF", "XOF", "XPF",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Display)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    #[default]
    #[strum(to_string = "pt-BR", serialize = "pt_BR", serialize = "pt")]
    PtBr,
    #[strum(to_string = "en-US", serialize = "en_US", serialize = "en")]
    EnUs,
}

impl Locale {
    /// (grouping separator, decimal separator)
    fn separators(self) -> (char, char) {
        match self {
            Locale::PtBr => ('.', ','),
            Locale::EnUs => (',', '.'),
        }
    }

    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }
}

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

pub fn format_number(value: i64, locale: Locale) -> String {
    let (group, _) = locale.separators();
    let grouped = group_digits(&value.unsigned_abs().to_string(), group);
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a float with up to `max_fraction` decimals, trailing zeros trimmed.
pub fn format_decimal(value: f64, max_fraction: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let (group, decimal) = locale.separators();
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (whole != "0" || !fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(whole, group));
    if !fraction.is_empty() {
        out.push(decimal);
        out.push_str(fraction);
    }
    out
}

pub fn currency_exponent(currency: &str) -> u32 {
    let code = currency.trim().to_ascii_uppercase();
    if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        0
    } else {
        2
    }
}

fn currency_symbol(code: &str, locale: Locale) -> Option<&'static str> {
    let symbol = match (locale, code) {
        (_, "BRL") => "R$",
        (_, "EUR") => "€",
        (_, "GBP") => "£",
        (_, "INR") => "₹",
        (_, "KRW") => "₩",
        (_, "CAD") => "CA$",
        (_, "MXN") => "MX$",
        (_, "CNY") => "CN¥",
        (Locale::EnUs, "USD") => "$",
        (Locale::EnUs, "JPY") => "¥",
        (Locale::EnUs, "AUD") => "A$",
        (Locale::PtBr, "USD") => "US$",
        (Locale::PtBr, "JPY") => "JP¥",
        (Locale::PtBr, "AUD") => "AU$",
        _ => return None,
    };
    Some(symbol)
}

/// Formats an amount given in minor units (cents) as currency.
///
/// `format_currency(500, "brl", Locale::PtBr)` gives `"R$ 5,00"` with a
/// no-break space, the same as `Intl.NumberFormat('pt-BR', {style: 'currency',
/// currency: 'BRL'}).format(5)`.
pub fn format_currency(minor_units: i64, currency: &str, locale: Locale) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let exponent = currency_exponent(&code);
    let divisor = 10u64.pow(exponent);
    let abs = minor_units.unsigned_abs();
    let (group, decimal) = locale.separators();

    let mut number = group_digits(&(abs / divisor).to_string(), group);
    if exponent > 0 {
        number.push(decimal);
        number.push_str(&format!("{:0width$}", abs % divisor, width = exponent as usize));
    }

    let sign = if minor_units < 0 { "-" } else { "" };
    match (currency_symbol(&code, locale), locale) {
        (Some(symbol), Locale::EnUs) => format!("{sign}{symbol}{number}"),
        (Some(symbol), Locale::PtBr) => format!("{sign}{symbol}{NBSP}{number}"),
        (None, _) => format!("{sign}{code}{NBSP}{number}"),
    }
}

/// Parses an operator-typed amount in major units ("49,90", "1.234,56",
/// "49.90") into minor units for the given currency.
pub fn parse_major_amount(input: &str, currency: &str) -> Option<i64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != NBSP)
        .collect();
    if cleaned.is_empty() || cleaned.starts_with('-') {
        return None;
    }

    // The last separator is the decimal mark when followed by 1-2 digits.
    let normalized = match cleaned.rfind([',', '.']) {
        Some(idx) if cleaned.len() - idx - 1 <= 2 => {
            let (whole, fraction) = cleaned.split_at(idx);
            format!("{}.{}", whole.replace(['.', ','], ""), &fraction[1..])
        }
        _ => cleaned.replace(['.', ','], ""),
    };

    let (whole, fraction) = normalized
        .split_once('.')
        .unwrap_or((normalized.as_str(), ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let exponent = currency_exponent(currency) as usize;
    if fraction.len() > exponent {
        return None;
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction_padded = format!("{fraction:0<exponent$}");
    let fraction: i64 = if fraction_padded.is_empty() {
        0
    } else {
        fraction_padded.parse().ok()?
    };
    whole
        .checked_mul(10i64.pow(exponent as u32))?
        .checked_add(fraction)
}

/// `10.0` → `"10%"`, `12.5` → `"12,5%"` (pt-BR).
pub fn format_percent(value: f64, locale: Locale) -> String {
    format!("{}%", format_decimal(value, 2, locale))
}

pub fn format_discount(discount: &Discount, locale: Locale) -> String {
    match discount {
        Discount::Percent(percent) => format_percent(*percent, locale),
        Discount::Amount { amount, currency } => format_currency(*amount, currency, locale),
        Discount::Unknown => "—".to_string(),
    }
}

pub fn format_datetime(dt: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::PtBr => dt.format("%d/%m/%Y %H:%M").to_string(),
        Locale::EnUs => dt.format("%m/%d/%Y %H:%M").to_string(),
    }
}

/// Formats an API timestamp; unparseable text is shown verbatim.
pub fn format_timestamp(ts: Option<&Timestamp>, locale: Locale) -> String {
    match ts {
        None => "—".to_string(),
        Some(ts) => match ts.to_datetime() {
            Some(dt) => format_datetime(&dt, locale),
            None => match ts {
                Timestamp::Text(text) => text.clone(),
                _ => "—".to_string(),
            },
        },
    }
}

/// "Monthly", "Every 3 months", "One-time".
pub fn format_interval(interval: Option<&str>, count: Option<u32>) -> String {
    let Some(interval) = interval.filter(|i| !i.is_empty()) else {
        return "One-time".to_string();
    };
    match count.unwrap_or(1) {
        1 => match interval {
            "day" => "Daily".to_string(),
            "week" => "Weekly".to_string(),
            "month" => "Monthly".to_string(),
            "year" => "Yearly".to_string(),
            other => format!("Every {other}"),
        },
        n => format!("Every {n} {interval}s"),
    }
}
