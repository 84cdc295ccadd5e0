//! Currency formatting for amounts expressed in minor units.
//!
//! The storefront API reports every price as an integer number of cents
//! (`1299` is `12.99`). Output follows the `en-US` currency style: symbol
//! prefix, comma thousands separators, and the currency's usual fraction
//! digits.

use rust_decimal::{Decimal, RoundingStrategy};

struct CurrencyStyle {
    symbol: &'static str,
    fraction_digits: u32,
}

fn currency_style(code: &str) -> Option<CurrencyStyle> {
    let (symbol, fraction_digits) = match code {
        "USD" => ("$", 2),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        "NZD" => ("NZ$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "PHP" => ("₱", 2),
        "INR" => ("₹", 2),
        "MXN" => ("MX$", 2),
        "JPY" => ("¥", 0),
        "KRW" => ("₩", 0),
        _ => return None,
    };
    Some(CurrencyStyle {
        symbol,
        fraction_digits,
    })
}

/// Formats `cents` as a price string in `currency_code`.
///
/// Unknown currency codes are rendered with the code and a space as prefix,
/// e.g. `"XYZ 12.00"`.
///
/// ```
/// use storefront_core::format_money;
///
/// assert_eq!(format_money(1200, "USD"), "$12.00");
/// assert_eq!(format_money(123_456_789, "USD"), "$1,234,567.89");
/// ```
#[must_use]
pub fn format_money(cents: i64, currency_code: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    let (prefix, fraction_digits) = match currency_style(&code) {
        Some(style) => (style.symbol.to_string(), style.fraction_digits),
        None => (format!("{code} "), 2),
    };

    let amount = Decimal::from_i128_with_scale(i128::from(cents).abs(), 2)
        .round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{amount:.prec$}", prec = fraction_digits as usize);

    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + prefix.len() + 4);
    if cents < 0 {
        out.push('-');
    }
    out.push_str(&prefix);
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
