use chrono::NaiveDate;
use moneymap_ledger::Amount;

use crate::preferences::Currency;

/// Format an amount with the currency symbol and thousands separators,
/// e.g. `$1,234.50` or `-€12.00`
pub fn fmt_currency(amount: Amount, currency: Currency) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    format!(
        "{}{}{}",
        sign,
        currency.symbol(),
        format_number_with_separators(cents.unsigned_abs())
    )
}

/// Like [`fmt_currency`] but always shows the sign, for income/expense rows
pub fn fmt_signed_currency(amount: Amount, currency: Currency) -> String {
    if amount.is_negative() {
        fmt_currency(amount, currency)
    } else {
        format!("+{}", fmt_currency(amount, currency))
    }
}

fn format_number_with_separators(cents: u64) -> String {
    let integer_str = (cents / 100).to_string();
    let mut formatted_integer = String::with_capacity(integer_str.len() + integer_str.len() / 3);
    for (i, c) in integer_str.chars().enumerate() {
        if i > 0 && (integer_str.len() - i) % 3 == 0 {
            formatted_integer.push(',');
        }
        formatted_integer.push(c);
    }
    format!("{}.{:02}", formatted_integer, cents % 100)
}

/// Short human date, e.g. `Jul 25, 2025`
pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Mask a secret for display in a form field
pub fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}
