//! Display formatting for amounts and rates.
//!
//! Pure string rendering, no business logic: a fixed fraction-digit
//! count and en-US thousands grouping.

use rust_decimal::{Decimal, RoundingStrategy};

/// Render a monetary amount with 2 fraction digits: `43590.936` → `"43,590.94"`.
pub fn format_amount(value: Decimal) -> String {
    format_fixed(value, 2)
}

/// Render an exchange rate with 4 fraction digits: `0.6545` → `"0.6545"`.
pub fn format_rate(value: Decimal) -> String {
    format_fixed(value, 4)
}

/// Render with a fixed number of fraction digits and grouped thousands.
pub fn format_fixed(value: Decimal, fraction_digits: u32) -> String {
    let rounded = value.round_dp_with_strategy(
        fraction_digits,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let text = format!("{:.*}", fraction_digits as usize, rounded);

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(unsigned.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
