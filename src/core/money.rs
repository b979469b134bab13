use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Display helpers for amounts and counts shown on report pages.
///
/// Amounts are kept as `Decimal` everywhere in the metrics layer and only
/// rounded here, at the presentation boundary.
pub struct Money;

impl Money {
    /// Formats an amount as `$1,234.56` (half-up rounding to cents)
    pub fn format(amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = format!("{:.2}", rounded.abs());
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        format!(
            "{}${}.{}",
            if negative { "-" } else { "" },
            group_thousands(whole),
            cents
        )
    }

    /// Formats an amount without cents, as used on bar labels (`$1,235`)
    pub fn format_whole(amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        format!(
            "{}${}",
            if negative { "-" } else { "" },
            group_thousands(&rounded.abs().trunc().to_string())
        )
    }

    /// Converts an amount to `f64` for plotting; unrepresentable values map to 0
    pub fn to_plot_value(amount: Decimal) -> f64 {
        amount.to_f64().unwrap_or(0.0)
    }
}

/// Formats a count with thousands separators (`12,345`)
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// Formats a ratio already expressed in percent with one decimal (`12.5%`)
pub fn format_percent(percent: Decimal) -> String {
    format!(
        "{:.1}%",
        percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
