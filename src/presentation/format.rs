//! Display formatting for prices and percentages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two-decimal fixed representation, e.g. `"1.50"`.
#[must_use]
pub fn fixed2(value: Decimal) -> String {
    let mut rounded = round2(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Strike with its signed distance from the underlying, e.g. `"110.00 (+10.00%)"`.
///
/// Falls back to the bare strike when the underlying is unknown or zero.
///
/// # Examples
///
/// ```rust
/// use option_income::presentation::format_strike_with_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_strike_with_percent(dec!(110), Some(dec!(100))), "110.00 (+10.00%)");
/// assert_eq!(format_strike_with_percent(dec!(92.5), Some(dec!(100))), "92.50 (-7.50%)");
/// assert_eq!(format_strike_with_percent(dec!(92.5), None), "92.50");
/// ```
#[must_use]
pub fn format_strike_with_percent(strike: Decimal, underlying: Option<Decimal>) -> String {
    match underlying {
        Some(spot) if !spot.is_zero() => {
            let pct = round2((strike - spot) / spot * Decimal::ONE_HUNDRED);
            let sign = if pct.is_sign_negative() && !pct.is_zero() {
                "-"
            } else {
                "+"
            };
            format!("{} ({}{}%)", fixed2(strike), sign, fixed2(pct.abs()))
        }
        _ => fixed2(strike),
    }
}

/// Dollar amount with thousands separators, e.g. `"$1,234.56"`.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    let fixed = fixed2(value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !round2(value).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac_part}")
}
