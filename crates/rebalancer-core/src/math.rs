//! Saturating decimal arithmetic.
//!
//! Allocation inputs are not range checked, so sums and products of entered
//! values can leave the `Decimal` range. These helpers clamp at
//! [`Decimal::MAX`] / [`Decimal::MIN`] where the plain operators would panic.

use rust_decimal::Decimal;

/// Sums values, clamping at the `Decimal` bounds.
#[must_use]
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Computes `value * numerator / denominator`, clamping at the `Decimal` bounds.
///
/// Returns zero when `denominator` is zero.
#[must_use]
pub fn mul_div(value: Decimal, numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    let negative = value.is_sign_negative()
        ^ numerator.is_sign_negative()
        ^ denominator.is_sign_negative();

    let quotient = match value.checked_mul(numerator) {
        Some(product) => product.checked_div(denominator),
        None => value
            .checked_div(denominator)
            .and_then(|q| q.checked_mul(numerator)),
    };

    quotient.unwrap_or(if negative { Decimal::MIN } else { Decimal::MAX })
}
