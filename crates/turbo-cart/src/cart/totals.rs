//! Aggregate queries over cart lines.

use crate::cart::entry::CartLine;
use crate::money::{Currency, Money};

/// Total number of items (sum of quantities).
pub fn total_items(lines: &[CartLine]) -> i64 {
    lines.iter().map(|line| line.quantity).sum()
}

/// Total price (sum of unit price times quantity).
///
/// All lines must be priced in the same currency; amounts are summed in
/// cents without conversion. The result carries the currency of the first
/// line, or USD for an empty cart.
pub fn total_price(lines: &[CartLine]) -> Money {
    let currency = lines
        .first()
        .map(|line| line.product.price.currency)
        .unwrap_or(Currency::USD);
    debug_assert!(
        lines.iter().all(|line| line.product.price.currency == currency),
        "cart lines are priced in more than one currency"
    );

    lines.iter().fold(Money::zero(currency), |total, line| {
        total.saturating_add(&line.product.price.saturating_mul(line.quantity))
    })
}
