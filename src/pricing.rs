//! Totals for a cart: subtotal, tax, discount and grand total.
//!
//! Arithmetic stays exact in `Decimal`; rounding to currency precision only
//! happens when totals are prepared for display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::LineItem;
use crate::error::PricingError;

/// Fractional digits of the currency.
pub const CURRENCY_SCALE: u32 = 2;

/// Tax and discount rates, both fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rates {
    tax_rate: Decimal,
    discount_rate: Decimal,
}

/// 15% tax, no discount.
pub const DEFAULT_RATES: Rates = Rates {
    tax_rate: Decimal::from_parts(15, 0, 0, false, 2),
    discount_rate: Decimal::ZERO,
};

impl Default for Rates {
    fn default() -> Self {
        DEFAULT_RATES
    }
}

impl Rates {
    pub fn new(tax_rate: Decimal, discount_rate: Decimal) -> Result<Self, PricingError> {
        check_rate("tax_rate", tax_rate)?;
        check_rate("discount_rate", discount_rate)?;
        Ok(Self {
            tax_rate,
            discount_rate,
        })
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn discount_rate(&self) -> Decimal {
        self.discount_rate
    }

    fn in_range(&self) -> bool {
        is_fraction(self.tax_rate) && is_fraction(self.discount_rate)
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

fn check_rate(name: &'static str, value: Decimal) -> Result<(), PricingError> {
    if is_fraction(value) {
        Ok(())
    } else {
        Err(PricingError::RateOutOfRange { name, value })
    }
}

/// Derived totals of a cart. Never stored; recompute when the cart changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Totals rounded half-up to currency precision, for display.
    pub fn rounded(&self) -> Totals {
        Totals {
            subtotal: round_currency(self.subtotal),
            tax: round_currency(self.tax),
            discount: round_currency(self.discount),
            total: round_currency(self.total),
        }
    }
}

/// Computes the totals of the given line items.
///
/// Summation is exact, so the result does not depend on item order.
pub fn compute_totals(items: &[LineItem], rates: &Rates) -> Totals {
    debug_assert!(rates.in_range(), "rates outside [0, 1]: {rates:?}");

    let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();
    let tax = subtotal * rates.tax_rate;
    let discount = subtotal * rates.discount_rate;

    Totals {
        subtotal,
        tax,
        discount,
        total: subtotal + tax - discount,
    }
}

pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as `$12.34`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn line(id: i64, price: Decimal, quantity: u32) -> LineItem {
        LineItem::from_product(&Product::new(id, format!("item-{id}"), price, 100), quantity)
    }

    #[test]
    fn test_totals_with_tax_and_no_discount() {
        let items = vec![line(1, dec!(10.00), 2), line(2, dec!(5.00), 1)];
        let rates = Rates::new(dec!(0.15), dec!(0)).unwrap();

        let totals = compute_totals(&items, &rates).rounded();

        assert_eq!(totals.subtotal, dec!(25.00));
        assert_eq!(totals.tax, dec!(3.75));
        assert_eq!(totals.discount, dec!(0.00));
        assert_eq!(totals.total, dec!(28.75));
    }

    #[test]
    fn test_discount_is_subtracted() {
        let items = vec![line(1, dec!(40.00), 1)];
        let rates = Rates::new(dec!(0.10), dec!(0.25)).unwrap();

        let totals = compute_totals(&items, &rates);

        assert_eq!(totals.tax, dec!(4.00));
        assert_eq!(totals.discount, dec!(10.00));
        assert_eq!(totals.total, dec!(34.00));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let rates = Rates::new(dec!(0.15), dec!(0.05)).unwrap();
        let totals = compute_totals(&[], &rates);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_display_rounding_is_half_up() {
        assert_eq!(round_currency(dec!(0.125)), dec!(0.13));
        assert_eq!(round_currency(dec!(0.135)), dec!(0.14));
        assert_eq!(round_currency(dec!(2.004)), dec!(2.00));
        assert_eq!(format_money(dec!(28.745)), "$28.75");
        assert_eq!(format_money(dec!(3)), "$3.00");
    }

    #[test]
    fn test_rates_outside_unit_interval_are_rejected() {
        assert!(matches!(
            Rates::new(dec!(1.5), dec!(0)),
            Err(PricingError::RateOutOfRange { name: "tax_rate", .. })
        ));
        assert!(matches!(
            Rates::new(dec!(0.1), dec!(-0.01)),
            Err(PricingError::RateOutOfRange { name: "discount_rate", .. })
        ));
        assert!(Rates::new(Decimal::ONE, Decimal::ZERO).is_ok());
    }

    proptest! {
        #[test]
        fn prop_totals_ignore_item_order(
            lines in prop::collection::vec((1i64..10_000, 1u32..50), 1..12),
            rotate in 0usize..12,
        ) {
            let items: Vec<LineItem> = lines
                .iter()
                .enumerate()
                .map(|(i, (cents, qty))| line(i as i64, Decimal::new(*cents, 2), *qty))
                .collect();
            let mut shuffled = items.clone();
            shuffled.reverse();
            let len = shuffled.len();
            shuffled.rotate_left(rotate % len);

            let rates = Rates::new(dec!(0.15), dec!(0.05)).unwrap();
            prop_assert_eq!(compute_totals(&items, &rates), compute_totals(&shuffled, &rates));
        }
    }
}
