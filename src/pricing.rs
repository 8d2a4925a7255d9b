//! Pricing
//!
//! Derives the cart totals shown at checkout. Everything here is pure: the snapshot is
//! recomputed from the cart lines on every read and never stored.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::warn;

use crate::{cart::CartLine, cart::UnitPrices, products::ProductId};

/// Shipping is free for every order.
pub const SHIPPING_MINOR: u64 = 0;

/// Derived cart totals, all in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PricingSnapshot {
    /// Sum of quantity times unit price over every line.
    pub subtotal_minor: u64,

    /// Percentage off applied to the subtotal.
    pub discount_percent: u8,

    /// Amount taken off the subtotal.
    pub discount_amount_minor: u64,

    /// Shipping charge.
    pub shipping_minor: u64,

    /// Amount payable, never negative.
    pub total_minor: u64,

    /// Products that had no known unit price and were counted at zero.
    pub unpriced: SmallVec<[ProductId; 2]>,
}

impl PricingSnapshot {
    /// Whether any line was priced at zero because its price was unknown.
    pub fn has_unpriced_lines(&self) -> bool {
        !self.unpriced.is_empty()
    }

    /// Subtotal as money.
    pub fn subtotal<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        money(self.subtotal_minor, currency)
    }

    /// Discount amount as money.
    pub fn discount_amount<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        money(self.discount_amount_minor, currency)
    }

    /// Shipping as money.
    pub fn shipping<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        money(self.shipping_minor, currency)
    }

    /// Total as money.
    pub fn total<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        money(self.total_minor, currency)
    }
}

/// Compute the pricing snapshot for `lines`.
///
/// Unit prices are looked up in `unit_prices`; a missing price counts as zero and the
/// product is listed in [`PricingSnapshot::unpriced`]. The discount is rounded half-up
/// once, on the aggregate subtotal. Percentages above 100 are treated as 100.
pub fn compute_pricing(
    lines: &[CartLine],
    unit_prices: &UnitPrices,
    discount_percent: u8,
) -> PricingSnapshot {
    let discount_percent = discount_percent.min(100);
    let mut unpriced = SmallVec::new();

    let subtotal_minor = lines.iter().fold(0_u64, |acc, line| {
        let unit_price = unit_prices.get(line.product_id()).copied().unwrap_or_else(|| {
            warn!(product = %line.product_id(), "no unit price for cart line; counting as zero");
            unpriced.push(line.product_id().clone());
            0
        });

        acc.saturating_add(unit_price.saturating_mul(u64::from(line.quantity())))
    });

    let discount_amount_minor = percent_of_minor(subtotal_minor, discount_percent);

    let total_minor = subtotal_minor
        .saturating_sub(discount_amount_minor)
        .saturating_add(SHIPPING_MINOR);

    PricingSnapshot {
        subtotal_minor,
        discount_percent,
        discount_amount_minor,
        shipping_minor: SHIPPING_MINOR,
        total_minor,
        unpriced,
    }
}

/// `percent`% of `minor`, rounded to the nearest minor unit with halves rounded up.
fn percent_of_minor(minor: u64, percent: u8) -> u64 {
    let applied = Decimal::from(minor) * Decimal::from(percent) / Decimal::ONE_HUNDRED;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(minor)
}

pub(crate) fn money(minor: u64, currency: &Currency) -> Money<'_, Currency> {
    Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), currency)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use crate::{cart::Cart, products::tests::product};

    use super::*;

    fn cart_of(lines: &[(&str, u64, i32)]) -> Cart {
        let mut cart = Cart::new();

        for (id, price, quantity) in lines {
            cart.add_item(product(id, *price), *quantity);
        }

        cart
    }

    #[test]
    fn single_line_without_discount() {
        let cart = cart_of(&[("p1", 150, 2)]);

        let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), 0);

        assert_eq!(pricing.subtotal_minor, 300);
        assert_eq!(pricing.discount_amount_minor, 0);
        assert_eq!(pricing.shipping_minor, 0);
        assert_eq!(pricing.total_minor, 300);
    }

    #[test]
    fn ten_percent_of_1000_is_100() {
        let cart = cart_of(&[("p1", 250, 4)]);

        let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), 10);

        assert_eq!(pricing.subtotal_minor, 1000);
        assert_eq!(pricing.discount_amount_minor, 100);
        assert_eq!(pricing.total_minor, 900);
    }

    #[test]
    fn discount_rounds_half_up_on_the_aggregate() {
        // 3 lines of 5 at 10%: per line 0.5 each would round to 3, aggregate 1.5 rounds to 2.
        let cart = cart_of(&[("a", 5, 1), ("b", 5, 1), ("c", 5, 1)]);

        let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), 10);

        assert_eq!(pricing.subtotal_minor, 15);
        assert_eq!(pricing.discount_amount_minor, 2);
        assert_eq!(pricing.total_minor, 13);
    }

    #[test]
    fn discount_below_half_rounds_down() {
        let cart = cart_of(&[("a", 14, 1)]);

        let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), 10);

        assert_eq!(pricing.discount_amount_minor, 1);
    }

    #[test]
    fn full_discount_floors_total_at_zero() {
        let cart = cart_of(&[("a", 999, 3)]);

        let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), 100);

        assert_eq!(pricing.total_minor, 0);
    }

    #[test]
    fn percentages_above_100_are_clamped() {
        let cart = cart_of(&[("a", 200, 1)]);

        let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), 150);

        assert_eq!(pricing.discount_percent, 100);
        assert_eq!(pricing.discount_amount_minor, 200);
        assert_eq!(pricing.total_minor, 0);
    }

    #[test]
    fn unknown_price_counts_as_zero_and_is_flagged() {
        let cart = cart_of(&[("p1", 150, 2), ("p2", 80, 1)]);
        let mut prices = cart.unit_prices();
        prices.remove(&ProductId::from("p2"));

        let pricing = compute_pricing(cart.lines(), &prices, 0);

        assert_eq!(pricing.subtotal_minor, 300);
        assert!(pricing.has_unpriced_lines());
        assert_eq!(pricing.unpriced.as_slice(), [ProductId::from("p2")]);
    }

    #[test]
    fn compute_pricing_is_idempotent() {
        let cart = cart_of(&[("p1", 133, 3), ("p2", 77, 2)]);
        let prices = cart.unit_prices();

        let first = compute_pricing(cart.lines(), &prices, 10);
        let second = compute_pricing(cart.lines(), &prices, 10);

        assert_eq!(first, second);
    }

    #[test]
    fn empty_cart_totals_zero() {
        let pricing = compute_pricing(&[], &UnitPrices::default(), 10);

        assert_eq!(pricing, PricingSnapshot {
            discount_percent: 10,
            ..PricingSnapshot::default()
        });
    }

    #[test]
    fn money_accessors_use_currency() {
        let cart = cart_of(&[("p1", 150, 2)]);

        let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), 10);

        assert_eq!(pricing.subtotal(iso::INR), Money::from_minor(300, iso::INR));
        assert_eq!(pricing.discount_amount(iso::INR), Money::from_minor(30, iso::INR));
        assert_eq!(pricing.shipping(iso::INR), Money::from_minor(0, iso::INR));
        assert_eq!(pricing.total(iso::INR), Money::from_minor(270, iso::INR));
    }
}
