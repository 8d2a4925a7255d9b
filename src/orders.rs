//! Orders
//!
//! Local order placement. There is no order backend: placing an order snapshots the
//! cart, address and pricing into an immutable [`OrderIntent`] and empties the cart.

use std::time::Duration;

use jiff::Timestamp;
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::Cart,
    checkout::{AddressDraft, AddressField, CheckoutSession, CheckoutState},
    pricing::{PricingSnapshot, compute_pricing},
    products::Product,
    storage::KeyValueStore,
    uuids::TypedUuid,
};

/// How long the order confirmation is shown before returning to browsing.
pub const CONFIRMATION_DISPLAY: Duration = Duration::from_secs(5);

/// Order UUID
pub type OrderUuid = TypedUuid<OrderIntent>;

/// Preconditions for placing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The cart has no lines.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// One or more address fields are blank.
    #[error("shipping address is incomplete")]
    InvalidAddress(SmallVec<[AddressField; 5]>),

    /// The checkout session already produced an order.
    #[error("checkout already submitted")]
    AlreadySubmitted,
}

/// A line as it was ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    /// Product snapshot
    pub product: Product,

    /// Quantity ordered
    pub quantity: u32,

    /// Unit price times quantity
    pub line_total_minor: u64,
}

/// What would be submitted to an order backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderIntent {
    id: OrderUuid,
    lines: Vec<OrderLine>,
    address: AddressDraft,
    pricing: PricingSnapshot,
    placed_at: Timestamp,
}

impl OrderIntent {
    /// Order id
    pub fn id(&self) -> OrderUuid {
        self.id
    }

    /// Ordered lines, in cart order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Shipping address
    pub fn address(&self) -> &AddressDraft {
        &self.address
    }

    /// Pricing at the time of placement.
    pub fn pricing(&self) -> &PricingSnapshot {
        &self.pricing
    }

    /// When the order was placed.
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }
}

/// The terminal confirmation shown after placing an order.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// The placed order.
    pub order: OrderIntent,

    /// How long to show the confirmation.
    pub display_for: Duration,
}

/// Place an order for the cart's contents.
///
/// # Errors
///
/// Returns an [`OrderError`] if the cart is empty, the address is incomplete or the
/// session was already submitted. Nothing is changed in that case.
pub fn place_order<S: KeyValueStore>(
    cart: &mut Cart,
    session: &mut CheckoutSession<S>,
    discount_percent: u8,
) -> Result<Confirmation, OrderError> {
    place_order_at(cart, session, discount_percent, Timestamp::now())
}

/// [`place_order`] with an explicit placement time.
///
/// # Errors
///
/// See [`place_order`].
pub fn place_order_at<S: KeyValueStore>(
    cart: &mut Cart,
    session: &mut CheckoutSession<S>,
    discount_percent: u8,
    placed_at: Timestamp,
) -> Result<Confirmation, OrderError> {
    if session.state() == CheckoutState::Submitted {
        return Err(OrderError::AlreadySubmitted);
    }

    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    if !session.is_valid() {
        return Err(OrderError::InvalidAddress(
            session.draft().missing_fields().collect(),
        ));
    }

    let pricing = compute_pricing(cart.lines(), &cart.unit_prices(), discount_percent);

    let lines = cart
        .lines()
        .iter()
        .map(|line| OrderLine {
            product: line.product().clone(),
            quantity: line.quantity(),
            line_total_minor: line.line_total_minor(),
        })
        .collect();

    let order = OrderIntent {
        id: OrderUuid::new(),
        lines,
        address: session.draft().clone(),
        pricing,
        placed_at,
    };

    cart.clear();
    session.mark_submitted();

    info!(
        order = %order.id,
        total_minor = order.pricing.total_minor,
        "order placed"
    );

    Ok(Confirmation {
        order,
        display_for: CONFIRMATION_DISPLAY,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{checkout::tests::fill, products::tests::product, storage::MemoryStore};

    use super::*;

    #[test]
    fn placing_an_order_snapshots_and_clears_the_cart() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 150), 2);

        let mut session = CheckoutSession::start(MemoryStore::new())?;
        fill(&mut session)?;

        let placed_at = Timestamp::from_second(1_700_000_000)?;
        let confirmation = place_order_at(&mut cart, &mut session, 10, placed_at)?;
        let order = &confirmation.order;

        assert!(cart.is_empty());
        assert_eq!(session.state(), CheckoutState::Submitted);
        assert_eq!(confirmation.display_for, Duration::from_secs(5));

        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines().first().map(|l| l.line_total_minor), Some(300));
        assert_eq!(order.pricing().total_minor, 270);
        assert_eq!(order.address().city, "Bengaluru");
        assert_eq!(order.placed_at(), placed_at);

        Ok(())
    }

    #[test]
    fn empty_cart_is_rejected() -> TestResult {
        let mut cart = Cart::new();
        let mut session = CheckoutSession::start(MemoryStore::new())?;
        fill(&mut session)?;

        let result = place_order(&mut cart, &mut session, 0);

        assert!(matches!(result, Err(OrderError::EmptyCart)));
        assert_eq!(session.state(), CheckoutState::Valid);

        Ok(())
    }

    #[test]
    fn incomplete_address_is_rejected_and_cart_kept() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 150), 1);

        let mut session = CheckoutSession::start(MemoryStore::new())?;
        session.update_field(AddressField::Street, "12 MG Road")?;

        let result = place_order(&mut cart, &mut session, 0);

        match result {
            Err(OrderError::InvalidAddress(missing)) => {
                assert_eq!(missing.len(), 4);
                assert!(!missing.contains(&AddressField::Street));
            }
            other => panic!("expected InvalidAddress, got {other:?}"),
        }

        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn session_cannot_place_twice() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(product("p1", 150), 1);

        let mut session = CheckoutSession::start(MemoryStore::new())?;
        fill(&mut session)?;

        place_order(&mut cart, &mut session, 0)?;

        cart.add_item(product("p2", 10), 1);

        assert!(matches!(
            place_order(&mut cart, &mut session, 0),
            Err(OrderError::AlreadySubmitted)
        ));

        Ok(())
    }
}
