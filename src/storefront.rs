//! Storefront
//!
//! Wires the cart, voucher, checkout session and order placement together behind the
//! intents a shopper can trigger. Pricing is recomputed on every read.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartLine},
    checkout::{AddressField, CheckoutError, CheckoutSession},
    discounts::{ActiveDiscount, Redemption, VoucherTable},
    orders::{Confirmation, OrderError, place_order},
    pricing::{PricingSnapshot, compute_pricing},
    products::{Product, ProductId},
    storage::{ACTIVE_VOUCHER_KEY, KeyValueStore, StorageError},
};

/// Errors surfaced by storefront intents.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Persisting or restoring state failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The checkout session rejected the change.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// An order could not be placed.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// A shopper's storefront session.
#[derive(Debug)]
pub struct Storefront<S> {
    cart: Cart,
    discount: ActiveDiscount,
    vouchers: VoucherTable,
    checkout: CheckoutSession<S>,
    confirmation: Option<Confirmation>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open the storefront, restoring the saved cart, voucher and remembered address.
    ///
    /// A saved voucher code that the table no longer recognises is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the store cannot be read.
    pub fn open(store: S, vouchers: VoucherTable) -> Result<Self, StorefrontError> {
        let cart = Cart::restore_from(&store)?;

        let mut discount = ActiveDiscount::default();

        if let Some(code) = store.get(ACTIVE_VOUCHER_KEY)? {
            let redemption = vouchers.redeem(&code);

            if !redemption.is_accepted() {
                debug!(%code, "dropping saved voucher that is no longer valid");
                store.remove(ACTIVE_VOUCHER_KEY)?;
            }

            discount.apply(&redemption);
        }

        let checkout = CheckoutSession::start(store)?;

        Ok(Self {
            cart,
            discount,
            vouchers,
            checkout,
            confirmation: None,
        })
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the cart cannot be saved.
    pub fn add_item(&mut self, product: Product, quantity: i32) -> Result<bool, StorefrontError> {
        let changed = self.cart.add_item(product, quantity);

        self.save_cart_if(changed)
    }

    /// Change the quantity of a cart line by `delta`, never below one.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the cart cannot be saved.
    pub fn change_quantity(
        &mut self,
        product_id: &ProductId,
        delta: i32,
    ) -> Result<bool, StorefrontError> {
        let changed = self.cart.change_quantity(product_id, delta);

        self.save_cart_if(changed)
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the cart cannot be saved.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<bool, StorefrontError> {
        let changed = self.cart.remove_item(product_id);

        self.save_cart_if(changed)
    }

    /// Redeem a voucher code. An accepted code replaces the active voucher; a rejected
    /// one leaves it alone.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the accepted code cannot be saved.
    pub fn redeem_voucher(&mut self, code: &str) -> Result<Redemption, StorefrontError> {
        let redemption = self.vouchers.redeem(code);

        self.discount.apply(&redemption);

        if let Redemption::Accepted { code, percent_off } = &redemption {
            self.checkout.store().set(ACTIVE_VOUCHER_KEY, code)?;

            info!(%code, percent_off, "voucher applied");
        }

        Ok(redemption)
    }

    /// Update one shipping address field.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the session is submitted or persisting fails.
    pub fn update_address_field(
        &mut self,
        field: AddressField,
        value: impl Into<String>,
    ) -> Result<(), StorefrontError> {
        Ok(self.checkout.update_field(field, value)?)
    }

    /// Turn address remembering on or off.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the session is submitted or the store fails.
    pub fn toggle_remember(&mut self, enabled: bool) -> Result<(), StorefrontError> {
        Ok(self.checkout.toggle_remember(enabled)?)
    }

    /// Place the order.
    ///
    /// On success the cart and voucher are cleared, both in memory and in the store.
    /// The order stands once placed: failing to clear saved state is logged, not
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Order`] when the cart is empty or the address is
    /// incomplete. Nothing is changed in that case.
    pub fn place_order(&mut self) -> Result<&Confirmation, StorefrontError> {
        let confirmation = place_order(
            &mut self.cart,
            &mut self.checkout,
            self.discount.percent_off(),
        )?;

        let confirmation = self.confirmation.insert(confirmation);

        self.discount.clear();

        let store = self.checkout.store();

        if let Err(error) = self.cart.save_to(store) {
            warn!(%error, order = %confirmation.order.id(), "failed to clear saved cart");
        }

        if let Err(error) = store.remove(ACTIVE_VOUCHER_KEY) {
            warn!(%error, order = %confirmation.order.id(), "failed to clear saved voucher");
        }

        Ok(confirmation)
    }

    /// Leave the confirmation and return to browsing with a fresh checkout session.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the store cannot be read.
    pub fn continue_shopping(self) -> Result<Self, StorefrontError> {
        let Self {
            cart,
            discount,
            vouchers,
            checkout,
            confirmation: _,
        } = self;

        Ok(Self {
            cart,
            discount,
            vouchers,
            checkout: CheckoutSession::start(checkout.into_store())?,
            confirmation: None,
        })
    }

    /// Cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current pricing, computed from the cart and active voucher.
    pub fn pricing(&self) -> PricingSnapshot {
        compute_pricing(
            self.cart.lines(),
            &self.cart.unit_prices(),
            self.discount.percent_off(),
        )
    }

    /// The active voucher.
    pub fn discount(&self) -> &ActiveDiscount {
        &self.discount
    }

    /// The checkout session.
    pub fn checkout(&self) -> &CheckoutSession<S> {
        &self.checkout
    }

    /// Whether the order can be placed as far as the address is concerned.
    pub fn is_address_valid(&self) -> bool {
        self.checkout.is_valid()
    }

    /// The confirmation of the order just placed, if any.
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    fn save_cart_if(&self, changed: bool) -> Result<bool, StorefrontError> {
        if changed {
            self.cart.save_to(self.checkout.store())?;
        }

        Ok(changed)
    }
}
