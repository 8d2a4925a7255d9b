//! Checkout
//!
//! The shipping-address draft edited during checkout, with optional persistence of the
//! draft when the shopper asks for it to be remembered.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, REMEMBER_ADDRESS_KEY, SAVED_ADDRESS_KEY, StorageError};

/// Errors raised by the checkout session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The field name did not match any address field.
    #[error("unknown address field: {0}")]
    UnknownField(String),

    /// The session has already been submitted.
    #[error("checkout already submitted")]
    AlreadySubmitted,

    /// Persisting the draft failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The draft could not be encoded for storage.
    #[error("failed to encode address draft")]
    Encoding(#[source] serde_json::Error),
}

/// The five required address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    /// Street address
    Street,
    /// City
    City,
    /// State
    State,
    /// Postal code
    Pincode,
    /// Contact phone number
    Phone,
}

impl AddressField {
    /// Every field, in display order.
    pub const ALL: [AddressField; 5] = [
        AddressField::Street,
        AddressField::City,
        AddressField::State,
        AddressField::Pincode,
        AddressField::Phone,
    ];

    /// The field's name.
    pub fn name(self) -> &'static str {
        match self {
            AddressField::Street => "street",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Pincode => "pincode",
            AddressField::Phone => "phone",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddressField {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s.trim())
            .ok_or_else(|| CheckoutError::UnknownField(s.to_string()))
    }
}

/// A shipping address being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDraft {
    /// Street address
    pub street: String,
    /// City
    pub city: String,
    /// State
    pub state: String,
    /// Postal code
    pub pincode: String,
    /// Contact phone number
    pub phone: String,
}

impl AddressDraft {
    /// Read a field.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Pincode => &self.pincode,
            AddressField::Phone => &self.phone,
        }
    }

    /// Overwrite a field.
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Pincode => &mut self.pincode,
            AddressField::Phone => &mut self.phone,
        };

        *slot = value.into();
    }

    /// True when every field has a non-blank value. No format checks are made.
    pub fn is_valid(&self) -> bool {
        AddressField::ALL
            .into_iter()
            .all(|field| !self.get(field).trim().is_empty())
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        AddressField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    /// Fields that are still blank.
    pub fn missing_fields(&self) -> impl Iterator<Item = AddressField> + '_ {
        AddressField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
    }
}

/// Where the checkout session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing entered yet.
    Empty,
    /// Some fields entered, at least one still blank.
    Editing,
    /// Every field filled; order placement is allowed.
    Valid,
    /// An order was placed with this address. Terminal.
    Submitted,
}

/// Checkout session over a single address draft.
#[derive(Debug)]
pub struct CheckoutSession<S> {
    draft: AddressDraft,
    remember: bool,
    submitted: bool,
    store: S,
}

impl<S: KeyValueStore> CheckoutSession<S> {
    /// Start a session, hydrating the draft when one was remembered.
    ///
    /// The saved draft is only used when the remember flag is also set; anything
    /// undecodable is ignored and the session starts empty.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the store cannot be read.
    pub fn start(store: S) -> Result<Self, CheckoutError> {
        let remember = store
            .get(REMEMBER_ADDRESS_KEY)?
            .is_some_and(|flag| serde_json::from_str::<bool>(&flag).unwrap_or(false));

        let saved = if remember {
            store.get(SAVED_ADDRESS_KEY)?
        } else {
            None
        };

        let draft = match saved.map(|encoded| serde_json::from_str::<AddressDraft>(&encoded)) {
            Some(Ok(draft)) => {
                debug!("hydrated remembered shipping address");
                draft
            }
            Some(Err(error)) => {
                warn!(%error, "ignoring undecodable saved address");
                AddressDraft::default()
            }
            None => AddressDraft::default(),
        };

        Ok(Self {
            draft,
            remember,
            submitted: false,
            store,
        })
    }

    /// Set one field of the draft, persisting it when remember is on.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the session was submitted or persisting fails.
    pub fn update_field(
        &mut self,
        field: AddressField,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        self.ensure_open()?;

        self.draft.set(field, value);

        if self.remember {
            self.persist_draft()?;
        }

        Ok(())
    }

    /// Turn address remembering on or off.
    ///
    /// Turning it on saves the current draft and the flag; turning it off deletes both.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the session was submitted or the store fails.
    pub fn toggle_remember(&mut self, enabled: bool) -> Result<(), CheckoutError> {
        self.ensure_open()?;

        self.remember = enabled;

        if enabled {
            self.persist_draft()?;
            self.store.set(REMEMBER_ADDRESS_KEY, "true")?;
        } else {
            self.store.remove(SAVED_ADDRESS_KEY)?;
            self.store.remove(REMEMBER_ADDRESS_KEY)?;
        }

        debug!(enabled, "remember address toggled");

        Ok(())
    }

    /// Whether the draft is complete enough to place an order.
    pub fn is_valid(&self) -> bool {
        self.draft.is_valid()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CheckoutState {
        if self.submitted {
            CheckoutState::Submitted
        } else if self.draft.is_valid() {
            CheckoutState::Valid
        } else if self.draft.is_empty() {
            CheckoutState::Empty
        } else {
            CheckoutState::Editing
        }
    }

    /// The current draft.
    pub fn draft(&self) -> &AddressDraft {
        &self.draft
    }

    /// Whether the draft is being remembered.
    pub fn remembers_address(&self) -> bool {
        self.remember
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    fn ensure_open(&self) -> Result<(), CheckoutError> {
        if self.submitted {
            Err(CheckoutError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }

    fn persist_draft(&self) -> Result<(), CheckoutError> {
        let encoded = serde_json::to_string(&self.draft).map_err(CheckoutError::Encoding)?;

        self.store.set(SAVED_ADDRESS_KEY, &encoded)?;

        Ok(())
    }
}
