//! Discounts
//!
//! Voucher codes redeemable for a percentage off the cart subtotal.

use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

/// The code recognised by the default voucher table.
pub const DEFAULT_VOUCHER_CODE: &str = "DISCOUNT10";

/// Reason reported for codes that are not in the table.
pub const INVALID_CODE_REASON: &str = "invalid code";

/// Errors raised while building a voucher table.
#[derive(Debug, Error)]
pub enum VoucherError {
    /// The YAML document could not be parsed.
    #[error("failed to parse voucher table: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A voucher offered more than 100% off.
    #[error("voucher {0} has an invalid percentage: {1}")]
    InvalidPercentage(String, u8),

    /// A voucher had a blank code.
    #[error("voucher code cannot be empty")]
    EmptyCode,

    /// Two vouchers shared a code.
    #[error("duplicate voucher code: {0}")]
    DuplicateCode(String),
}

/// A redeemable voucher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Voucher {
    /// Voucher code, matched case-sensitively.
    pub code: String,

    /// Percentage off, in `[0, 100]`.
    pub percent_off: u8,
}

/// The outcome of redeeming a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    /// The code matched a voucher.
    Accepted {
        /// The matched code.
        code: String,

        /// Percentage off granted by the voucher.
        percent_off: u8,
    },

    /// The code did not match.
    Rejected {
        /// Human readable reason.
        reason: &'static str,
    },
}

impl Redemption {
    /// Whether the code was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Redemption::Accepted { .. })
    }
}

#[derive(Debug, Deserialize)]
struct VoucherTableDocument {
    vouchers: Vec<Voucher>,
}

/// The fixed set of recognised vouchers.
#[derive(Debug, Clone)]
pub struct VoucherTable {
    vouchers: SmallVec<[Voucher; 4]>,
}

impl Default for VoucherTable {
    fn default() -> Self {
        Self {
            vouchers: SmallVec::from_iter([Voucher {
                code: DEFAULT_VOUCHER_CODE.to_string(),
                percent_off: 10,
            }]),
        }
    }
}

impl VoucherTable {
    /// Build a table from a list of vouchers.
    ///
    /// # Errors
    ///
    /// Returns a [`VoucherError`] if a code is blank or repeated, or a percentage is
    /// above 100.
    pub fn new(vouchers: impl IntoIterator<Item = Voucher>) -> Result<Self, VoucherError> {
        let mut table = SmallVec::new();

        for voucher in vouchers {
            let code = voucher.code.trim();

            if code.is_empty() {
                return Err(VoucherError::EmptyCode);
            }

            if voucher.percent_off > 100 {
                return Err(VoucherError::InvalidPercentage(
                    code.to_string(),
                    voucher.percent_off,
                ));
            }

            if table.iter().any(|v: &Voucher| v.code == code) {
                return Err(VoucherError::DuplicateCode(code.to_string()));
            }

            table.push(Voucher {
                code: code.to_string(),
                percent_off: voucher.percent_off,
            });
        }

        Ok(Self { vouchers: table })
    }

    /// Parse a table from a YAML document with a top-level `vouchers` list.
    ///
    /// # Errors
    ///
    /// Returns a [`VoucherError`] if the document is malformed or a voucher is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, VoucherError> {
        let document: VoucherTableDocument = serde_norway::from_str(contents)?;

        Self::new(document.vouchers)
    }

    /// Look up `code` (trimmed, case-sensitive).
    pub fn redeem(&self, code: &str) -> Redemption {
        let code = code.trim();

        self.vouchers
            .iter()
            .find(|voucher| voucher.code == code)
            .map_or(
                Redemption::Rejected {
                    reason: INVALID_CODE_REASON,
                },
                |voucher| Redemption::Accepted {
                    code: voucher.code.clone(),
                    percent_off: voucher.percent_off,
                },
            )
    }

    /// Iterate over the vouchers in the table.
    pub fn iter(&self) -> impl Iterator<Item = &Voucher> {
        self.vouchers.iter()
    }
}

/// The single voucher currently applied to the cart, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveDiscount {
    code: Option<String>,
    percent_off: u8,
}

impl ActiveDiscount {
    /// Apply a redemption result.
    ///
    /// An accepted voucher replaces any previous one; a rejection keeps the current
    /// discount as it was.
    pub fn apply(&mut self, redemption: &Redemption) {
        if let Redemption::Accepted { code, percent_off } = redemption {
            self.code = Some(code.clone());
            self.percent_off = *percent_off;
        }
    }

    /// Drop the active voucher.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The active code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Percentage off, zero when no voucher is active.
    pub fn percent_off(&self) -> u8 {
        self.percent_off
    }
}
