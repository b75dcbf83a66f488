use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::{LedgerError, ResultLedger};

/// The two currencies the ledger knows about.
///
/// Expenses are always stored in [`Currency::Ref`]; income is always entered
/// in [`Currency::Local`]. Every other figure is derived through the current
/// [`Rate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Reference currency (`USD`), canonical storage unit for expenses.
    Ref,
    /// Local currency (`BYN`), unit of income.
    Local,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Ref => "USD",
            Currency::Local => "BYN",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" | "REF" => Ok(Currency::Ref),
            "BYN" | "LOCAL" => Ok(Currency::Local),
            other => Err(LedgerError::Validation(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

/// Shared REF→LOCAL multiplier (`1 REF = rate LOCAL`).
///
/// Cloning a `Rate` yields another handle to the same value, so a background
/// fetch can replace it while the ledger keeps reading. The value is stored as
/// the bit pattern of an `f64` and swapped atomically: readers see either the
/// old or the new rate, never a mix.
///
/// ```rust
/// use engine::Rate;
///
/// let rate = Rate::default();
/// assert_eq!(rate.get(), 1.0);
/// rate.set(3.25).unwrap();
/// assert_eq!(rate.get(), 3.25);
/// assert!(rate.set(0.0).is_err());
/// assert_eq!(rate.get(), 3.25);
/// ```
#[derive(Clone, Debug)]
pub struct Rate(Arc<AtomicU64>);

impl Default for Rate {
    fn default() -> Self {
        Self(Arc::new(AtomicU64::new(1f64.to_bits())))
    }
}

impl Rate {
    /// Creates a rate holding `value`.
    pub fn new(value: f64) -> ResultLedger<Self> {
        let rate = Self::default();
        rate.set(value)?;
        Ok(rate)
    }

    /// Current multiplier. Always finite and `> 0`.
    #[must_use]
    pub fn get(&self) -> f64 {
        let value = f64::from_bits(self.0.load(Ordering::Acquire));
        if is_valid_rate(value) { value } else { 1.0 }
    }

    /// Replaces the multiplier. Non-positive or non-finite values are rejected
    /// and the previous value is kept.
    pub fn set(&self, value: f64) -> ResultLedger<()> {
        if !is_valid_rate(value) {
            return Err(LedgerError::Validation(format!(
                "rate must be > 0, got {value}"
            )));
        }
        self.0.store(value.to_bits(), Ordering::Release);
        Ok(())
    }
}

fn is_valid_rate(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Converts an amount entered in `currency` into the canonical REF amount.
#[must_use]
pub fn to_canonical(amount: f64, currency: Currency, rate: f64) -> f64 {
    match currency {
        Currency::Ref => amount,
        Currency::Local => amount / guard_rate(rate),
    }
}

/// Converts a canonical REF amount into LOCAL.
#[must_use]
pub fn to_local(amount_ref: f64, rate: f64) -> f64 {
    amount_ref * guard_rate(rate)
}

/// Converts a LOCAL amount into REF.
#[must_use]
pub fn to_reference(amount_local: f64, rate: f64) -> f64 {
    amount_local / guard_rate(rate)
}

fn guard_rate(rate: f64) -> f64 {
    if is_valid_rate(rate) { rate } else { 1.0 }
}

/// Parses user-typed numbers the forgiving way: `,` or `.` as decimal
/// separator, anything unparsable, non-finite or negative becomes `0`.
///
/// ```rust
/// use engine::parse_amount_or_zero;
///
/// assert_eq!(parse_amount_or_zero(" 12,5 "), 12.5);
/// assert_eq!(parse_amount_or_zero("-4"), 0.0);
/// assert_eq!(parse_amount_or_zero("abc"), 0.0);
/// ```
#[must_use]
pub fn parse_amount_or_zero(text: &str) -> f64 {
    text.trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .map_or(0.0, clamp_non_negative)
}

/// Maps negative and non-finite values to `0`.
#[must_use]
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
