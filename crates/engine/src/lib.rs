//! Budget ledger engine.
//!
//! The [`Ledger`] owns the expenses, the income record and the exchange rate
//! for one store. Every mutation is validated first, then written to the
//! [`Store`], and only then applied in memory, so a failed call leaves no
//! trace. Balances and receipts are derived on every read.
//!
//! ```rust,no_run
//! # async fn demo(db: sea_orm::DatabaseConnection) -> Result<(), engine::LedgerError> {
//! use engine::{Currency, Ledger, SqliteStore};
//!
//! let mut ledger = Ledger::builder(SqliteStore::new(db)).build().await?;
//! ledger.set_income(2595.0, 150.5).await?;
//! ledger.add_expense("Rent", 300.0, Currency::Ref, true).await?;
//! println!("left: {:.2}", ledger.balance().remaining.local);
//! # Ok(())
//! # }
//! ```

pub use currency::{
    Currency, Rate, clamp_non_negative, parse_amount_or_zero, to_canonical, to_local,
    to_reference,
};
pub use error::LedgerError;
pub use expenses::Expense;
pub use income::IncomeData;
pub use ops::EditDraft;
pub use store::{SqliteStore, Store};
pub use summary::{Amounts, Balance, Receipt, ReceiptLine};

mod currency;
mod error;
mod expenses;
mod income;
mod ops;
pub mod payslip;
mod store;
mod summary;

type ResultLedger<T> = Result<T, LedgerError>;

/// In-memory view of one store, kept in sync with it on every mutation.
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    expenses: Vec<Expense>,
    income: IncomeData,
    rate: Rate,
}

impl<S: Store> Ledger<S> {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder(store: S) -> LedgerBuilder<S> {
        LedgerBuilder {
            store,
            rate: Rate::default(),
        }
    }
}

/// The builder for `Ledger`
pub struct LedgerBuilder<S> {
    store: S,
    rate: Rate,
}

impl<S: Store> LedgerBuilder<S> {
    /// Share an existing rate handle (e.g. one refreshed in the background).
    pub fn rate(mut self, rate: Rate) -> LedgerBuilder<S> {
        self.rate = rate;
        self
    }

    /// Construct `Ledger`, loading every expense and the income record.
    pub async fn build(self) -> ResultLedger<Ledger<S>> {
        let expenses = self.store.all_expenses().await?;
        let income = self.store.load_income().await?.unwrap_or_default();
        tracing::debug!(expenses = expenses.len(), "ledger loaded");

        Ok(Ledger {
            store: self.store,
            expenses,
            income,
            rate: self.rate,
        })
    }
}
