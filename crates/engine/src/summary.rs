//! Read-only projections of the ledger state.
//!
//! Nothing here is persisted: both [`Balance`] and [`Receipt`] are recomputed
//! from the expenses, the income and the rate on every read.

use serde::Serialize;
use uuid::Uuid;

use crate::{
    Expense, IncomeData,
    currency::{to_local, to_reference},
};

/// The same value expressed in both currencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Amounts {
    pub reference: f64,
    pub local: f64,
}

impl Amounts {
    #[must_use]
    pub fn from_reference(reference: f64, rate: f64) -> Self {
        Self {
            reference,
            local: to_local(reference, rate),
        }
    }

    #[must_use]
    pub fn from_local(local: f64, rate: f64) -> Self {
        Self {
            reference: to_reference(local, rate),
            local,
        }
    }
}

/// Income against checked expenses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Balance {
    pub rate: f64,
    pub income: Amounts,
    /// Sum of every checked expense.
    pub used: Amounts,
    /// `income.local - used.local`, may be negative.
    pub remaining: Amounts,
    /// Checked constant expenses only.
    pub constant: Amounts,
    /// Checked regular expenses only.
    pub regular: Amounts,
}

impl Balance {
    pub fn compute(expenses: &[Expense], income: IncomeData, rate: f64) -> Self {
        let constant_ref = checked_sum(expenses, |e| e.constant);
        let regular_ref = checked_sum(expenses, |e| !e.constant);
        let used_ref = checked_sum(expenses, |_| true);

        let income = Amounts::from_local(income.total(), rate);
        let used = Amounts::from_reference(used_ref, rate);
        let remaining = Amounts::from_local(income.local - used.local, rate);

        Self {
            rate,
            income,
            used,
            remaining,
            constant: Amounts::from_reference(constant_ref, rate),
            regular: Amounts::from_reference(regular_ref, rate),
        }
    }
}

fn checked_sum(expenses: &[Expense], filter: impl Fn(&Expense) -> bool) -> f64 {
    expenses
        .iter()
        .filter(|e| e.checked && filter(e))
        .map(|e| e.amount_ref)
        .fold(0.0, |acc, amount| acc + amount)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub id: Uuid,
    pub name: String,
    pub constant: bool,
    pub amount: Amounts,
}

/// Summary of income, every checked expense and what is left.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Receipt {
    pub income: Amounts,
    pub lines: Vec<ReceiptLine>,
    pub used: Amounts,
    pub remaining: Amounts,
}

impl Receipt {
    pub fn compute(expenses: &[Expense], income: IncomeData, rate: f64) -> Self {
        let balance = Balance::compute(expenses, income, rate);
        let lines = expenses
            .iter()
            .filter(|e| e.checked)
            .map(|e| ReceiptLine {
                id: e.id,
                name: e.name.clone(),
                constant: e.constant,
                amount: Amounts::from_reference(e.amount_ref, rate),
            })
            .collect();

        Self {
            income: balance.income,
            lines,
            used: balance.used,
            remaining: balance.remaining,
        }
    }
}
