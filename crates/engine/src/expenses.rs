//! The module contains `Expense` struct and its persistence model.

use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, currency};

/// An expense.
///
/// The amount is always kept in the reference currency; the local figure is
/// derived on demand through the current rate and never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Stable identifier, generated once at creation.
    pub id: Uuid,
    pub name: String,
    /// Canonical amount in REF. Always `> 0`.
    pub amount_ref: f64,
    /// `true` for recurring expenses, `false` for one-off ones. Never changes
    /// after creation.
    pub constant: bool,
    /// Whether the expense counts against income.
    pub checked: bool,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub(crate) fn new(name: String, amount_ref: f64, constant: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            amount_ref,
            constant,
            checked: true,
            // Stored with microsecond precision.
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    /// Amount converted to LOCAL with `rate`.
    #[must_use]
    pub fn amount_local(&self, rate: f64) -> f64 {
        currency::to_local(self.amount_ref, rate)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub amount_ref: f64,
    pub constant: bool,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            amount_ref: ActiveValue::Set(value.amount_ref),
            constant: ActiveValue::Set(value.constant),
            checked: ActiveValue::Set(value.checked),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| LedgerError::Validation(format!("invalid expense id: {}", model.id)))?;
        Ok(Self {
            id,
            name: model.name,
            amount_ref: model.amount_ref,
            constant: model.constant,
            checked: model.checked,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_expense_is_checked() {
        let expense = Expense::new(String::from("Rent"), 300.0, true);

        assert!(expense.checked);
        assert!(expense.constant);
        assert_eq!(expense.amount_local(3.0), 900.0);
    }

    #[test]
    fn model_round_trip_keeps_id() {
        let expense = Expense::new(String::from("Coffee"), 2.5, false);
        let model = Model {
            id: expense.id.to_string(),
            name: expense.name.clone(),
            amount_ref: expense.amount_ref,
            constant: expense.constant,
            checked: false,
            created_at: expense.created_at,
        };

        let back = Expense::try_from(model).unwrap();
        assert_eq!(back.id, expense.id);
        assert!(!back.checked);
    }

    #[test]
    #[should_panic(expected = "invalid expense id: not-a-uuid")]
    fn model_with_broken_id() {
        let model = Model {
            id: String::from("not-a-uuid"),
            name: String::from("Coffee"),
            amount_ref: 1.0,
            constant: false,
            checked: true,
            created_at: Utc::now(),
        };

        Expense::try_from(model).unwrap();
    }
}
