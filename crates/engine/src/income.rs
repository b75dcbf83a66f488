//! Income record and the key-value table it is persisted in.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{ResultLedger, currency::clamp_non_negative};

/// Key of the income record inside the `settings` table.
pub(crate) const INCOME_KEY: &str = "income";

/// Periodic income, in LOCAL. There is exactly one per store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeData {
    pub salary: f64,
    pub advance: f64,
}

impl IncomeData {
    /// Builds an income record, clamping negative or non-finite inputs to `0`.
    #[must_use]
    pub fn clamped(salary: f64, advance: f64) -> Self {
        Self {
            salary: clamp_non_negative(salary),
            advance: clamp_non_negative(advance),
        }
    }

    /// `salary + advance`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.salary + self.advance
    }

    pub(crate) fn to_json(self) -> ResultLedger<String> {
        Ok(serde_json::to_string(&self)?)
    }

    pub(crate) fn from_json(value: &str) -> ResultLedger<Self> {
        Ok(serde_json::from_str(value)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn income(income: IncomeData) -> ResultLedger<Self> {
        Ok(Self {
            key: ActiveValue::Set(INCOME_KEY.to_string()),
            value: ActiveValue::Set(income.to_json()?),
        })
    }
}
