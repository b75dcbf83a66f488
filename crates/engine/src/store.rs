//! Durable storage behind the ledger.
//!
//! The ledger never talks to the database directly: it receives a [`Store`]
//! at build time and awaits every write before touching its in-memory state.

use async_trait::async_trait;
use sea_orm::{QueryOrder, prelude::*, sea_query::OnConflict};
use uuid::Uuid;

use crate::{Expense, IncomeData, LedgerError, ResultLedger, expenses, income};

/// Keyed record store for expenses plus a single slot for the income record.
#[async_trait]
pub trait Store: Send + Sync {
    /// Every stored expense, oldest first.
    async fn all_expenses(&self) -> ResultLedger<Vec<Expense>>;

    /// Inserts a new expense and returns its id.
    async fn add_expense(&self, expense: &Expense) -> ResultLedger<Uuid>;

    /// Inserts or replaces an expense by id.
    async fn put_expense(&self, expense: &Expense) -> ResultLedger<()>;

    async fn delete_expense(&self, id: Uuid) -> ResultLedger<()>;

    async fn load_income(&self) -> ResultLedger<Option<IncomeData>>;

    async fn save_income(&self, income: &IncomeData) -> ResultLedger<()>;
}

/// [`Store`] backed by a sea-orm connection (SQLite in practice).
///
/// The schema is owned by the `migration` crate: run it before building a
/// ledger on top of this store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    database: DatabaseConnection,
}

impl SqliteStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn all_expenses(&self) -> ResultLedger<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Expense::try_from).collect()
    }

    async fn add_expense(&self, expense: &Expense) -> ResultLedger<Uuid> {
        expenses::ActiveModel::from(expense)
            .insert(&self.database)
            .await?;
        Ok(expense.id)
    }

    async fn put_expense(&self, expense: &Expense) -> ResultLedger<()> {
        expenses::Entity::insert(expenses::ActiveModel::from(expense))
            .on_conflict(
                OnConflict::column(expenses::Column::Id)
                    .update_columns([
                        expenses::Column::Name,
                        expenses::Column::AmountRef,
                        expenses::Column::Constant,
                        expenses::Column::Checked,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }

    async fn delete_expense(&self, id: Uuid) -> ResultLedger<()> {
        let result = expenses::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn load_income(&self) -> ResultLedger<Option<IncomeData>> {
        income::Entity::find_by_id(income::INCOME_KEY.to_string())
            .one(&self.database)
            .await?
            .map(|model| IncomeData::from_json(&model.value))
            .transpose()
    }

    async fn save_income(&self, income: &IncomeData) -> ResultLedger<()> {
        income::Entity::insert(income::ActiveModel::income(*income)?)
            .on_conflict(
                OnConflict::column(income::Column::Key)
                    .update_column(income::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }
}
