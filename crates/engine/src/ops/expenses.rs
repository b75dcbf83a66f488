use uuid::Uuid;

use crate::{
    Currency, Expense, Ledger, ResultLedger, Store,
    currency::{to_canonical, to_local},
};

use super::{normalize_required_name, validate_amount};

/// Below this LOCAL amount an expense is offered for editing in LOCAL,
/// otherwise in REF.
const EDIT_IN_LOCAL_BELOW: f64 = 1000.0;

/// Values to pre-fill when editing an expense.
#[derive(Clone, Debug, PartialEq)]
pub struct EditDraft {
    pub name: String,
    pub amount: f64,
    pub currency: Currency,
}

impl<S: Store> Ledger<S> {
    /// Every expense, in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: Uuid) -> ResultLedger<&Expense> {
        let index = self.position(id)?;
        Ok(&self.expenses[index])
    }

    /// Recurring expenses.
    pub fn constant_expenses(&self) -> Vec<&Expense> {
        self.expenses.iter().filter(|e| e.constant).collect()
    }

    /// One-off expenses.
    pub fn regular_expenses(&self) -> Vec<&Expense> {
        self.expenses.iter().filter(|e| !e.constant).collect()
    }

    /// Adds a new, checked expense.
    ///
    /// `amount` is expressed in `currency` and converted to REF with the
    /// current rate before being stored.
    pub async fn add_expense(
        &mut self,
        name: &str,
        amount: f64,
        currency: Currency,
        constant: bool,
    ) -> ResultLedger<Expense> {
        let name = normalize_required_name(name).inspect_err(|err| {
            tracing::warn!("add expense rejected: {err}");
        })?;
        validate_amount(amount).inspect_err(|err| {
            tracing::warn!("add expense rejected: {err}");
        })?;

        let amount_ref = to_canonical(amount, currency, self.rate.get());
        let expense = Expense::new(name, amount_ref, constant);
        self.store.add_expense(&expense).await?;
        self.expenses.push(expense.clone());

        tracing::debug!(id = %expense.id, amount_ref, constant, "expense added");
        Ok(expense)
    }

    /// Replaces name and amount of an expense. `constant` and `checked` are
    /// kept as they are.
    pub async fn edit_expense(
        &mut self,
        id: Uuid,
        name: &str,
        amount: f64,
        currency: Currency,
    ) -> ResultLedger<Expense> {
        let name = normalize_required_name(name).inspect_err(|err| {
            tracing::warn!(%id, "edit expense rejected: {err}");
        })?;
        validate_amount(amount).inspect_err(|err| {
            tracing::warn!(%id, "edit expense rejected: {err}");
        })?;
        let index = self.position(id)?;

        let mut updated = self.expenses[index].clone();
        updated.name = name;
        updated.amount_ref = to_canonical(amount, currency, self.rate.get());
        self.store.put_expense(&updated).await?;
        self.expenses[index] = updated.clone();

        tracing::debug!(%id, amount_ref = updated.amount_ref, "expense edited");
        Ok(updated)
    }

    /// Removes an expense. Asking the user for confirmation is up to the
    /// caller.
    pub async fn delete_expense(&mut self, id: Uuid) -> ResultLedger<()> {
        let index = self.position(id)?;
        self.store.delete_expense(id).await?;
        self.expenses.remove(index);

        tracing::debug!(%id, "expense deleted");
        Ok(())
    }

    /// Includes (`true`) or excludes (`false`) an expense from the balance.
    pub async fn set_checked(&mut self, id: Uuid, checked: bool) -> ResultLedger<Expense> {
        let index = self.position(id)?;

        let mut updated = self.expenses[index].clone();
        updated.checked = checked;
        self.store.put_expense(&updated).await?;
        self.expenses[index] = updated.clone();

        tracing::debug!(%id, checked, "expense toggled");
        Ok(updated)
    }

    /// Picks the currency an expense is best edited in.
    ///
    /// Small amounts (under 1000 in LOCAL) are offered in LOCAL, larger ones
    /// in REF. Saving the draft unchanged gives back the same canonical
    /// amount, up to float rounding.
    pub fn edit_draft(&self, id: Uuid) -> ResultLedger<EditDraft> {
        let expense = self.expense(id)?;
        let local = to_local(expense.amount_ref, self.rate.get());

        let (amount, currency) = if local < EDIT_IN_LOCAL_BELOW {
            (local, Currency::Local)
        } else {
            (expense.amount_ref, Currency::Ref)
        };

        Ok(EditDraft {
            name: expense.name.clone(),
            amount,
            currency,
        })
    }
}
