use uuid::Uuid;

use crate::{Ledger, LedgerError, ResultLedger};

mod balances;
mod expenses;
mod income;

pub use expenses::EditDraft;

impl<S> Ledger<S> {
    fn position(&self, id: Uuid) -> ResultLedger<usize> {
        self.expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }
}

fn normalize_required_name(value: &str) -> ResultLedger<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation(
            "expense name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: f64) -> ResultLedger<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must be > 0, got {amount}"
        )));
    }
    Ok(())
}
