use crate::{IncomeData, Ledger, Rate, ResultLedger, Store};

impl<S: Store> Ledger<S> {
    pub fn income(&self) -> IncomeData {
        self.income
    }

    /// Replaces salary and advance together. Negative values count as `0`.
    pub async fn set_income(&mut self, salary: f64, advance: f64) -> ResultLedger<IncomeData> {
        let income = IncomeData::clamped(salary, advance);
        self.store.save_income(&income).await?;
        self.income = income;

        tracing::debug!(
            salary = income.salary,
            advance = income.advance,
            "income saved"
        );
        Ok(income)
    }

    /// Current REF→LOCAL multiplier.
    pub fn rate(&self) -> f64 {
        self.rate.get()
    }

    /// Handle to the shared rate, for a background refresh.
    pub fn rate_handle(&self) -> Rate {
        self.rate.clone()
    }

    /// Replaces the rate. A non-positive rate is rejected and the current
    /// one is kept.
    pub fn set_rate(&self, rate: f64) -> ResultLedger<()> {
        self.rate.set(rate).inspect_err(|err| {
            tracing::warn!("rate rejected: {err}");
        })
    }
}
