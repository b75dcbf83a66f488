use crate::{Balance, Ledger, Receipt, Store};

impl<S: Store> Ledger<S> {
    /// Income, used and remaining amounts, with per-partition subtotals.
    pub fn balance(&self) -> Balance {
        Balance::compute(&self.expenses, self.income, self.rate.get())
    }

    pub fn receipt(&self) -> Receipt {
        Receipt::compute(&self.expenses, self.income, self.rate.get())
    }
}
