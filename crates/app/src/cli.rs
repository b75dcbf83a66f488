use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::Currency;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "budget")]
#[command(about = "Personal budget ledger: income, expenses and what is left")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Use this rate (1 USD = RATE BYN) instead of fetching it.
    #[arg(long, global = true)]
    pub rate: Option<f64>,
    /// Do not fetch the exchange rate.
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List expenses, grouped into constant and regular.
    List(ListArgs),
    /// Add an expense.
    Add(AddArgs),
    /// Edit name and amount of an expense.
    Edit(EditArgs),
    /// Delete an expense.
    Delete(DeleteArgs),
    /// Count an expense against income.
    Check { id: Uuid },
    /// Stop counting an expense against income.
    Uncheck { id: Uuid },
    /// Set salary and advance (BYN).
    Income(IncomeArgs),
    /// Read salary and advance from a payslip (HTML).
    Import { file: PathBuf },
    /// Show income, used and remaining amounts.
    Balance,
    /// Print a receipt of the checked expenses.
    Receipt,
    /// Show the exchange rate in use.
    Rate,
}

impl Command {
    /// Whether the output depends on the exchange rate.
    pub fn uses_rate(&self) -> bool {
        matches!(
            self,
            Command::List(_)
                | Command::Add(_)
                | Command::Edit(_)
                | Command::Balance
                | Command::Receipt
                | Command::Rate
        )
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only constant expenses.
    #[arg(long, conflicts_with = "regular")]
    pub constant: bool,
    /// Only regular expenses.
    #[arg(long)]
    pub regular: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, allow_negative_numbers = true)]
    pub amount: String,
    #[arg(long, default_value = "BYN", value_parser = parse_currency)]
    pub currency: Currency,
    /// Recurring expense.
    #[arg(long)]
    pub constant: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: Uuid,
    /// New name; the current one is kept when omitted.
    #[arg(long)]
    pub name: Option<String>,
    /// New amount, in `--currency` or, when omitted, in the currency the
    /// expense is shown in for editing.
    #[arg(long, allow_negative_numbers = true)]
    pub amount: Option<String>,
    /// Currency of `--amount`.
    #[arg(long, requires = "amount", value_parser = parse_currency)]
    pub currency: Option<Currency>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: Uuid,
    /// Confirm the deletion.
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct IncomeArgs {
    /// Salary in BYN; the current one is kept when omitted.
    #[arg(long, allow_negative_numbers = true)]
    pub salary: Option<String>,
    /// Advance in BYN; the current one is kept when omitted.
    #[arg(long, allow_negative_numbers = true)]
    pub advance: Option<String>,
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::try_from(raw).map_err(|err| err.to_string())
}
