use engine::{Ledger, Store, parse_amount_or_zero, payslip};

use crate::{
    cli::{AddArgs, Command, DeleteArgs, EditArgs, IncomeArgs, ListArgs},
    error::{AppError, Result},
    view,
};

/// Runs one command against the ledger and returns what to print.
pub async fn run<S: Store>(ledger: &mut Ledger<S>, command: Command) -> Result<String> {
    match command {
        Command::List(args) => Ok(list(ledger, &args)),
        Command::Add(args) => add(ledger, args).await,
        Command::Edit(args) => edit(ledger, args).await,
        Command::Delete(args) => delete(ledger, args).await,
        Command::Check { id } => {
            let expense = ledger.set_checked(id, true).await?;
            Ok(format!("checked: {}", expense.name))
        }
        Command::Uncheck { id } => {
            let expense = ledger.set_checked(id, false).await?;
            Ok(format!("unchecked: {}", expense.name))
        }
        Command::Income(args) => income(ledger, args).await,
        Command::Import { file } => {
            let bytes = tokio::fs::read(&file).await?;
            import(ledger, &String::from_utf8_lossy(&bytes)).await
        }
        Command::Balance => Ok(view::balance(&ledger.balance())),
        Command::Receipt => Ok(view::receipt(&ledger.receipt())),
        Command::Rate => Ok(format!("1 USD = {:.4} BYN", ledger.rate())),
    }
}

fn list<S: Store>(ledger: &Ledger<S>, args: &ListArgs) -> String {
    let show_constant = !args.regular;
    let show_regular = !args.constant;
    view::expense_list(
        &ledger.constant_expenses(),
        &ledger.regular_expenses(),
        &ledger.balance(),
        show_constant,
        show_regular,
    )
}

async fn add<S: Store>(ledger: &mut Ledger<S>, args: AddArgs) -> Result<String> {
    let amount = parse_amount_or_zero(&args.amount);
    let expense = ledger
        .add_expense(&args.name, amount, args.currency, args.constant)
        .await?;
    Ok(format!(
        "added {}",
        view::expense_line(&expense, ledger.rate())
    ))
}

/// Fields left out are taken from the edit draft, so `edit <id>` alone
/// re-saves the expense unchanged.
async fn edit<S: Store>(ledger: &mut Ledger<S>, args: EditArgs) -> Result<String> {
    let draft = ledger.edit_draft(args.id)?;
    tracing::debug!("editing {}", view::draft(&draft));

    let name = args.name.unwrap_or(draft.name);
    // A draft amount only makes sense in the draft currency.
    let (amount, currency) = match args.amount.as_deref() {
        Some(raw) => (
            parse_amount_or_zero(raw),
            args.currency.unwrap_or(draft.currency),
        ),
        None => (draft.amount, draft.currency),
    };

    let expense = ledger
        .edit_expense(args.id, &name, amount, currency)
        .await?;
    Ok(format!(
        "edited {}",
        view::expense_line(&expense, ledger.rate())
    ))
}

async fn delete<S: Store>(ledger: &mut Ledger<S>, args: DeleteArgs) -> Result<String> {
    let name = ledger.expense(args.id)?.name.clone();
    if !args.yes {
        return Err(AppError::Aborted(format!(
            "not deleting '{name}': pass --yes to confirm"
        )));
    }

    ledger.delete_expense(args.id).await?;
    Ok(format!("deleted: {name}"))
}

async fn income<S: Store>(ledger: &mut Ledger<S>, args: IncomeArgs) -> Result<String> {
    let current = ledger.income();
    let salary = args
        .salary
        .as_deref()
        .map_or(current.salary, parse_amount_or_zero);
    let advance = args
        .advance
        .as_deref()
        .map_or(current.advance, parse_amount_or_zero);

    let income = ledger.set_income(salary, advance).await?;
    Ok(format!("income: {}", view::income(income)))
}

/// Replaces income with the payslip values, whatever they were before.
async fn import<S: Store>(ledger: &mut Ledger<S>, document: &str) -> Result<String> {
    let parsed = payslip::parse(document);
    let income = ledger.set_income(parsed.salary, parsed.advance).await?;

    let mut out = format!("payslip imported: {}", view::income(income));
    if parsed.is_empty() {
        tracing::warn!("payslip contained no salary or advance rows");
        out.push_str("\nwarning: no salary or advance found, is this the right file?");
    }
    Ok(out)
}
