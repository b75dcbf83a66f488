//! Plain-text rendering of ledger state.
//!
//! Every function returns a `String` built from an engine snapshot; nothing
//! here keeps state of its own.

use engine::{Amounts, Balance, Currency, EditDraft, Expense, IncomeData, Receipt};

/// `12.50 USD`
pub fn money(amount: f64, currency: Currency) -> String {
    format!("{amount:.2} {currency}")
}

fn both(amounts: Amounts) -> String {
    format!(
        "{} / {}",
        money(amounts.local, Currency::Local),
        money(amounts.reference, Currency::Ref)
    )
}

fn kind(constant: bool) -> &'static str {
    if constant { "constant" } else { "regular" }
}

pub fn expense_line(expense: &Expense, rate: f64) -> String {
    format!(
        "[{}] {}  {:<24} {:>14} {:>14}  {}",
        if expense.checked { "x" } else { " " },
        expense.id,
        expense.name,
        money(expense.amount_local(rate), Currency::Local),
        money(expense.amount_ref, Currency::Ref),
        kind(expense.constant),
    )
}

/// One section per partition, each followed by its checked subtotal.
pub fn expense_list(
    constant: &[&Expense],
    regular: &[&Expense],
    balance: &Balance,
    show_constant: bool,
    show_regular: bool,
) -> String {
    let section = |title: &str, expenses: &[&Expense], subtotal: Amounts| {
        let mut lines = vec![title.to_string()];
        if expenses.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(
            expenses
                .iter()
                .map(|expense| format!("  {}", expense_line(expense, balance.rate))),
        );
        lines.push(format!("  subtotal: {}", both(subtotal)));
        lines
    };

    let mut lines = Vec::new();
    if show_constant {
        lines.extend(section("Constant expenses", constant, balance.constant));
    }
    if show_regular {
        lines.extend(section("Regular expenses", regular, balance.regular));
    }
    lines.join("\n")
}

pub fn balance(balance: &Balance) -> String {
    [
        format!("rate:      1 USD = {:.4} BYN", balance.rate),
        format!("income:    {}", both(balance.income)),
        format!("constant:  {}", both(balance.constant)),
        format!("regular:   {}", both(balance.regular)),
        format!("used:      {}", both(balance.used)),
        format!("remaining: {}", both(balance.remaining)),
    ]
    .join("\n")
}

pub fn receipt(receipt: &Receipt) -> String {
    let rule = "-".repeat(40);
    let mut lines = vec![
        format!("Income {:>32}", money(receipt.income.local, Currency::Local)),
        rule.clone(),
    ];
    for line in &receipt.lines {
        lines.push(format!(
            "{:<22} {:>17}",
            line.name,
            money(line.amount.local, Currency::Local)
        ));
        lines.push(format!("{:>40}", money(line.amount.reference, Currency::Ref)));
    }
    lines.push(rule);
    lines.push(format!("Used      {}", both(receipt.used)));
    lines.push(format!("Remaining {}", both(receipt.remaining)));
    lines.join("\n")
}

pub fn income(income: IncomeData) -> String {
    format!(
        "salary {}, advance {}, total {}",
        money(income.salary, Currency::Local),
        money(income.advance, Currency::Local),
        money(income.total(), Currency::Local)
    )
}

pub fn draft(draft: &EditDraft) -> String {
    format!("{} {}", draft.name, money(draft.amount, draft.currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(12.5, Currency::Ref), "12.50 USD");
        assert_eq!(money(-3.0, Currency::Local), "-3.00 BYN");
    }

    #[test]
    fn income_line() {
        assert_eq!(
            income(IncomeData::clamped(2595.0, 150.5)),
            "salary 2595.00 BYN, advance 150.50 BYN, total 2745.50 BYN"
        );
    }

    #[test]
    fn balance_report() {
        let report = balance(&Balance::compute(
            &[],
            IncomeData::clamped(300.0, 0.0),
            3.0,
        ));

        assert!(report.contains("rate:      1 USD = 3.0000 BYN"));
        assert!(report.contains("remaining: 300.00 BYN / 100.00 USD"));
    }

    #[test]
    fn receipt_layout() {
        let out = receipt(&Receipt::compute(&[], IncomeData::clamped(90.0, 0.0), 3.0));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Income") && lines[0].ends_with("90.00 BYN"));
        assert_eq!(lines[1], "-".repeat(40));
        assert_eq!(lines[4], "Remaining 90.00 BYN / 30.00 USD");
    }

    #[test]
    fn empty_sections() {
        let balance = Balance::compute(&[], IncomeData::default(), 1.0);
        let out = expense_list(&[], &[], &balance, true, false);

        assert_eq!(
            out,
            "Constant expenses\n  (none)\n  subtotal: 0.00 BYN / 0.00 USD"
        );
    }
}
