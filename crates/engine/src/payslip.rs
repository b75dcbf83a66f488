//! Payslip import.
//!
//! A payslip is an HTML export holding one table. Each data row carries an
//! accrual code in its 4th cell and the amount in its 6th cell:
//!
//! ```text
//! | ... | ... | ... | 220 | ... | 2 595,00 р. |
//! ```
//!
//! Code `220` is the salary, code `199` the advance. Every row is scanned, so
//! when a code shows up more than once the last row wins.

use scraper::{ElementRef, Html, Selector};

/// Accrual code of the advance payment.
pub const ADVANCE_CODE: &str = "199";
/// Accrual code of the salary.
pub const SALARY_CODE: &str = "220";

const CODE_CELL: usize = 3;
const VALUE_CELL: usize = 5;
const MIN_CELLS: usize = VALUE_CELL + 1;

/// Values extracted from a payslip, in LOCAL.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Payslip {
    pub salary: f64,
    pub advance: f64,
}

impl Payslip {
    /// `true` when nothing was recognised, which usually means the document
    /// is not in the expected format.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.salary == 0.0 && self.advance == 0.0
    }
}

/// Extracts salary and advance from a payslip document.
///
/// Never fails: rows that are too short are skipped and amounts that do not
/// parse count as `0`.
///
/// ```rust
/// let html = "<table><tr><td></td><td></td><td></td><td>220</td><td></td><td>2 595,00 р.</td></tr></table>";
/// let payslip = engine::payslip::parse(html);
/// assert_eq!(payslip.salary, 2595.0);
/// assert_eq!(payslip.advance, 0.0);
/// ```
#[must_use]
pub fn parse(document: &str) -> Payslip {
    let (Ok(row_selector), Ok(cell_selector)) = (Selector::parse("tr"), Selector::parse("td"))
    else {
        return Payslip::default();
    };

    let html = Html::parse_document(document);
    let mut payslip = Payslip::default();

    for row in html.select(&row_selector) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
        if cells.len() < MIN_CELLS {
            continue;
        }

        let code = cell_text(cells[CODE_CELL]);
        let value = normalize_amount(&cell_text(cells[VALUE_CELL]));

        if code.trim() == ADVANCE_CODE {
            payslip.advance = value;
        }
        if code.trim() == SALARY_CODE {
            payslip.salary = value;
        }
    }

    tracing::debug!(
        salary = payslip.salary,
        advance = payslip.advance,
        "payslip parsed"
    );
    payslip
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}

/// Turns a formatted amount (`"2 595,00 р."`) into a number.
///
/// Keeps only digits, commas and periods, makes the first comma the decimal
/// separator and reads the longest `digits[.digits]` prefix. Anything else
/// yields `0`.
fn normalize_amount(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = kept.replacen(',', ".", 1);

    let mut end = 0;
    let mut seen_dot = false;
    for (idx, c) in normalized.char_indices() {
        match c {
            '0'..='9' => end = idx + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    normalized[..end].parse().unwrap_or(0.0)
}
