// 💸 Expense Entity - shop running costs for the financial summary

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(id: &str, description: &str, amount: f64, date: NaiveDate) -> Self {
        Expense {
            id: id.to_string(),
            description: description.to_string(),
            amount,
            date,
        }
    }
}

/// Load an expense ledger with header `id,description,amount,date`
pub fn load_expenses_csv(csv_path: &Path) -> Result<Vec<Expense>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open expense ledger: {:?}", csv_path))?;

    let mut expenses = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        let expense: Expense =
            result.with_context(|| format!("Failed to parse expense on row {}", line + 1))?;

        if !expense.amount.is_finite() || expense.amount < 0.0 {
            anyhow::bail!(
                "Expense {} has an invalid amount: {}",
                expense.id,
                expense.amount
            );
        }

        expenses.push(expense);
    }

    tracing::debug!(count = expenses.len(), path = ?csv_path, "loaded expense ledger");

    Ok(expenses)
}

/// Sample ledger used when no file is supplied
pub fn default_expenses() -> Vec<Expense> {
    let date = |d: u32| NaiveDate::from_ymd_opt(2024, 8, d).unwrap_or_default();

    vec![
        Expense::new("e1", "Aluguel", 1200.0, date(5)),
        Expense::new("e2", "Compra de Shampoo", 150.0, date(10)),
        Expense::new("e3", "Energia Elétrica", 250.0, date(15)),
    ]
}
