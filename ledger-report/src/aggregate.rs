//! Totals, per-category sums, percentages and month windows.

use std::collections::HashMap;

use chrono::Datelike;
use ledger_core::{Transaction, TxType};
use serde::Serialize;

/// Monthly budget the dashboard measures spending against
pub const DEFAULT_MONTHLY_BUDGET: f64 = 5_000_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    /// income - expense
    pub balance: f64,
}

/// Sum income and expense amounts. No rounding beyond f64.
pub fn totals(txns: &[Transaction]) -> Totals {
    let (income, expense) = txns.iter().fold((0.0, 0.0), |(inc, exp), t| match t.tx_type {
        TxType::Income => (inc + t.amount, exp),
        TxType::Expense => (inc, exp + t.amount),
    });
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySum {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Share of total expense, 0-100
    pub percent: f64,
}

/// Expense sums per category, in first-seen category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryBreakdown {
    entries: Vec<CategorySum>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategorySum> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Attach each category's share of `total_expense`.
    pub fn shares(&self, total_expense: f64) -> Vec<CategoryShare> {
        self.entries
            .iter()
            .map(|e| CategoryShare {
                category: e.category.clone(),
                amount: e.amount,
                percent: percentage_of(e.amount, total_expense),
            })
            .collect()
    }
}

/// Group expense amounts by category. Income is ignored.
pub fn by_category(txns: &[Transaction]) -> CategoryBreakdown {
    let mut entries: Vec<CategorySum> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in txns.iter().filter(|t| t.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&i) => entries[i].amount += txn.amount,
            None => {
                index.insert(txn.category.as_str(), entries.len());
                entries.push(CategorySum {
                    category: txn.category.clone(),
                    amount: txn.amount,
                });
            }
        }
    }

    CategoryBreakdown { entries }
}

/// `part` as a percentage of `total`; 0 when `total` is 0.
pub fn percentage_of(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    part * 100.0 / total
}

/// Percent of the monthly budget consumed by `expense`.
pub fn budget_usage(expense: f64, budget: f64) -> f64 {
    percentage_of(expense, budget)
}

/// Transactions dated in the given calendar month, input order kept.
pub fn windowed_by_month(txns: &[Transaction], year: i32, month: u32) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .cloned()
        .collect()
}

/// First `n` transactions in the caller's order. Does not sort; see
/// [`crate::order::sort_by_date`].
pub fn recent_n(txns: &[Transaction], n: usize) -> Vec<Transaction> {
    txns.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: &str, date: (i32, u32, u32), category: &str, amount: f64, tx_type: TxType) -> Transaction {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Transaction::new(id, date, category, amount, id, tx_type)
    }

    fn reference_set() -> Vec<Transaction> {
        vec![
            txn("1", (2024, 1, 1), "학생회비", 100.0, TxType::Income),
            txn("2", (2024, 1, 2), "A", 40.0, TxType::Expense),
            txn("3", (2024, 1, 3), "B", 10.0, TxType::Expense),
        ]
    }

    #[test]
    fn test_totals() {
        let t = totals(&reference_set());
        assert_eq!(t, Totals { income: 100.0, expense: 50.0, balance: 50.0 });
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn test_by_category() {
        let breakdown = by_category(&reference_set());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.get("A"), Some(40.0));
        assert_eq!(breakdown.get("B"), Some(10.0));
        assert_eq!(breakdown.get("학생회비"), None);
    }

    #[test]
    fn test_by_category_first_seen_order() {
        let txns = vec![
            txn("1", (2024, 1, 1), "Z", 1.0, TxType::Expense),
            txn("2", (2024, 1, 2), "A", 2.0, TxType::Expense),
            txn("3", (2024, 1, 3), "Z", 3.0, TxType::Expense),
        ];
        let breakdown = by_category(&txns);
        let order: Vec<_> = breakdown.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(order, vec!["Z", "A"]);
        assert_eq!(breakdown.get("Z"), Some(4.0));
        assert_eq!(breakdown.total(), 6.0);
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(40.0, 50.0), 80.0);
        assert_eq!(percentage_of(40.0, 0.0), 0.0);
        assert_eq!(percentage_of(0.0, 0.0), 0.0);
        assert_eq!(budget_usage(2_500_000.0, DEFAULT_MONTHLY_BUDGET), 50.0);
    }

    #[test]
    fn test_shares() {
        let breakdown = by_category(&reference_set());
        let shares = breakdown.shares(50.0);
        assert_eq!(shares[0].percent, 80.0);
        assert_eq!(shares[1].percent, 20.0);
    }

    #[test]
    fn test_windowed_by_month() {
        let mut txns = reference_set();
        txns.push(txn("4", (2024, 2, 1), "A", 5.0, TxType::Expense));
        txns.push(txn("5", (2023, 1, 15), "A", 5.0, TxType::Expense));

        let jan: Vec<_> = windowed_by_month(&txns, 2024, 1).into_iter().map(|t| t.id).collect();
        assert_eq!(jan, vec!["1", "2", "3"]);
        assert!(windowed_by_month(&txns, 2024, 3).is_empty());
    }

    #[test]
    fn test_recent_n_does_not_sort() {
        let txns = reference_set();
        let recent: Vec<_> = recent_n(&txns, 2).into_iter().map(|t| t.id).collect();
        assert_eq!(recent, vec!["1", "2"]);
        assert_eq!(recent_n(&txns, 10).len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let txns = reference_set();
        assert_eq!(totals(&txns), totals(&txns));
        assert_eq!(by_category(&txns), by_category(&txns));
    }
}
