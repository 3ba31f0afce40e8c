//! Monthly dashboard: balance, income, expense, budget usage, category
//! shares and the latest entries of one calendar month.

use ledger_core::Transaction;
use log::debug;
use serde::Serialize;

use crate::aggregate::{
    CategoryShare, Totals, budget_usage, by_category, recent_n, totals, windowed_by_month,
};
use crate::order::{SortOrder, sort_by_date};

/// How many entries the "recent" panel shows
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub year: i32,
    pub month: u32,
    pub totals: Totals,
    pub budget: f64,
    /// Percent of `budget` spent this month
    pub budget_usage: f64,
    pub categories: Vec<CategoryShare>,
    /// Newest first
    pub recent: Vec<Transaction>,
    pub transaction_count: usize,
}

impl Dashboard {
    /// Build the view for `year`/`month`.
    ///
    /// The month window is sorted newest first before `recent` is taken, so
    /// callers may pass transactions in any order.
    pub fn build(txns: &[Transaction], year: i32, month: u32, budget: f64) -> Self {
        let window = sort_by_date(&windowed_by_month(txns, year, month), SortOrder::Descending);
        let totals = totals(&window);
        let categories = by_category(&window).shares(totals.expense);
        debug!(
            "dashboard {year}-{month:02}: {} txns, {} categories",
            window.len(),
            categories.len()
        );

        Self {
            year,
            month,
            totals,
            budget,
            budget_usage: budget_usage(totals.expense, budget),
            categories,
            recent: recent_n(&window, RECENT_LIMIT),
            transaction_count: window.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
