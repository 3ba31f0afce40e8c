//! Composable list filters and the statistics shown under a filtered list.
//!
//! All active predicates are AND-combined. The result keeps input order;
//! sort first with [`crate::order::sort_by_date`] for chronological output.

use chrono::NaiveDate;
use ledger_core::{Transaction, TxType};
use serde::Serialize;

use crate::aggregate::totals;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (or blank) means no constraint.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TxType),
}

impl TypeFilter {
    /// `income` / `expense` (or the localized words); anything else is `All`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("income") || value == ledger_core::INCOME_WORD {
            TypeFilter::Only(TxType::Income)
        } else if value.eq_ignore_ascii_case("expense") || value == ledger_core::EXPENSE_WORD {
            TypeFilter::Only(TxType::Expense)
        } else {
            TypeFilter::All
        }
    }
}

/// Which fields the free-text search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    Description,
    DescriptionAndCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub text: Option<String>,
    pub scope: SearchScope,
    pub category: CategoryFilter,
    pub tx_type: TypeFilter,
    /// Inclusive
    pub date_from: Option<NaiveDate>,
    /// Inclusive
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::Only(category.into());
        self
    }

    pub fn with_type(mut self, tx_type: TxType) -> Self {
        self.tx_type = TypeFilter::Only(tx_type);
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Does `txn` pass every active predicate?
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_text(txn)
            && self.matches_category(txn)
            && self.matches_type(txn)
            && self.matches_dates(txn)
    }

    fn matches_text(&self, txn: &Transaction) -> bool {
        let needle = match self.text.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };
        if txn.description.to_lowercase().contains(&needle) {
            return true;
        }
        self.scope == SearchScope::DescriptionAndCategory
            && txn.category.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, txn: &Transaction) -> bool {
        match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => txn.category == *c,
        }
    }

    fn matches_type(&self, txn: &Transaction) -> bool {
        match self.tx_type {
            TypeFilter::All => true,
            TypeFilter::Only(t) => txn.tx_type == t,
        }
    }

    fn matches_dates(&self, txn: &Transaction) -> bool {
        self.date_from.is_none_or(|from| txn.date >= from)
            && self.date_to.is_none_or(|to| txn.date <= to)
    }
}

/// Apply `criteria`, keeping input order.
pub fn filter(txns: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub income: f64,
    pub expense: f64,
}

/// Count and totals of a (filtered) list, computed through [`totals`] so list
/// and dashboard numbers always agree.
pub fn summarize(txns: &[Transaction]) -> Summary {
    let t = totals(txns);
    Summary {
        count: txns.len(),
        income: t.income,
        expense: t.expense,
    }
}

/// Categories in use, first-seen order. Feeds the category selector.
pub fn distinct_categories(txns: &[Transaction]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for txn in txns {
        if !out.contains(&txn.category) {
            out.push(txn.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new("1", day(1, 31), "학생회비", 300_000.0, "1월 회비", TxType::Income),
            Transaction::new("2", day(2, 1), "간식", 12_000.0, "Coffee for meeting", TxType::Expense),
            Transaction::new("3", day(2, 14), "행사", 80_000.0, "발렌타인 행사", TxType::Expense),
            Transaction::new("4", day(2, 28), "학생회비", 50_000.0, "추가 회비", TxType::Income),
            Transaction::new("5", day(3, 1), "간식", 9_000.0, "간식 구매", TxType::Expense),
        ]
    }

    fn ids(txns: &[Transaction]) -> Vec<&str> {
        txns.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_matches_all() {
        let txns = sample();
        assert_eq!(filter(&txns, &FilterCriteria::new()), txns);
        assert_eq!(filter(&txns, &FilterCriteria::new().with_text("  ")).len(), 5);
    }

    #[test]
    fn test_type_filter_preserves_order() {
        let txns = sample();
        let out = filter(&txns, &FilterCriteria::new().with_type(TxType::Income));
        assert_eq!(ids(&out), vec!["1", "4"]);
    }

    #[test]
    fn test_date_range_inclusive() {
        let txns = sample();
        let criteria = FilterCriteria::new().with_date_range(Some(day(2, 1)), Some(day(2, 28)));
        assert_eq!(ids(&filter(&txns, &criteria)), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let txns = sample();
        let out = filter(&txns, &FilterCriteria::new().with_text("COFFEE"));
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn test_search_scope() {
        let txns = sample();
        let narrow = FilterCriteria::new().with_text("행사");
        assert_eq!(ids(&filter(&txns, &narrow)), vec!["3"]);

        let by_category = FilterCriteria::new().with_text("학생회비");
        assert!(filter(&txns, &by_category).is_empty());
        let broad = by_category.with_scope(SearchScope::DescriptionAndCategory);
        assert_eq!(ids(&filter(&txns, &broad)), vec!["1", "4"]);
    }

    #[test]
    fn test_predicates_and_combine() {
        let txns = sample();
        let criteria = FilterCriteria::new()
            .with_category("간식")
            .with_type(TxType::Expense)
            .with_date_range(None, Some(day(2, 28)));
        assert_eq!(ids(&filter(&txns, &criteria)), vec!["2"]);
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("간식"), CategoryFilter::Only("간식".to_string()));
        assert_eq!(TypeFilter::parse("수입"), TypeFilter::Only(TxType::Income));
        assert_eq!(TypeFilter::parse("expense"), TypeFilter::Only(TxType::Expense));
        assert_eq!(TypeFilter::parse("all"), TypeFilter::All);
    }

    #[test]
    fn test_summarize() {
        let txns = sample();
        let feb = filter(&txns, &FilterCriteria::new().with_date_range(Some(day(2, 1)), Some(day(2, 29))));
        let summary = summarize(&feb);
        assert_eq!(summary, Summary { count: 3, income: 50_000.0, expense: 92_000.0 });
    }

    #[test]
    fn test_distinct_categories() {
        assert_eq!(distinct_categories(&sample()), vec!["학생회비", "간식", "행사"]);
    }

    #[test]
    fn test_idempotent() {
        let txns = sample();
        let criteria = FilterCriteria::new().with_type(TxType::Expense);
        assert_eq!(filter(&txns, &criteria), filter(&txns, &criteria));
    }
}
