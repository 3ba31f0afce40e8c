//! The one place transactions get sorted.

use ledger_core::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    /// Newest first
    #[default]
    Descending,
}

/// Stable sort by date; same-day entries keep their input order.
pub fn sort_by_date(txns: &[Transaction], order: SortOrder) -> Vec<Transaction> {
    let mut out = txns.to_vec();
    match order {
        SortOrder::Ascending => out.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => out.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledger_core::TxType;

    fn txn(id: &str, d: u32) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
        Transaction::new(id, date, "기타", 1.0, "", TxType::Expense)
    }

    #[test]
    fn test_descending_is_stable() {
        let txns = vec![txn("a", 1), txn("b", 3), txn("c", 1), txn("d", 2)];
        let ids: Vec<_> = sort_by_date(&txns, SortOrder::Descending)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_ascending() {
        let txns = vec![txn("a", 3), txn("b", 1)];
        let ids: Vec<_> = sort_by_date(&txns, SortOrder::Ascending)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        // input untouched
        assert_eq!(txns[0].id, "a");
    }
}
