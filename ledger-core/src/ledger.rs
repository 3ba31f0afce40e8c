//! Insertion-ordered transaction collection.
//!
//! Transactions are never edited in place; a correction is a remove followed
//! by an insert of the re-created record.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Append one transaction.
    pub fn insert(&mut self, txn: Transaction) {
        self.transactions.push(txn);
    }

    /// Put a batch (e.g. a spreadsheet import) in front of the existing
    /// entries, keeping the batch's own order.
    pub fn prepend_all(&mut self, batch: Vec<Transaction>) {
        let mut merged = batch;
        merged.append(&mut self.transactions);
        self.transactions = merged;
    }

    /// Remove by id, returning the removed transaction if it existed.
    pub fn remove(&mut self, id: &str) -> Option<Transaction> {
        let idx = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn into_vec(self) -> Vec<Transaction> {
        self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TxType;
    use chrono::NaiveDate;

    fn txn(id: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        Transaction::new(id, date, "기타", 100.0, id, TxType::Expense)
    }

    #[test]
    fn test_prepend_keeps_batch_order() {
        let mut ledger = Ledger::from_transactions(vec![txn("old")]);
        ledger.prepend_all(vec![txn("new-1"), txn("new-2")]);
        let ids: Vec<_> = ledger.as_slice().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["new-1", "new-2", "old"]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut ledger = Ledger::new();
        ledger.insert(txn("a"));
        ledger.insert(txn("b"));

        let removed = ledger.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get("a").is_none());
        assert!(ledger.remove("missing").is_none());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let ledger = Ledger::from_transactions(vec![txn("a")]);
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        let back: Ledger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
