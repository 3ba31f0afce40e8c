//! Known category labels offered to whoever enters a transaction.
//!
//! Categories are an open set: the registry only suggests, it never rejects
//! a label it has not seen before.

use crate::transaction::Transaction;

const DEFAULT_CATEGORIES: &[&str] = &["간식", "행사", "회의비", "물품구매", "학생회비", "기타"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    labels: Vec<String>,
}

impl CategoryRegistry {
    /// Build from labels, dropping blanks and duplicates (first occurrence kept).
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into().trim().to_string();
            if !label.is_empty() && !out.contains(&label) {
                out.push(label);
            }
        }
        Self { labels: out }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_known(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label.trim())
    }

    /// Known labels followed by any label used in `txns` but not yet
    /// registered, in first-seen order.
    pub fn suggestions(&self, txns: &[Transaction]) -> Vec<String> {
        let mut out = self.labels.clone();
        for txn in txns {
            if !out.contains(&txn.category) {
                out.push(txn.category.clone());
            }
        }
        out
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().copied())
    }
}
