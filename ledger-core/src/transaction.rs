//! Canonical transaction record shared by every view (dashboard, list, export)

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::IdSource;

/// Localized word for income used by spreadsheets and some remote rows.
pub const INCOME_WORD: &str = "수입";
/// Localized word for expense.
pub const EXPENSE_WORD: &str = "지출";
/// Label used when a record carries no category.
pub const FALLBACK_CATEGORY: &str = "기타";

/// Direction of a transaction. The amount itself is never signed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    #[default]
    Expense,
}

impl TxType {
    /// Wire name (`income` / `expense`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    /// Localized word shown in spreadsheets
    pub fn localized(&self) -> &'static str {
        match self {
            TxType::Income => INCOME_WORD,
            TxType::Expense => EXPENSE_WORD,
        }
    }

    /// Closed two-way classification: `income` or the localized income word,
    /// everything else is an expense.
    pub fn classify(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("income") || value == INCOME_WORD {
            TxType::Income
        } else {
            TxType::Expense
        }
    }
}

/// A normalized ledger entry.
///
/// Serializes to `{id, date: "YYYY-MM-DD", category, amount, description, type, receipt?}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Opaque unique identifier, never reused
    pub id: String,
    /// Calendar date, no time component
    pub date: NaiveDate,
    /// Open-set label, never empty
    pub category: String,
    /// Whole currency units, always >= 0
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    /// URL or data URI of a receipt image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Transaction {
    /// Create a transaction. Category and description are stored trimmed,
    /// negative or non-finite amounts clamp to 0 and a blank category falls
    /// back to [`FALLBACK_CATEGORY`].
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        tx_type: TxType,
    ) -> Self {
        let category: String = category.into();
        let description: String = description.into();
        let category = match category.trim() {
            "" => FALLBACK_CATEGORY.to_string(),
            label => label.to_string(),
        };
        Self {
            id: id.into(),
            date,
            category,
            amount: if amount.is_finite() { amount.max(0.0) } else { 0.0 },
            description: description.trim().to_string(),
            tx_type,
            receipt: None,
        }
    }

    /// Builder pattern: attach a receipt reference
    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.tx_type == TxType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TxType::Expense
    }

    pub fn has_receipt(&self) -> bool {
        self.receipt.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    /// Amount with the direction applied (income positive, expense negative)
    pub fn signed_amount(&self) -> f64 {
        match self.tx_type {
            TxType::Income => self.amount,
            TxType::Expense => -self.amount,
        }
    }

    /// Zero-padded `YYYY-MM-DD`, the canonical wire form of the date
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Manual entry as captured by an entry form, before it becomes a transaction.
///
/// Unlike normalization this is strict: missing fields are reported back to
/// whoever filled in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub tx_type: TxType,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub receipt: Option<String>,
}

impl TransactionDraft {
    pub fn into_transaction(self, ids: &dyn IdSource) -> Result<Transaction> {
        if self.category.trim().is_empty() {
            bail!("category is required");
        }
        if self.description.trim().is_empty() {
            bail!("description is required");
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            bail!("amount must be a positive number, got {}", self.amount);
        }

        let mut txn = Transaction::new(
            ids.next_id(),
            self.date,
            self.category.trim(),
            self.amount,
            self.description.trim(),
            self.tx_type,
        );
        txn.receipt = self.receipt.filter(|r| !r.trim().is_empty());
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transaction_clamps_amount() {
        let txn = Transaction::new("t1", day(2024, 1, 5), "간식", -300.0, "snacks", TxType::Expense);
        assert_eq!(txn.amount, 0.0);

        let txn = Transaction::new("t2", day(2024, 1, 5), "간식", f64::NAN, "snacks", TxType::Expense);
        assert_eq!(txn.amount, 0.0);
    }

    #[test]
    fn test_blank_category_falls_back() {
        let txn = Transaction::new("t1", day(2024, 1, 5), "  ", 10.0, "", TxType::Income);
        assert_eq!(txn.category, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let txn = Transaction::new("t1", day(2024, 1, 5), " 간식\t", 10.0, " 회의 간식 ", TxType::Expense);
        assert_eq!(txn.category, "간식");
        assert_eq!(txn.description, "회의 간식");
    }

    #[test]
    fn test_tx_type_classify() {
        assert_eq!(TxType::classify("income"), TxType::Income);
        assert_eq!(TxType::classify(" Income "), TxType::Income);
        assert_eq!(TxType::classify("수입"), TxType::Income);
        assert_eq!(TxType::classify("지출"), TxType::Expense);
        assert_eq!(TxType::classify("anything else"), TxType::Expense);
        assert_eq!(TxType::classify(""), TxType::Expense);
    }

    #[test]
    fn test_wire_shape() {
        let txn = Transaction::new("t1", day(2024, 2, 9), "행사", 50000.0, "MT", TxType::Expense)
            .with_receipt("https://example.com/r.png");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2024-02-09");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["receipt"], "https://example.com/r.png");

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_receipt_omitted_when_absent() {
        let txn = Transaction::new("t1", day(2024, 2, 9), "행사", 1.0, "", TxType::Income);
        let json = serde_json::to_value(&txn).unwrap();
        assert!(json.get("receipt").is_none());
        assert!(!txn.has_receipt());
        assert_eq!(txn.signed_amount(), 1.0);
    }

    #[test]
    fn test_draft_requires_fields() {
        let ids = SequentialIds::new("tx");
        let draft = TransactionDraft {
            date: day(2024, 3, 1),
            tx_type: TxType::Expense,
            category: "회의비".to_string(),
            amount: 12000.0,
            description: String::new(),
            receipt: None,
        };
        assert!(draft.clone().into_transaction(&ids).is_err());

        let ok = TransactionDraft {
            description: "회의 다과".to_string(),
            ..draft.clone()
        }
        .into_transaction(&ids)
        .unwrap();
        assert_eq!(ok.id, "tx-1");
        assert_eq!(ok.amount, 12000.0);

        let zero = TransactionDraft {
            description: "회의 다과".to_string(),
            amount: 0.0,
            ..draft
        };
        assert!(zero.into_transaction(&ids).is_err());
    }
}
