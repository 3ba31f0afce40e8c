//! Record normalizer: coerce any raw record into a canonical [`Transaction`].
//!
//! Normalization is total. A malformed field degrades to a conservative
//! default (`amount = 0`, `type = expense`, `description = ""`, category
//! fallback label, today's date) and never rejects the record.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use serde_json::Value;

use crate::ids::{IdSource, UuidIds};
use crate::raw::{Field, RawInput};
use crate::time::{Clock, SystemClock, recover_date};
use crate::transaction::{FALLBACK_CATEGORY, Transaction, TxType};

/// Coerce a loosely typed amount. Anything non-numeric, non-finite or
/// negative becomes 0.
pub fn coerce_amount(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };

    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

/// `income` or the localized income word; everything else is an expense.
pub fn coerce_type(value: Option<&Value>) -> TxType {
    match value {
        Some(Value::String(s)) => TxType::classify(s),
        _ => TxType::Expense,
    }
}

/// Converts [`RawInput`] records into canonical transactions.
///
/// "Today" and fresh ids come from injected sources so results are
/// reproducible under test.
#[derive(Clone)]
pub struct Normalizer {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
    fallback_category: String,
}

impl Normalizer {
    pub fn new(clock: impl Clock + 'static, ids: impl IdSource + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
            ids: Arc::new(ids),
            fallback_category: FALLBACK_CATEGORY.to_string(),
        }
    }

    /// Builder pattern: override the label used for uncategorized records
    pub fn with_fallback_category(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.fallback_category = label;
        }
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// Normalize one record. Never fails.
    pub fn normalize(&self, raw: &RawInput) -> Transaction {
        let id = raw.text(Field::Id).unwrap_or_else(|| self.ids.next_id());
        let date = self.resolve_date(raw);
        let category = raw
            .text(Field::Category)
            .unwrap_or_else(|| self.fallback_category.clone());
        let amount = coerce_amount(raw.get(Field::Amount));
        let description = raw.text(Field::Description).unwrap_or_default();
        let tx_type = coerce_type(raw.get(Field::Type));

        let mut txn = Transaction::new(id, date, category, amount, description, tx_type);
        txn.receipt = raw.text(Field::Receipt);
        txn
    }

    /// Normalize a batch, preserving input order.
    pub fn normalize_all(&self, raws: &[RawInput]) -> Vec<Transaction> {
        raws.iter().map(|raw| self.normalize(raw)).collect()
    }

    fn resolve_date(&self, raw: &RawInput) -> NaiveDate {
        match raw.text(Field::Date) {
            Some(text) => recover_date(&text).unwrap_or_else(|| {
                let today = self.clock.today();
                warn!("unrecognized date {text:?}, using {today}");
                today
            }),
            None => {
                debug!("record has no date, using today");
                self.clock.today()
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(SystemClock::default(), UuidIds)
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("today", &self.clock.today())
            .field("fallback_category", &self.fallback_category)
            .finish()
    }
}
