//! Spreadsheet codec: canonical transactions <-> rows with localized headers.
//!
//! Export layout (one row per transaction, input order):
//!   날짜 | 유형 | 카테고리 | 내역 | 금액 | 영수증 유무
//!   2024. 1. 15. | 지출 | 간식 | 학생회 회의 간식 | 50000 | O
//!
//! Import accepts the same layout (or any sheet using those headers), recovers
//! loose dates, drops rows without a positive amount and hands the rest to the
//! [`Normalizer`]. Receipt content cannot live in a sheet; only the O/X marker
//! is written and imported rows carry no receipt.

use chrono::{Datelike, Duration, NaiveDate};
use ledger_core::{
    Field, INCOME_WORD, Normalizer, RawInput, Transaction, TxType, coerce_amount, recover_date,
};
use log::{debug, info, warn};
use serde_json::Value;

use crate::error::ImportError;
use crate::types::{
    Cell, HEADER_AMOUNT, HEADER_CATEGORY, HEADER_DATE, HEADER_DESCRIPTION, HEADER_RECEIPT,
    HEADER_TYPE, RECEIPT_ABSENT, RECEIPT_PRESENT, Row,
};

/// Spreadsheet serial dates (1900 date system) count days from this epoch.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// Serial numbers accepted as dates: 1900-01-01 .. 9999-12-31
const SERIAL_RANGE: std::ops::RangeInclusive<f64> = 1.0..=2_958_465.0;

/// ko-KR locale date string, e.g. `2024. 1. 5.`
pub fn locale_date(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Map transactions to export rows, preserving order.
pub fn to_rows(txns: &[Transaction]) -> Vec<Row> {
    txns.iter().map(to_row).collect()
}

fn to_row(txn: &Transaction) -> Row {
    let receipt = if txn.has_receipt() {
        RECEIPT_PRESENT
    } else {
        RECEIPT_ABSENT
    };
    Row::new()
        .with(HEADER_DATE, locale_date(txn.date))
        .with(HEADER_TYPE, txn.tx_type.localized())
        .with(HEADER_CATEGORY, txn.category.as_str())
        .with(HEADER_DESCRIPTION, txn.description.as_str())
        .with(HEADER_AMOUNT, txn.amount)
        .with(HEADER_RECEIPT, receipt)
}

/// Example rows shipped as the import template
pub fn template_rows() -> Vec<Row> {
    vec![
        Row::new()
            .with(HEADER_DATE, "2024-01-15")
            .with(HEADER_TYPE, "지출")
            .with(HEADER_CATEGORY, "간식")
            .with(HEADER_DESCRIPTION, "학생회 회의 간식")
            .with(HEADER_AMOUNT, 50000.0)
            .with(HEADER_RECEIPT, RECEIPT_PRESENT),
        Row::new()
            .with(HEADER_DATE, "2024-01-10")
            .with(HEADER_TYPE, INCOME_WORD)
            .with(HEADER_CATEGORY, "학생회비")
            .with(HEADER_DESCRIPTION, "2024년 1학기 학생회비")
            .with(HEADER_AMOUNT, 5000000.0)
            .with(HEADER_RECEIPT, RECEIPT_ABSENT),
    ]
}

/// `<org>_<YYYY-MM-DD>.<ext>`
pub fn export_file_name(org: &str, date: NaiveDate, ext: &str) -> String {
    let org = org.trim().replace(['/', '\\', ' '], "_");
    format!("{}_{}.{}", org, date.format("%Y-%m-%d"), ext.trim_start_matches('.'))
}

/// Import side of the codec.
#[derive(Debug, Clone)]
pub struct Codec {
    normalizer: Normalizer,
}

impl Codec {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Decode rows into transactions.
    ///
    /// Rows whose amount is not strictly positive are dropped silently (blank
    /// rows, header artifacts). An empty result is [`ImportError::NoValidRows`].
    pub fn from_rows(&self, rows: &[Row]) -> Result<Vec<Transaction>, ImportError> {
        let mut out = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;

        for row in rows {
            let raw = self.row_to_raw(row);
            if coerce_amount(raw.get(Field::Amount)) <= 0.0 {
                dropped += 1;
                continue;
            }
            out.push(self.normalizer.normalize(&raw));
        }

        if dropped > 0 {
            debug!("dropped {dropped} row(s) without a positive amount");
        }
        if out.is_empty() {
            return Err(ImportError::NoValidRows);
        }
        info!("imported {} of {} row(s)", out.len(), rows.len());
        Ok(out)
    }

    fn row_to_raw(&self, row: &Row) -> RawInput {
        let date = self.recover_row_date(row.get(HEADER_DATE));
        let tx_type = match row.text(HEADER_TYPE) {
            Some(word) if word == INCOME_WORD => TxType::Income,
            _ => TxType::Expense,
        };
        let category = row
            .text(HEADER_CATEGORY)
            .unwrap_or_else(|| self.normalizer.fallback_category().to_string());
        let description = row.text(HEADER_DESCRIPTION).unwrap_or_default();
        let amount = match row.get(HEADER_AMOUNT) {
            Some(Cell::Number(n)) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Some(cell) => cell.as_text().map(Value::String).unwrap_or(Value::Null),
            None => Value::Null,
        };

        RawInput::new()
            .with(Field::Date.key(), date.format("%Y-%m-%d").to_string())
            .with(Field::Type.key(), tx_type.as_str())
            .with(Field::Category.key(), category)
            .with(Field::Description.key(), description)
            .with(Field::Amount.key(), amount)
    }

    fn recover_row_date(&self, cell: Option<&Cell>) -> NaiveDate {
        let recovered = match cell {
            Some(Cell::Number(serial)) => serial_date(*serial),
            Some(cell) => cell.as_text().and_then(|text| recover_date(&text)),
            None => None,
        };
        recovered.unwrap_or_else(|| {
            let today = self.normalizer.today();
            if cell.is_some_and(|c| !c.is_empty()) {
                warn!("unrecognized date cell {cell:?}, using {today}");
            }
            today
        })
    }
}

/// Convert a spreadsheet serial number to a date.
fn serial_date(serial: f64) -> Option<NaiveDate> {
    if !SERIAL_RANGE.contains(&serial) {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
