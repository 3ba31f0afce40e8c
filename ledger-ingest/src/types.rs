use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const HEADER_DATE: &str = "날짜";
pub const HEADER_TYPE: &str = "유형";
pub const HEADER_CATEGORY: &str = "카테고리";
pub const HEADER_DESCRIPTION: &str = "내역";
pub const HEADER_AMOUNT: &str = "금액";
pub const HEADER_RECEIPT: &str = "영수증 유무";

/// Column order of exported sheets
pub const HEADERS: [&str; 6] = [
    HEADER_DATE,
    HEADER_TYPE,
    HEADER_CATEGORY,
    HEADER_DESCRIPTION,
    HEADER_AMOUNT,
    HEADER_RECEIPT,
];

/// Receipt presence markers
pub const RECEIPT_PRESENT: &str = "O";
pub const RECEIPT_ABSENT: &str = "X";

/// One decoded spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Cell from delimited text: blank is empty, anything else stays text.
    /// Numeric-looking labels such as `0010` keep their spelling; the codec
    /// coerces the amount column itself.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => Cell::Empty,
            text => Cell::Text(text.to_string()),
        }
    }

    /// Cell content as trimmed text; whole numbers render without a fraction.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// A sheet row keyed by (localized) header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set a cell
    pub fn with(mut self, header: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.set(header, cell);
        self
    }

    pub fn set(&mut self, header: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.insert(header.into(), cell.into());
    }

    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.cells.get(header)
    }

    pub fn text(&self, header: &str) -> Option<String> {
        self.get(header).and_then(Cell::as_text)
    }

    /// Cells in export column order; missing headers are empty.
    pub fn ordered(&self) -> Vec<&Cell> {
        const EMPTY: &Cell = &Cell::Empty;
        HEADERS
            .iter()
            .map(|h| self.cells.get(*h).unwrap_or(EMPTY))
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse(" "), Cell::Empty);
        assert_eq!(Cell::parse("50000"), Cell::Text("50000".to_string()));
        assert_eq!(Cell::parse(" 0010 "), Cell::Text("0010".to_string()));
        assert_eq!(Cell::parse("2024-01-15"), Cell::Text("2024-01-15".to_string()));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::Number(50000.0).as_text().as_deref(), Some("50000"));
        assert_eq!(Cell::Number(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(Cell::Text("  ".to_string()).as_text(), None);
    }

    #[test]
    fn test_row_ordered_fills_missing() {
        let row = Row::new().with(HEADER_AMOUNT, 10.0).with(HEADER_DATE, "2024-01-01");
        let ordered = row.ordered();
        assert_eq!(ordered.len(), 6);
        assert_eq!(ordered[0], &Cell::Text("2024-01-01".to_string()));
        assert_eq!(ordered[1], &Cell::Empty);
        assert_eq!(ordered[4], &Cell::Number(10.0));
        assert!(!row.is_blank());
        assert!(Row::new().with(HEADER_TYPE, "").is_blank());
    }
}
