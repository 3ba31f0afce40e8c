use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Every row was dropped by the validity filter (or the sheet was empty).
    #[error("no valid rows")]
    NoValidRows,
    #[error("remote record #{index} is not an object")]
    NotAnObject { index: usize },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    NoSheets,
}
