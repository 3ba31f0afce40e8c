//! Sheet file I/O: CSV and XLSX in both directions.
//!
//! Decoding is header-driven: whatever the first line calls a column is the
//! key the codec looks for. A UTF-8 BOM on the first header is stripped
//! (spreadsheet tools add one when saving CSV). Workbooks are read from their
//! first sheet only.

use std::io::{Read, Write};
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use log::{debug, info};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::ImportError;
use crate::types::{Cell, HEADERS, Row};

/// Extensions decoded as workbooks; anything else is read as CSV.
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Read a sheet from disk, choosing the decoder by file extension.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>, ImportError> {
    let path = path.as_ref();
    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)));
    if is_workbook {
        read_rows_xlsx(path)
    } else {
        read_rows_csv(path)
    }
}

/// Read the first worksheet of a workbook. Date-formatted cells come back as
/// serial numbers for the codec to convert.
pub fn read_rows_xlsx(path: impl AsRef<Path>) -> Result<Vec<Row>, ImportError> {
    let path = path.as_ref();
    let mut workbook: Sheets<_> = open_workbook_auto(path)?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheets)?;
    let range = workbook.worksheet_range(&first)?;

    let mut lines = range.rows();
    let Some(header_line) = lines.next() else {
        debug!("sheet {first:?} in {} is empty", path.display());
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_line
        .iter()
        .map(|data| {
            workbook_cell(data)
                .as_text()
                .map(|h| h.trim_start_matches('\u{feff}').to_string())
                .unwrap_or_default()
        })
        .collect();

    let mut rows = Vec::new();
    for line in lines {
        let mut row = Row::new();
        for (header, data) in headers.iter().zip(line) {
            if header.is_empty() {
                continue;
            }
            row.set(header.as_str(), workbook_cell(data));
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }
    info!("read {} row(s) from sheet {first:?} of {}", rows.len(), path.display());
    Ok(rows)
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::parse(s),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
    }
}

/// Read a CSV sheet from disk.
pub fn read_rows_csv(path: impl AsRef<Path>) -> Result<Vec<Row>, ImportError> {
    let file = std::fs::File::open(path.as_ref())?;
    let rows = rows_from_csv_reader(file)?;
    info!("read {} row(s) from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

/// Decode CSV text into rows keyed by the header line.
pub fn rows_from_csv_reader<R: Read>(reader: R) -> Result<Vec<Row>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            row.set(header.as_str(), Cell::parse(value));
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Write rows as CSV in export column order.
pub fn write_rows_csv(path: impl AsRef<Path>, rows: &[Row]) -> Result<(), ImportError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_rows_csv_to(file, rows)?;
    info!("wrote {} row(s) to {}", rows.len(), path.as_ref().display());
    Ok(())
}

pub fn write_rows_csv_to<W: Write>(writer: W, rows: &[Row]) -> Result<(), ImportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;
    for row in rows {
        let record: Vec<String> = row
            .ordered()
            .into_iter()
            .map(|cell| cell.as_text().unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows to a single-sheet workbook. Numbers stay numeric cells.
pub fn write_rows_xlsx(
    path: impl AsRef<Path>,
    sheet_name: &str,
    rows: &[Row],
) -> Result<(), ImportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        for (col, cell) in row.ordered().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Number(n) => {
                    worksheet.write_number(r, col, *n)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(r, col, s)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save(path.as_ref())?;
    info!("wrote {} row(s) to {}", rows.len(), path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HEADER_AMOUNT, HEADER_CATEGORY, HEADER_DATE, HEADER_DESCRIPTION};

    #[test]
    fn test_rows_from_csv_with_bom() {
        let text = "\u{feff}날짜,유형,카테고리,내역,금액,영수증 유무\n\
                    2024.1.5,지출,간식,회의 간식,50000,O\n\
                    ,,,,,\n\
                    2024-02-01,수입,학생회비,회비,\"1,000\",X\n";
        let rows = rows_from_csv_reader(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(HEADER_DATE).as_deref(), Some("2024.1.5"));
        assert_eq!(rows[0].text(HEADER_AMOUNT).as_deref(), Some("50000"));
        assert_eq!(rows[1].text(HEADER_AMOUNT).as_deref(), Some("1,000"));
    }

    #[test]
    fn test_csv_writer_uses_header_order() {
        let rows = vec![Row::new()
            .with(HEADER_DESCRIPTION, "간식, 음료")
            .with(HEADER_AMOUNT, 3000.0)];
        let mut buf = Vec::new();
        write_rows_csv_to(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("날짜,유형,카테고리,내역,금액,영수증 유무"));
        assert_eq!(lines.next(), Some(",,,\"간식, 음료\",3000,"));
    }

    #[test]
    fn test_csv_round_trip() {
        let rows = vec![Row::new()
            .with(HEADER_DATE, "2024. 3. 1.")
            .with(HEADER_AMOUNT, 12.5)];
        let mut buf = Vec::new();
        write_rows_csv_to(&mut buf, &rows).unwrap();
        let back = rows_from_csv_reader(buf.as_slice()).unwrap();
        assert_eq!(back[0].text(HEADER_DATE).as_deref(), Some("2024. 3. 1."));
        assert_eq!(back[0].text(HEADER_AMOUNT).as_deref(), Some("12.5"));
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("ledger-sheet-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn numeric_looking_rows() -> Vec<Row> {
        vec![Row::new()
            .with(HEADER_DATE, "2024. 3. 1.")
            .with(HEADER_CATEGORY, "007")
            .with(HEADER_DESCRIPTION, "0010")
            .with(HEADER_AMOUNT, 1500.0)]
    }

    #[test]
    fn test_xlsx_round_trip() {
        let dir = scratch_dir("xlsx");
        let path = dir.join("거래내역.xlsx");
        write_rows_xlsx(&path, "거래내역", &numeric_looking_rows()).unwrap();

        let back = read_rows(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].text(HEADER_DATE).as_deref(), Some("2024. 3. 1."));
        assert_eq!(back[0].text(HEADER_CATEGORY).as_deref(), Some("007"));
        assert_eq!(back[0].text(HEADER_DESCRIPTION).as_deref(), Some("0010"));
        assert_eq!(back[0].get(HEADER_AMOUNT), Some(&Cell::Number(1500.0)));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_rows_dispatches_on_extension() {
        let dir = scratch_dir("dispatch");
        let path = dir.join("ledger.csv");
        write_rows_csv(&path, &numeric_looking_rows()).unwrap();

        let back = read_rows(&path).unwrap();
        assert_eq!(back[0].text(HEADER_DESCRIPTION).as_deref(), Some("0010"));
        assert_eq!(back[0].get(HEADER_AMOUNT), Some(&Cell::Text("1500".to_string())));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_workbook_cells() {
        assert_eq!(workbook_cell(&Data::Int(45306)), Cell::Number(45306.0));
        assert_eq!(workbook_cell(&Data::String(" 0010 ".to_string())), Cell::Text("0010".to_string()));
        assert_eq!(workbook_cell(&Data::Empty), Cell::Empty);
    }
}
