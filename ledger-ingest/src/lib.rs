//! ledger-ingest: spreadsheet codec, sheet file I/O and remote-dump loading.

pub mod codec;
pub mod error;
pub mod remote;
pub mod sheet;
pub mod types;

pub use codec::{Codec, export_file_name, locale_date, template_rows, to_rows};
pub use error::ImportError;
pub use remote::{load_remote_records, parse_remote_records};
pub use sheet::{
    read_rows, read_rows_csv, read_rows_xlsx, rows_from_csv_reader, write_rows_csv,
    write_rows_csv_to, write_rows_xlsx,
};
pub use types::{Cell, HEADERS, Row};
