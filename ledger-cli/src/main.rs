use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use ledger_core::{Clock, TransactionDraft, TxType, UuidIds};
use ledger_ingest::{
    Codec, ImportError, export_file_name, load_remote_records, read_rows, template_rows,
    to_rows, write_rows_csv, write_rows_xlsx,
};
use ledger_report::{
    CategoryFilter, Dashboard, FilterCriteria, SearchScope, SortOrder, TypeFilter, filter,
    sort_by_date, summarize,
};
use log::{info, warn};
use std::path::{Path, PathBuf};

mod config;
mod render;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "ledger",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGER_BUILD_SHA"), ")"),
    about = "Fee ledger: normalize, report and export transactions"
)]
struct Cli {
    /// Transaction store (default: ~/.ledger/transactions.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the local store with a normalized remote-store dump (JSON array)
    Sync {
        #[arg(long)]
        records: PathBuf,
    },

    /// Import a sheet (.xlsx/.xls/.ods or CSV with 날짜/유형/카테고리/내역/금액 headers)
    Import {
        file: PathBuf,
    },

    /// Record one transaction by hand
    Add {
        #[arg(long, value_enum, default_value_t = Kind::Expense)]
        kind: Kind,
        #[arg(long)]
        category: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Receipt URL or data URI
        #[arg(long)]
        receipt: Option<String>,
    },

    /// Delete a transaction by id
    Remove {
        id: String,
    },

    /// Monthly balance, budget usage and category breakdown
    Dashboard {
        /// YYYY-MM (default: current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,
        #[arg(long)]
        json: bool,
    },

    /// Filtered transaction list, newest first
    List {
        #[arg(long)]
        search: Option<String>,
        /// Also search category labels
        #[arg(long)]
        broad: bool,
        #[arg(long, default_value = "all")]
        category: String,
        /// income | expense | all
        #[arg(long = "type", default_value = "all")]
        tx_type: String,
        /// Inclusive, YYYY-MM-DD
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Inclusive, YYYY-MM-DD
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },

    /// Export every transaction as <org>_<date>.xlsx (or .csv)
    Export {
        #[arg(long, value_enum, default_value_t = SheetFormat::Xlsx)]
        format: SheetFormat,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Write an example import sheet
    Template {
        #[arg(long, value_enum, default_value_t = SheetFormat::Xlsx)]
        format: SheetFormat,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Write ~/.ledger/config.toml with defaults
    InitConfig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Income,
    Expense,
}

impl From<Kind> for TxType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Income => TxType::Income,
            Kind::Expense => TxType::Expense,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    fn ext(self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cfg = config::load_config()?;
    let store = match cli.store {
        Some(p) => p,
        None => state::store_path()?,
    };

    match cli.command {
        Command::Sync { records } => sync(&cfg, &store, &records)?,
        Command::Import { file } => import(&cfg, &store, &file)?,
        Command::Add {
            kind,
            category,
            amount,
            description,
            date,
            receipt,
        } => {
            let date = match date {
                Some(d) => d,
                None => cfg.clock()?.today(),
            };
            let draft = TransactionDraft {
                date,
                tx_type: kind.into(),
                category,
                amount,
                description,
                receipt,
            };
            add(&cfg, &store, draft)?;
        }
        Command::Remove { id } => {
            let mut ledger = state::read_store(&store)?;
            match ledger.remove(&id) {
                Some(txn) => {
                    state::write_store(&store, &ledger)?;
                    println!("Removed {}", render::transaction_line(&txn));
                }
                None => bail!("no transaction with id {id}"),
            }
        }
        Command::Dashboard { month, json } => {
            let ledger = state::read_store(&store)?;
            let (year, month) = match month {
                Some(ym) => ym,
                None => {
                    let today = cfg.clock()?.today();
                    (today.year(), today.month())
                }
            };
            let dash = Dashboard::build(ledger.as_slice(), year, month, cfg.report.monthly_budget);
            if json {
                println!("{}", serde_json::to_string_pretty(&dash)?);
            } else {
                render::print_dashboard(&dash);
            }
        }
        Command::List {
            search,
            broad,
            category,
            tx_type,
            from,
            to,
            json,
        } => {
            let ledger = state::read_store(&store)?;
            let criteria = FilterCriteria {
                text: search,
                scope: if broad {
                    SearchScope::DescriptionAndCategory
                } else {
                    SearchScope::Description
                },
                category: CategoryFilter::parse(&category),
                tx_type: TypeFilter::parse(&tx_type),
                date_from: from,
                date_to: to,
            };
            let sorted = sort_by_date(ledger.as_slice(), SortOrder::Descending);
            let listed = filter(&sorted, &criteria);
            let summary = summarize(&listed);
            if json {
                println!("{}", serde_json::to_string_pretty(&listed)?);
            } else {
                render::print_list(&listed, &summary);
            }
        }
        Command::Export { format, out } => export(&cfg, &store, format, &out)?,
        Command::Template { format, out } => {
            let path = out.join(format!("{}_템플릿.{}", cfg.org.name, format.ext()));
            write_sheet(&path, format, "템플릿", &template_rows())?;
            println!("Wrote {}", path.display());
        }
        Command::InitConfig => {
            let path = config::config_path()?;
            if config::init_config_at(&path)? {
                println!("Wrote {}", path.display());
            } else {
                println!("Config already exists: {}", path.display());
            }
        }
    }

    Ok(())
}

fn parse_month(s: &str) -> std::result::Result<(i32, u32), String> {
    let (y, m) = s
        .trim()
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got {s:?}"))?;
    let year: i32 = y.parse().map_err(|_| format!("bad year in {s:?}"))?;
    let month: u32 = m.parse().map_err(|_| format!("bad month in {s:?}"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month out of range in {s:?}"));
    }
    Ok((year, month))
}

fn sync(cfg: &Config, store: &Path, records: &Path) -> Result<()> {
    let raws = load_remote_records(records)
        .with_context(|| format!("loading {}", records.display()))?;
    let normalizer = cfg.normalizer()?;
    let ledger = ledger_core::Ledger::from_transactions(normalizer.normalize_all(&raws));
    state::write_store(store, &ledger)?;
    println!("Synced {} transaction(s) from {}", ledger.len(), records.display());
    Ok(())
}

fn import(cfg: &Config, store: &Path, file: &Path) -> Result<()> {
    let rows = read_rows(file).with_context(|| format!("reading {}", file.display()))?;
    let codec = Codec::new(cfg.normalizer()?);
    let imported = match codec.from_rows(&rows) {
        Ok(txns) => txns,
        Err(ImportError::NoValidRows) => {
            bail!("{}: no valid rows (every row needs a positive 금액)", file.display())
        }
        Err(e) => return Err(e).with_context(|| format!("importing {}", file.display())),
    };

    let registry = cfg.registry();
    for txn in imported.iter().filter(|t| !registry.is_known(&t.category)) {
        info!("new category {:?} from {}", txn.category, file.display());
    }

    let count = imported.len();
    let mut ledger = state::read_store(store)?;
    ledger.prepend_all(imported);
    state::write_store(store, &ledger)?;
    println!("Imported {count} transaction(s) from {}", file.display());
    Ok(())
}

fn add(cfg: &Config, store: &Path, draft: TransactionDraft) -> Result<()> {
    if !cfg.registry().is_known(&draft.category) {
        warn!("category {:?} is not in the configured list", draft.category);
    }
    let txn = draft.into_transaction(&UuidIds)?;
    let mut ledger = state::read_store(store)?;
    println!("Added {}", render::transaction_line(&txn));
    ledger.insert(txn);
    state::write_store(store, &ledger)?;
    Ok(())
}

fn export(cfg: &Config, store: &Path, format: SheetFormat, out: &Path) -> Result<()> {
    let ledger = state::read_store(store)?;
    if ledger.is_empty() {
        bail!("nothing to export: {} is empty", store.display());
    }
    let today = cfg.clock()?.today();
    let path = out.join(export_file_name(&cfg.org.name, today, format.ext()));
    let rows = to_rows(&sort_by_date(ledger.as_slice(), SortOrder::Descending));
    write_sheet(&path, format, "거래내역", &rows)?;
    println!("Exported {} transaction(s) to {}", rows.len(), path.display());
    Ok(())
}

fn write_sheet(
    path: &Path,
    format: SheetFormat,
    sheet_name: &str,
    rows: &[ledger_ingest::Row],
) -> Result<()> {
    match format {
        SheetFormat::Xlsx => write_rows_xlsx(path, sheet_name, rows),
        SheetFormat::Csv => write_rows_csv(path, rows),
    }
    .with_context(|| format!("writing {}", path.display()))
}
