//! Plain-text rendering for the terminal. Currency and locale formatting
//! live here, never in the engine crates.

use ledger_core::Transaction;
use ledger_ingest::locale_date;
use ledger_report::{Dashboard, Summary};

/// `₩1,234,567` (whole units; fractions are rounded for display only)
pub fn won(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}₩{grouped}")
}

fn signed_won(txn: &Transaction) -> String {
    let sign = if txn.is_income() { '+' } else { '-' };
    format!("{sign}{}", won(txn.amount))
}

pub fn transaction_line(txn: &Transaction) -> String {
    let receipt = if txn.has_receipt() { "영수증" } else { "-" };
    format!(
        "{} | {} | {} | {} | {} | {} | {}",
        locale_date(txn.date),
        txn.tx_type.localized(),
        txn.category,
        txn.description,
        signed_won(txn),
        receipt,
        txn.id
    )
}

pub fn print_dashboard(dash: &Dashboard) {
    println!("# {}-{:02}\n", dash.year, dash.month);
    println!("남은 예산: {}", won(dash.totals.balance));
    println!("예산 대비 {:.1}% 사용 (예산 {})", dash.budget_usage, won(dash.budget));
    println!("수입: {}", won(dash.totals.income));
    println!("지출: {}\n", won(dash.totals.expense));

    println!("## 카테고리별 지출\n");
    if dash.categories.is_empty() {
        println!("이번 달 지출 내역이 없습니다\n");
    } else {
        for share in &dash.categories {
            println!("- {} {} ({:.1}%)", share.category, won(share.amount), share.percent);
        }
        println!();
    }

    println!("## 최근 거래\n");
    if dash.recent.is_empty() {
        println!("이번 달 거래 내역이 없습니다");
    }
    for txn in &dash.recent {
        println!("- {}", transaction_line(txn));
    }
}

pub fn print_list(txns: &[Transaction], summary: &Summary) {
    if txns.is_empty() {
        println!("조건에 맞는 거래 내역이 없습니다");
    }
    for txn in txns {
        println!("{}", transaction_line(txn));
    }
    println!(
        "\n{}건 | 수입 {} | 지출 {}",
        summary.count,
        won(summary.income),
        won(summary.expense)
    );
}
