//! PURDATA row mapping and CSV generation.

use serde::{Deserialize, Serialize};

use crate::core::{AggregatedExpenseRow, FinalizedReceiptRecord, FormatCode, ReceiptError};

/// Column headers, in sheet order. Column 15 has no header.
pub const PURDATA_COLUMNS: [&str; 24] = [
    "序號",
    "憑證日期",
    "發票號碼",
    "憑證類別",
    "憑證號碼",
    "交易幣別",
    "發票/憑證類別",
    "格式代號",
    "單據憑證日期",
    "專案代號",
    "部門代號",
    "銷售人統一編號",
    "銷售人名稱",
    "摘要",
    "",
    "未稅金額",
    "進項稅額",
    "金額總計",
    "結帳號碼",
    "結帳狀態",
    "結帳人",
    "來源碼",
    "應付立帳號碼",
    "傳票編號",
];

/// Fixed voucher fields written on every PURDATA row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// 憑證日期 code.
    pub voucher_date_code: String,
    /// 憑證類別.
    pub voucher_category: String,
    /// 憑證號碼.
    pub voucher_number: String,
    /// 交易幣別 (1 = NTD).
    pub currency: u8,
    /// 結帳號碼.
    pub settlement_account: String,
    /// 結帳狀態.
    pub settlement_status: u8,
    /// 結帳人.
    pub settler: u8,
    /// 來源碼.
    pub source_code: String,
    /// 應付立帳號碼, left empty when unset.
    pub account_payable_code: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            voucher_date_code: "HD".into(),
            voucher_category: "721401318".into(),
            voucher_number: "03251000".into(),
            currency: 1,
            settlement_account: "126200".into(),
            settlement_status: 1,
            settler: 0,
            source_code: "N".into(),
            account_payable_code: None,
        }
    }
}

/// Builder for [`LedgerConfig`].
#[derive(Debug, Default)]
pub struct LedgerConfigBuilder {
    config: LedgerConfig,
}

impl LedgerConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voucher category (憑證類別).
    pub fn voucher_category(mut self, category: impl Into<String>) -> Self {
        self.config.voucher_category = category.into();
        self
    }

    /// Set the voucher number (憑證號碼).
    pub fn voucher_number(mut self, number: impl Into<String>) -> Self {
        self.config.voucher_number = number.into();
        self
    }

    /// Set the settlement account (結帳號碼).
    pub fn settlement_account(mut self, account: impl Into<String>) -> Self {
        self.config.settlement_account = account.into();
        self
    }

    /// Set the account-payable code (應付立帳號碼); empty strings clear it.
    pub fn account_payable_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.config.account_payable_code = (!code.is_empty()).then_some(code);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> LedgerConfig {
        self.config
    }
}

/// One PURDATA data row (intermediate representation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    /// 1-based sequence number.
    pub sequence: usize,
    /// 發票號碼.
    pub invoice_number: String,
    /// 發票/憑證類別, `I` or `Q`.
    pub ledger_type: &'static str,
    /// 格式代號.
    pub format_code: FormatCode,
    /// 單據憑證日期 as `YYYYMMDD`; `None` when the date is unknown.
    pub document_date: Option<String>,
    /// 銷售人統一編號.
    pub seller_vat: String,
    /// 銷售人名稱.
    pub seller_name: String,
    /// 摘要; set on consolidated rows.
    pub memo: Option<String>,
    /// 未稅金額.
    pub tax_exclusive_amount: i64,
    /// 進項稅額.
    pub tax_amount: i64,
    /// 金額總計.
    pub total_amount: i64,
}

impl LedgerRow {
    /// Map a finalized record.
    pub fn from_record(sequence: usize, record: &FinalizedReceiptRecord) -> Self {
        Self {
            sequence,
            invoice_number: record.invoice_number.clone(),
            ledger_type: record.format_code.ledger_type(),
            format_code: record.format_code,
            document_date: document_date(&record.date),
            seller_vat: record.seller_vat.clone(),
            seller_name: record.seller.name.clone(),
            memo: None,
            tax_exclusive_amount: record.tax_exclusive_amount,
            tax_amount: record.tax_amount,
            total_amount: record.total_amount,
        }
    }

    /// Map an expense-report row; consolidated rows note their invoice count.
    pub fn from_aggregated(sequence: usize, row: &AggregatedExpenseRow) -> Self {
        let mut out = Self::from_record(sequence, &row.record);
        if row.aggregated {
            out.memo = Some(format!("彙總 {} 張", row.count));
        }
        out
    }
}

/// Number expense-report rows for export.
pub fn ledger_rows(rows: &[AggregatedExpenseRow]) -> Vec<LedgerRow> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| LedgerRow::from_aggregated(i + 1, row))
        .collect()
}

fn document_date(date: &str) -> Option<String> {
    let digits = date.replace('-', "");
    let is_date = digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_digit());
    is_date.then_some(digits)
}

/// Generate PURDATA CSV: header line plus one line per row, CRLF-terminated.
///
/// Text cells are always quoted, numeric cells are bare, and zero amounts are
/// left empty.
pub fn to_purdata_csv(rows: &[LedgerRow], config: &LedgerConfig) -> Result<String, ReceiptError> {
    if rows.is_empty() {
        return Err(ReceiptError::Export("no rows to export".into()));
    }

    let mut out = String::new();
    for (i, header) in PURDATA_COLUMNS.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        csv_field_str(&mut out, header);
    }
    out.push_str("\r\n");

    for row in rows {
        write_data_row(&mut out, row, config);
    }
    Ok(out)
}

fn write_data_row(out: &mut String, row: &LedgerRow, config: &LedgerConfig) {
    let cells: [Cell<'_>; 24] = [
        Cell::Text(row.sequence.to_string().into()),
        Cell::Text(config.voucher_date_code.as_str().into()),
        Cell::Text(row.invoice_number.as_str().into()),
        Cell::Text(config.voucher_category.as_str().into()),
        Cell::Text(config.voucher_number.as_str().into()),
        Cell::Number(i64::from(config.currency)),
        Cell::Text(row.ledger_type.into()),
        Cell::Text(row.format_code.to_string().into()),
        row.document_date
            .as_deref()
            .map_or(Cell::Empty, |d| Cell::Text(d.into())),
        Cell::Empty,
        Cell::Empty,
        Cell::Text(row.seller_vat.as_str().into()),
        Cell::Text(row.seller_name.as_str().into()),
        row.memo.as_deref().map_or(Cell::Empty, |m| Cell::Text(m.into())),
        Cell::Empty,
        amount(row.tax_exclusive_amount),
        amount(row.tax_amount),
        amount(row.total_amount),
        Cell::Text(config.settlement_account.as_str().into()),
        Cell::Number(i64::from(config.settlement_status)),
        Cell::Number(i64::from(config.settler)),
        Cell::Text(config.source_code.as_str().into()),
        config
            .account_payable_code
            .as_deref()
            .map_or(Cell::Empty, |c| Cell::Text(c.into())),
        Cell::Empty,
    ];

    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match cell {
            Cell::Text(s) => csv_field_str(out, s),
            Cell::Number(n) => out.push_str(&n.to_string()),
            Cell::Empty => {}
        }
    }
    out.push_str("\r\n");
}

enum Cell<'a> {
    Text(std::borrow::Cow<'a, str>),
    Number(i64),
    Empty,
}

fn amount(value: i64) -> Cell<'static> {
    if value == 0 {
        Cell::Empty
    } else {
        Cell::Number(value)
    }
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    // Escape internal double quotes
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}
