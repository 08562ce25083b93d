use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnKind {
    Income,
    Expense,
    Transfer,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl FromStr for TxnKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            _ => Err(()),
        }
    }
}

/// Interchange record shared by the CSV and OFX import paths, prior to
/// name-to-id resolution. `amount` is always positive; direction is
/// carried by `kind` alone. `account` applies to income/expense rows,
/// `from_account`/`to_account` to transfers.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub date: String,
    pub kind: TxnKind,
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
    pub account: Option<String>,
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub notes: Option<String>,
}

/// One `<STMTTRN>` block from a bank export. `amount` keeps the bank's
/// sign (negative = outflow); `trn_type` is the bank-reported type string
/// and is informational only.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct RawBankTransaction {
    pub trn_type: String,
    pub date: String,
    pub amount: f64,
    pub fit_id: String,
    pub name: String,
    pub memo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AccountRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub color: Option<String>,
}

/// Persistence-ready record: names resolved to ids where a match existed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTransaction {
    pub kind: TxnKind,
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub notes: Option<String>,
    pub account_id: Option<i64>,
    pub category_id: Option<i64>,
    pub from_account_id: Option<i64>,
    pub to_account_id: Option<i64>,
}

/// Transaction annotated with display names, for export and reports.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    pub date: String,
    pub kind: TxnKind,
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
    pub category_color: Option<String>,
    pub account: Option<String>,
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_income: f64,
    pub transaction_count: usize,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct ReportData {
    pub period: String,
    pub summary: ReportSummary,
    pub category_data: Vec<CategorySlice>,
    pub transactions: Vec<EnrichedTransaction>,
}
