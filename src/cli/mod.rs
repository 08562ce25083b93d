pub mod accounts;
pub mod categories;
pub mod export;
pub mod import;
pub mod init;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "penny",
    about = "Personal finance tracker: import bank files, export CSV, build PDF reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Penny: choose a data directory and initialize the database.
    Init {
        /// Path for Penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Import transactions from a CSV or OFX/QFX file.
    Import {
        /// Path to the file to import
        file: String,
        /// File format: csv or ofx (default: detected from the file)
        #[arg(long)]
        format: Option<String>,
        /// Import without the preview confirmation step
        #[arg(long)]
        yes: bool,
    },
    /// Export transactions or reports.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Show a financial report for a month in the terminal.
    Report {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show the data directory and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// Add a new account.
    Add {
        /// Account name, e.g. 'Checking'
        name: String,
        /// Account type: checking, savings, credit_card, cash
        #[arg(long = "type", default_value = "checking")]
        account_type: String,
    },
    /// List all accounts.
    List,
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// Add a new category.
    Add {
        /// Category name, e.g. 'Food & Dining'
        name: String,
        /// Category kind: income or expense
        #[arg(long)]
        kind: String,
        /// Display color, e.g. '#06b6d4'
        #[arg(long)]
        color: Option<String>,
    },
    /// List all categories.
    List,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export transactions to CSV.
    Csv {
        /// Start date: YYYY-MM-DD
        #[arg(long = "from")]
        from_date: Option<String>,
        /// End date: YYYY-MM-DD
        #[arg(long = "to")]
        to_date: Option<String>,
        /// Output file path
        #[arg(long)]
        output: Option<String>,
    },
    /// Export a financial report to PDF.
    #[cfg(feature = "pdf")]
    Report {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Output file path
        #[arg(long)]
        output: Option<String>,
    },
}
