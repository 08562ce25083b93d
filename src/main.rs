mod cli;
mod db;
mod error;
mod exporter;
mod fmt;
mod importer;
mod models;
mod ofx;
#[cfg(feature = "pdf")]
mod pdf;
mod reconciler;
mod reports;
mod settings;
mod store;

use clap::Parser;

use cli::{AccountsCommands, CategoriesCommands, Cli, Commands, ExportCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Accounts { command } => match command {
            AccountsCommands::Add { name, account_type } => {
                cli::accounts::add(&name, &account_type)
            }
            AccountsCommands::List => cli::accounts::list(),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::Add { name, kind, color } => {
                cli::categories::add(&name, &kind, color.as_deref())
            }
            CategoriesCommands::List => cli::categories::list(),
        },
        Commands::Import { file, format, yes } => {
            cli::import::run(&file, format.as_deref(), yes)
        }
        Commands::Export { command } => match command {
            ExportCommands::Csv {
                from_date,
                to_date,
                output,
            } => cli::export::csv(from_date, to_date, output),
            #[cfg(feature = "pdf")]
            ExportCommands::Report { month, output } => cli::export::report(month, output),
        },
        Commands::Report { month } => cli::report::run(month),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
