//! `generate-table-schema`: print one CREATE TABLE statement.

use clap::Parser;
use colored::Colorize;
use fsschema_cli::{TableCli, logging, run_table};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = TableCli::parse();

    if let Err(e) = logging::init(&cli.log) {
        eprintln!("{} failed to initialize logging: {:#}", "warning:".yellow().bold(), e);
    }

    match run_table(&cli) {
        Ok(sql) => {
            print!("{}", sql);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
