//! `generate-schema`: one goose migration for a directory of schema documents.

use clap::Parser;
use colored::Colorize;
use fsschema_cli::{MigrationCli, logging, run_migration};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = MigrationCli::parse();

    if let Err(e) = logging::init(&cli.log) {
        eprintln!("{} failed to initialize logging: {:#}", "warning:".yellow().bold(), e);
    }

    match run_migration(&cli) {
        Ok(report) => {
            if !cli.log.quiet {
                eprintln!(
                    "{} wrote {} table(s) to {}",
                    "done:".green().bold(),
                    report.tables.len(),
                    report.output.display()
                );
                for path in &report.skipped {
                    eprintln!("  {} {}", "skipped:".yellow(), path.display());
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
