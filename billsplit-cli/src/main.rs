#![warn(clippy::uninlined_format_args)]

mod args;
mod bootstrap;
mod commands;
mod error;

use args::Args;
use billsplit_application::validate_bill;
use billsplit_infrastructure::{InMemoryPaymentStore, load_bill, load_payments};
use bootstrap::{AppConfig, init_logging};
use chrono::Utc;
use clap::Parser;
use error::CliResult;
use std::process;

fn main() {
    init_logging();
    let args = Args::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        process::exit(if err.use_stderr() { 1 } else { 0 });
    });
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> CliResult<()> {
    let config = AppConfig::from_env()?;

    let bills = args
        .paths
        .iter()
        .map(|path| load_bill(path))
        .collect::<Result<Vec<_>, _>>()?;
    for bill in &bills {
        validate_bill(bill)?;
    }

    let store = match &config.payments_path {
        Some(path) => InMemoryPaymentStore::with_records(load_payments(path)?),
        None => InMemoryPaymentStore::new(),
    };

    print!(
        "{}",
        commands::execute(args, &config, &store, &bills, Utc::now())?
    );
    Ok(())
}
