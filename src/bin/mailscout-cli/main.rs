mod args;
mod output;

use anyhow::Result;
#[cfg(feature = "with-serde")]
use anyhow::Context;
#[cfg(not(feature = "with-serde"))]
use anyhow::bail;
use clap::Parser;
use mailscout::{BulkEntry, Scout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Cli, Commands, names_from_args};
use output::{Report, write_report};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = match &cli.cmd {
        Commands::Find {
            domain,
            names,
            scout,
        } => {
            let scout = Scout::new(scout.to_options());
            let names = names_from_args(names);
            Report::Results(scout.find_valid_emails(domain, names.as_ref()))
        }
        Commands::Bulk { input, scout } => {
            let entries = read_bulk_entries(input.as_deref())?;
            let scout = Scout::new(scout.to_options());
            Report::Bulk(scout.find_valid_emails_bulk(&entries))
        }
        Commands::Candidates {
            domain,
            names,
            scout,
        } => {
            let scout = Scout::new(scout.to_options());
            let names = names_from_args(names);
            Report::Candidates(scout.candidates(domain, names.as_ref()))
        }
    };

    write_report(&report, &cli)?;

    // exit codes: 0 found, 2 none found, 1 fatal
    if report.none_found() {
        std::process::exit(2);
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("mailscout={default_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "with-serde")]
fn read_bulk_entries(input: Option<&str>) -> Result<Vec<BulkEntry>> {
    use std::io::Read;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("read {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parse bulk input as a JSON array")
}

#[cfg(not(feature = "with-serde"))]
fn read_bulk_entries(_: Option<&str>) -> Result<Vec<BulkEntry>> {
    bail!("bulk requires the 'with-serde' feature")
}
