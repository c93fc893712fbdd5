mod render;

use anyhow::Result;
use clap::Parser;
use jeach_store::config::{DEFAULT_DB_FILE, DEFAULT_ROWS, DEFAULT_TABLE};
use jeach_store::seed::rng_for;
use jeach_store::{Error, LookupKind, SeedOutcome, Store, StoreConfig, ValueMatch, seed_if_absent};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "jeach",
    version,
    about = "Shows how SQLite's json_each() `id` column shadows a table's row id",
    disable_help_subcommand = true
)]
struct Cli {
    /// Database file; created and seeded only if it does not exist
    #[arg(long = "db", value_name = "PATH", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Rows to seed, and the values 1..=N each pass looks up
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_ROWS)]
    rows: u32,

    /// Seed for the random arrays (defaults to OS entropy)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Compare json_each.value with `=` instead of LIKE
    #[arg(long)]
    exact: bool,

    /// Table name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TABLE)]
    table: String,
}

impl Cli {
    fn into_config(self) -> StoreConfig {
        let value_match = if self.exact {
            ValueMatch::Exact
        } else {
            ValueMatch::Pattern
        };
        StoreConfig::default()
            .set_db_path(self.db)
            .set_table(self.table)
            .set_rows(self.rows)
            .set_seed(self.seed)
            .set_value_match(value_match)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jeach=info,jeach_store=info,warn")),
        )
        .init();

    let config = Cli::parse().into_config();
    config.validate()?;

    let mut out = std::io::stdout().lock();
    let mut rng = rng_for(&config);
    let seeded = seed_if_absent(&config, &mut rng, |_| {
        if let Err(err) = write!(out, ".").and_then(|()| out.flush()) {
            warn!(error = %err, "failed to print seed progress");
        }
    });
    match seeded {
        Ok(SeedOutcome::Created { rows }) => info!(rows, "created store"),
        Ok(SeedOutcome::Skipped) => {}
        Err(err @ Error::Insert { .. }) => {
            render::print_seed_error(&mut out, &err)?;
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    }

    let store = Store::open(&config)?;
    for kind in LookupKind::ALL {
        render::print_pass(&mut out, &store, kind, config.lookup_values())?;
    }
    out.flush()?;
    Ok(())
}
