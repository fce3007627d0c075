pub mod cli;
pub mod datasets;
pub mod db;
pub mod error;
pub mod loader;
pub mod schema;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::{cli::Cli, db::ConnectOptions, loader::TableLoader};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_pgload", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// Runs the full create-and-load sequence once: connect, then for each
/// dataset ensure its table and bulk-load its source file, strictly in
/// catalog order on the one connection. The first failure aborts the run;
/// the connection is released by drop on every path.
pub async fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let options = ConnectOptions {
        host: cli.host,
        port: cli.port,
        dbname: cli.dbname,
        user: cli.user,
    };

    info!("Connecting to {}", options.target());
    let client = options.connect().await?;

    let loader = TableLoader::new(&client, &cli.data_dir, cli.delimiter);
    for spec in datasets::DATASETS {
        info!("Creating {} table", spec.table);
        loader.ensure_table(spec).await?;
        let rows = loader.bulk_load(spec).await?;
        info!("Loaded {rows} row(s) into {}", spec.table);
    }
    info!("Process completed");
    Ok(())
}
