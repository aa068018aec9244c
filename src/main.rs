use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use video_games_loader::util::{env as env_util, logging};
use video_games_loader::{run, LoaderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "vg_load",
    version,
    about = "Clean the sales and ratings exports and reload them into SQLite"
)]
struct Cli {
    /// Sales export (defaults to $VG_SALES_CSV or vgsales.csv)
    sales_csv: Option<PathBuf>,

    /// Ratings export (defaults to $VG_RATINGS_CSV or games.csv)
    ratings_csv: Option<PathBuf>,

    /// Destination database (defaults to $VG_DATABASE_PATH or video_games.db)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enforce the declared foreign keys while loading
    #[arg(long, default_value_t = false)]
    enforce_foreign_keys: bool,
}

impl Cli {
    fn into_config(self) -> LoaderConfig {
        let base = LoaderConfig::from_env();
        LoaderConfig {
            sales_csv: self.sales_csv.unwrap_or(base.sales_csv),
            ratings_csv: self.ratings_csv.unwrap_or(base.ratings_csv),
            database_path: self.database.unwrap_or(base.database_path),
            enforce_foreign_keys: self.enforce_foreign_keys || base.enforce_foreign_keys,
        }
    }
}

fn main() -> Result<()> {
    env_util::init_env();
    logging::init_tracing(logging::DEFAULT_FILTER).context("logging setup")?;

    let config = Cli::parse().into_config();
    info!(
        sales = %config.sales_csv.display(),
        ratings = %config.ratings_csv.display(),
        database = %config.database_path.display(),
        "starting load"
    );

    match run(&config) {
        Ok(summary) => {
            info!(
                games = summary.load.games,
                sales = summary.load.sales,
                ratings = summary.load.ratings,
                "run complete"
            );
            println!("All data inserted successfully!");
            Ok(())
        }
        Err(err) => {
            let code = err.exit_code();
            let report = anyhow::Error::new(err);
            error!("{report:#}");
            eprintln!("Error: {report:#}");
            std::process::exit(code);
        }
    }
}
