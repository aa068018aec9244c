//! End-to-end run: clean both exports, then reload the database.
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cleaning::{clean_datasets, CleaningReport};
use crate::database_ops::{load, Db, DbOptions, LoadSummary};
use crate::error::PipelineError;
use crate::util::env::{
    env_flag, env_path, DATABASE_PATH_VAR, DEFAULT_DATABASE_PATH, DEFAULT_RATINGS_CSV,
    DEFAULT_SALES_CSV, ENFORCE_FOREIGN_KEYS_VAR, RATINGS_CSV_VAR, SALES_CSV_VAR,
};

/// Resolved inputs and destination for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub sales_csv: PathBuf,
    pub ratings_csv: PathBuf,
    pub database_path: PathBuf,
    pub enforce_foreign_keys: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sales_csv: PathBuf::from(DEFAULT_SALES_CSV),
            ratings_csv: PathBuf::from(DEFAULT_RATINGS_CSV),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            enforce_foreign_keys: false,
        }
    }
}

impl LoaderConfig {
    /// Well-known file names, overridable through `VG_*` variables (and `.env`).
    pub fn from_env() -> Self {
        Self {
            sales_csv: env_path(SALES_CSV_VAR, DEFAULT_SALES_CSV),
            ratings_csv: env_path(RATINGS_CSV_VAR, DEFAULT_RATINGS_CSV),
            database_path: env_path(DATABASE_PATH_VAR, DEFAULT_DATABASE_PATH),
            enforce_foreign_keys: env_flag(ENFORCE_FOREIGN_KEYS_VAR, false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sales_report: CleaningReport,
    pub ratings_report: CleaningReport,
    pub load: LoadSummary,
}

/// Clean, then load inside one transaction.
///
/// The database is opened only after cleaning succeeds and is closed exactly
/// once whether or not the load commits. A load error wins over a close error.
pub fn run(config: &LoaderConfig) -> Result<RunSummary, PipelineError> {
    let cleaned = clean_datasets(&config.sales_csv, &config.ratings_csv)?;

    info!(path = %config.database_path.display(), "connecting to sqlite database");
    let mut db = Db::open(
        &config.database_path,
        DbOptions {
            enforce_foreign_keys: config.enforce_foreign_keys,
        },
    )?;

    let loaded = load(&mut db, &cleaned.sales, &cleaned.ratings);
    let closed = db.close();

    let load = match (loaded, closed) {
        (Ok(summary), Ok(())) => summary,
        (Ok(_), Err(close_err)) => return Err(close_err.into()),
        (Err(load_err), closed) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "failed to close database after load error");
            }
            return Err(load_err.into());
        }
    };

    Ok(RunSummary {
        sales_report: cleaned.sales_report,
        ratings_report: cleaned.ratings_report,
        load,
    })
}
