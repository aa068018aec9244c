use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised before anything is written to the database.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(
        "a required input file could not be opened; ensure '{}' and '{}' exist",
        .sales.display(),
        .ratings.display()
    )]
    MissingInput {
        sales: PathBuf,
        ratings: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("column `{column}` missing from {}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("malformed csv in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}

impl PipelineError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Load(_) => 2,
            _ => 1,
        }
    }
}

/// The step of a load that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Begin,
    Schema,
    Games,
    Sales,
    Ratings,
    Commit,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadStage::Begin => "begin",
            LoadStage::Schema => "schema",
            LoadStage::Games => "games",
            LoadStage::Sales => "sales_data",
            LoadStage::Ratings => "ratings_data",
            LoadStage::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Failures at the database boundary. A `Stage` error means the transaction was rolled back.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open database {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database error during {stage}")]
    Stage {
        stage: LoadStage,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to close database")]
    Close {
        #[source]
        source: rusqlite::Error,
    },
}

impl LoadError {
    pub(crate) fn at(stage: LoadStage) -> impl FnOnce(rusqlite::Error) -> LoadError {
        move |source| LoadError::Stage { stage, source }
    }
}
