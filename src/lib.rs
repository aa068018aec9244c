pub mod cleaning;
pub mod database_ops;
pub mod error;
pub mod normalization;
pub mod orchestrator;

pub mod util {
    pub mod env;
    pub mod logging;
}

pub use error::{LoadError, LoadStage, PipelineError};
pub use orchestrator::{run, LoaderConfig, RunSummary};
