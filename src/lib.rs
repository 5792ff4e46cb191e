pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{
    engine::{ReportEngine, RunSummary},
    pipeline::RegistrarPipeline,
    repository::{LoadOutcome, Repository},
};
pub use domain::model::{Grade, Instructor, Major, RemainingElectives, Student};
pub use domain::ports::SourcePaths;
pub use utils::error::{RegistrarError, Result};
