pub mod engine;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod repository;

pub use crate::core::repository::{LoadOutcome, Repository};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SourcePaths};
pub use crate::utils::error::Result;
