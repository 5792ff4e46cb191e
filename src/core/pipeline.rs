use crate::core::report;
use crate::core::{ConfigProvider, Pipeline, Repository, Result};
use std::cell::RefCell;
use std::io::Write;

use crate::utils::error::RegistrarError;

/// Loads the four input files, computes remaining courses and renders the reports.
pub struct RegistrarPipeline<C: ConfigProvider> {
    config: C,
    warnings: RefCell<Vec<RegistrarError>>,
}

impl<C: ConfigProvider> RegistrarPipeline<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            warnings: RefCell::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Cross-reference warnings collected by the last `extract`.
    pub fn take_warnings(&self) -> Vec<RegistrarError> {
        self.warnings.take()
    }
}

impl<C: ConfigProvider> Pipeline for RegistrarPipeline<C> {
    fn extract(&self) -> Result<Repository> {
        let sources = self.config.source_paths();
        tracing::debug!("Reading sources: {:?}", sources);

        let (repository, warnings) = Repository::load(&sources)?;
        *self.warnings.borrow_mut() = warnings;
        Ok(repository)
    }

    fn transform(&self, mut repository: Repository) -> Result<Repository> {
        repository.compute_remaining();
        Ok(repository)
    }

    fn load<W: Write>(&self, repository: &Repository, out: &mut W) -> Result<()> {
        report::render_all(repository, out)
    }
}
