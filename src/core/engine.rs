use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub students: usize,
    pub instructors: usize,
    pub majors: usize,
    pub report_bytes: usize,
}

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load. The report is buffered and only written to
    /// `out` once every phase succeeded, so a failed run writes nothing.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        tracing::info!("Starting registrar run");

        tracing::info!("Loading input files...");
        let repository = self.pipeline.extract()?;
        tracing::info!(
            "Loaded {} students, {} instructors, {} majors",
            repository.student_count(),
            repository.instructor_count(),
            repository.major_count()
        );
        self.monitor.log_stats("Extract");

        tracing::info!("Computing remaining courses...");
        let repository = self.pipeline.transform(repository)?;
        self.monitor.log_stats("Transform");

        tracing::info!("Rendering reports...");
        let mut report = Vec::new();
        self.pipeline.load(&repository, &mut report)?;
        out.write_all(&report)?;
        out.flush()?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunSummary {
            students: repository.student_count(),
            instructors: repository.instructor_count(),
            majors: repository.major_count(),
            report_bytes: report.len(),
        })
    }
}
