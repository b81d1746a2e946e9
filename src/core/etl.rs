use crate::core::{BatchSummary, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::BatchMonitor;

/// Runs a [`Pipeline`] end to end: extract, transform, load.
pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
    monitor: BatchMonitor,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: BatchMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<BatchSummary> {
        tracing::info!("Starting batch...");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} companies", records.len());
        self.monitor.finish_phase("Extract");

        // Transform
        let results = self.pipeline.transform(records).await?;
        let total = results.len();
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        let failed = total - succeeded;
        tracing::info!("⚙️ Processed {} companies ({} failed)", total, failed);
        self.monitor.finish_phase("Transform");

        // Load
        let report = self.pipeline.load(results).await?;
        self.monitor.finish_phase("Load");
        self.monitor.log_final_stats(succeeded, failed);

        Ok(BatchSummary {
            total,
            succeeded,
            failed,
            report,
        })
    }
}
