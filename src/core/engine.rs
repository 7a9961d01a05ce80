use crate::core::{Pipeline, RunSummary, SynthesisJob};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct SpeechEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> SpeechEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 只讀取與規劃，不呼叫合成服務
    pub async fn plan(&self) -> Result<Vec<SynthesisJob>> {
        tracing::info!("📥 Reading word list...");
        let words = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} records", words.len());
        self.monitor.log_stats("Read");

        let jobs = self.pipeline.transform(words).await?;
        tracing::info!("🗂️ Planned {} synthesis jobs", jobs.len());
        self.monitor.log_stats("Plan");

        Ok(jobs)
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting speech generation...");

        let jobs = self.plan().await?;

        tracing::info!("🔊 Synthesizing audio...");
        let result = self.pipeline.load(jobs).await;
        self.monitor.log_stats("Synthesize");
        self.monitor.log_final_stats();

        let summary = result?;
        tracing::info!(
            "✅ Wrote {} of {} files in {} ms",
            summary.written.len(),
            summary.total_jobs,
            summary.elapsed().num_milliseconds()
        );

        Ok(summary)
    }
}
