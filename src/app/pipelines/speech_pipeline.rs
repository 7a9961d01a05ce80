use crate::core::orchestrator::Orchestrator;
use crate::core::planner::plan_jobs;
use crate::core::reader::read_from_bytes;
use crate::core::{
    ColumnBinding, ConfigProvider, Pipeline, RunSummary, Storage, SynthesisJob, Synthesizer,
    WordList,
};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;

/// 讀取單字表 -> 規劃工作 -> 合成並寫檔
pub struct SpeechPipeline<S: Storage, C: ConfigProvider, Y: Synthesizer> {
    storage: Arc<S>,
    config: C,
    synthesizer: Arc<Y>,
}

impl<S, C, Y> SpeechPipeline<S, C, Y>
where
    S: Storage + 'static,
    C: ConfigProvider,
    Y: Synthesizer + 'static,
{
    pub fn new(storage: S, config: C, synthesizer: Y) -> Self {
        Self {
            storage: Arc::new(storage),
            config,
            synthesizer: Arc::new(synthesizer),
        }
    }

    fn bindings(&self) -> (ColumnBinding, ColumnBinding) {
        (
            ColumnBinding::new(self.config.source_column(), self.config.source_language()),
            ColumnBinding::new(self.config.target_column(), self.config.target_language()),
        )
    }
}

#[async_trait::async_trait]
impl<S, C, Y> Pipeline for SpeechPipeline<S, C, Y>
where
    S: Storage + 'static,
    C: ConfigProvider,
    Y: Synthesizer + 'static,
{
    async fn extract(&self) -> Result<WordList> {
        tracing::debug!("Reading input from: {}", self.config.input_path());
        let bytes = self
            .storage
            .read_file(Path::new(self.config.input_path()))
            .await?;
        read_from_bytes(&bytes)
    }

    async fn transform(&self, data: WordList) -> Result<Vec<SynthesisJob>> {
        let (source, target) = self.bindings();
        tracing::debug!(
            "Mapping columns: {} ({}) / {} ({})",
            source.column,
            source.language,
            target.column,
            target.language
        );
        plan_jobs(&data, &source, &target, Path::new(self.config.output_path()))
    }

    async fn load(&self, jobs: Vec<SynthesisJob>) -> Result<RunSummary> {
        let orchestrator = Orchestrator::new(
            Arc::clone(&self.synthesizer),
            Arc::clone(&self.storage),
            self.config.concurrent_requests(),
        );
        orchestrator.run(jobs).await
    }
}
