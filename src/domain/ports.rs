use crate::utils::error::Result;
use crate::domain::model::{RunSummary, SynthesisJob, WordList};
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 外部語音合成服務：文字 + 語言代碼 -> 音訊位元組
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn source_column(&self) -> &str;
    fn source_language(&self) -> &str;
    fn target_column(&self) -> &str;
    fn target_language(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<WordList>;
    async fn transform(&self, data: WordList) -> Result<Vec<SynthesisJob>>;
    async fn load(&self, jobs: Vec<SynthesisJob>) -> Result<RunSummary>;
}
