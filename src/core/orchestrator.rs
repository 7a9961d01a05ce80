use crate::core::{RunSummary, Storage, SynthesisJob, Synthesizer};
use crate::utils::error::{Result, TtsError};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

enum JobOutcome {
    Written(PathBuf),
    Cancelled(String),
    Failed(TtsError),
}

/// 以固定上限的並發數執行所有合成工作
///
/// 第一個失敗會觸發取消：尚在排隊或合成中的工作直接結束，已開始寫檔的
/// 工作會寫完。所有工作都結束後才回傳，回傳的錯誤是第一個失敗的工作。
pub struct Orchestrator<Y: Synthesizer, S: Storage> {
    synthesizer: Arc<Y>,
    storage: Arc<S>,
    max_concurrency: usize,
}

impl<Y, S> Orchestrator<Y, S>
where
    Y: Synthesizer + 'static,
    S: Storage + 'static,
{
    pub fn new(synthesizer: Arc<Y>, storage: Arc<S>, max_concurrency: usize) -> Self {
        Self {
            synthesizer,
            storage,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub async fn run(&self, jobs: Vec<SynthesisJob>) -> Result<RunSummary> {
        let started_at = Utc::now();
        let total_jobs = jobs.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();

        tracing::info!(
            "🚀 Launching {} synthesis jobs ({} at a time)",
            total_jobs,
            self.max_concurrency
        );

        for job in jobs {
            let synthesizer = Arc::clone(&self.synthesizer);
            let storage = Arc::clone(&self.storage);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let language_code = job.language.api_code();
                let _permit = tokio::select! {
                    _ = cancel.cancelled() => return JobOutcome::Cancelled(job.file_name),
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return JobOutcome::Cancelled(job.file_name),
                    },
                };

                let audio = tokio::select! {
                    _ = cancel.cancelled() => return JobOutcome::Cancelled(job.file_name.clone()),
                    audio = synthesizer.synthesize(&job.text, &language_code) => audio,
                };

                let written = match audio {
                    Ok(audio) => storage
                        .write_file(&job.destination, &audio)
                        .await
                        .map(|_| audio.len()),
                    Err(e) => Err(e),
                };

                match written {
                    Ok(bytes) => {
                        tracing::debug!("🔊 Wrote {} ({} bytes)", job.destination.display(), bytes);
                        JobOutcome::Written(job.destination)
                    }
                    Err(e) => JobOutcome::Failed(TtsError::JobFailed {
                        file_name: job.file_name,
                        source: Box::new(e),
                    }),
                }
            });
        }

        let mut written = Vec::with_capacity(total_jobs);
        let mut cancelled = 0usize;
        let mut first_error: Option<TtsError> = None;
        let mut other_failures = 0usize;

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|e| {
                JobOutcome::Failed(TtsError::ProcessingError {
                    message: format!("synthesis task panicked: {}", e),
                })
            });

            match outcome {
                JobOutcome::Written(path) => written.push(path),
                JobOutcome::Cancelled(file_name) => {
                    tracing::debug!("⏹️ Cancelled {}", file_name);
                    cancelled += 1;
                }
                JobOutcome::Failed(e) => {
                    tracing::error!("❌ {}", e);
                    if first_error.is_none() {
                        cancel.cancel();
                        first_error = Some(e);
                    } else {
                        other_failures += 1;
                    }
                }
            }
        }

        if let Some(e) = first_error {
            tracing::warn!(
                "⚠️ Run aborted: {} written, {} cancelled, {} failed",
                written.len(),
                cancelled,
                other_failures + 1
            );
            return Err(e);
        }

        // 回傳順序與工作順序無關，排序讓摘要穩定
        written.sort();

        Ok(RunSummary {
            total_jobs,
            written,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
