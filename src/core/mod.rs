pub mod engine;
pub mod orchestrator;
pub mod planner;
pub mod reader;

pub use crate::domain::model::{
    ColumnBinding, LanguageTag, Record, RunSummary, SynthesisJob, WordList,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Synthesizer};
pub use crate::utils::error::Result;
