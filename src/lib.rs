pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GoogleTtsClient, GoogleTtsConfig, LocalStorage};
pub use app::pipelines::SpeechPipeline;
pub use config::toml_config::TomlConfig;
pub use core::engine::SpeechEngine;
pub use utils::error::{Result, TtsError};
