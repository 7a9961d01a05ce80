pub mod speech_pipeline;

pub use speech_pipeline::SpeechPipeline;
