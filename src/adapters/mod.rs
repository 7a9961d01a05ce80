// Adapters layer: concrete implementations of the domain ports.

pub mod google_tts;
pub mod storage;

pub use google_tts::{GoogleTtsClient, GoogleTtsConfig};
pub use storage::LocalStorage;
