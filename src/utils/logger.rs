use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 終端機用的精簡格式
    #[default]
    Compact,
    /// 排程環境 (cron, CI) 用 JSON lines，方便集中收集
    Json,
}

/// `RUST_LOG` 優先，否則依 verbose 決定本 crate 的層級
fn build_filter(verbose: bool) -> EnvFilter {
    let default_directives = if verbose {
        "wordlist_tts=debug,info"
    } else {
        "wordlist_tts=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

pub fn init_logger(verbose: bool, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(build_filter(verbose));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => registry.with(fmt_layer.compact()).init(),
        LogFormat::Json => registry
            .with(fmt_layer.json().with_current_span(false))
            .init(),
    }
}
