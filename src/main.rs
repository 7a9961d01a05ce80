use clap::Parser;
use wordlist_tts::core::ConfigProvider;
use wordlist_tts::utils::logger::{self, LogFormat};
use wordlist_tts::utils::validation::Validate;
use wordlist_tts::{
    CliConfig, GoogleTtsClient, GoogleTtsConfig, LocalStorage, SpeechEngine, SpeechPipeline,
    TomlConfig, TtsError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let log_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(cli.verbose, log_format);

    tracing::info!("Starting wordlist-tts");

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(file_config) => {
                    let monitor = cli.monitor || file_config.monitoring_enabled();
                    let tts = file_config.google_tts_config();
                    execute(file_config, tts, cli.dry_run, monitor).await
                }
                Err(e) => Err(e),
            }
        }
        None => {
            if cli.verbose {
                tracing::debug!("CLI config: {:?}", cli);
            }
            let tts = cli.google_tts_config();
            let (dry_run, monitor) = (cli.dry_run, cli.monitor);
            execute(cli, tts, dry_run, monitor).await
        }
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Speech generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn execute<C>(
    config: C,
    tts: GoogleTtsConfig,
    dry_run: bool,
    monitor: bool,
) -> Result<(), TtsError>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;
    tracing::info!("✅ Configuration validated");
    display_config_summary(&config, &tts, dry_run);

    if !dry_run && tts.credentials.is_none() {
        tracing::warn!("⚠️ No API key or access token set (GOOGLE_API_KEY / GOOGLE_ACCESS_TOKEN)");
    }

    let client = GoogleTtsClient::new(tts)?;
    let pipeline = SpeechPipeline::new(LocalStorage::default(), config, client);
    let engine = SpeechEngine::new_with_monitoring(pipeline, monitor);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no audio will be generated");
        let jobs = engine.plan().await?;
        for job in &jobs {
            println!("{}  <- [{}] {}", job.destination.display(), job.language, job.text);
        }
        println!("🔍 {} files would be generated", jobs.len());
        return Ok(());
    }

    let summary = engine.run().await?;
    println!("✅ Speech generation completed!");
    println!(
        "📁 {} files written in {} ms",
        summary.written.len(),
        summary.elapsed().num_milliseconds()
    );
    Ok(())
}

fn display_config_summary<C: ConfigProvider>(config: &C, tts: &GoogleTtsConfig, dry_run: bool) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!(
        "  Columns: {} ({}) -> {} ({})",
        config.source_column(),
        config.source_language(),
        config.target_column(),
        config.target_language()
    );
    println!("  Endpoint: {}", tts.endpoint);
    println!("  Concurrent Requests: {}", config.concurrent_requests());
    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}
