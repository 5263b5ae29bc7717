use clap::Parser;
use pi_verify::utils::{logger, validation::Validate};
use pi_verify::{CachingFetcher, CliConfig, FileCache, VerifyEngine, VerifyPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pi-verify");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let cache = FileCache::new(config.cache_dir.clone());
    let fetcher = CachingFetcher::new(cache)?;
    let pipeline = VerifyPipeline::new(fetcher, config);

    let engine = VerifyEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ {}", summary);
        }
        Err(e) => {
            tracing::error!("❌ Verification failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
