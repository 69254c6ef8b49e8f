use anyhow::Result;
use clap::Parser;
use sawt_transcripts::{
    create_router, AppState, CacheStore, Config, HttpLiveClient, InMemoryJobRegistry,
    JobRegistry, ResolverConfig, TranscriptResolver,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "sawt-transcripts", about = "Transcript resolution service for the Sawt demo")]
struct Args {
    /// Config file name, without extension (resolved by the config crate)
    #[arg(long, default_value = "config/sawt-transcripts")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Sawt Transcripts v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Live engine at {}", cfg.live.base_url);
    info!("Results dir: {}", cfg.storage.results_dir.display());

    let live = Arc::new(HttpLiveClient::new(
        &cfg.live.base_url,
        Duration::from_secs(cfg.live.timeout_secs),
    )?);
    let registry: Arc<dyn JobRegistry> = Arc::new(InMemoryJobRegistry::new());
    let cache = Arc::new(CacheStore::new(cfg.storage.cache_file.clone()));

    let resolver = Arc::new(TranscriptResolver::new(
        live,
        Arc::clone(&registry),
        cache,
        ResolverConfig {
            results_dir: cfg.storage.results_dir.clone(),
            uploads_dir: cfg.storage.uploads_dir.clone(),
        },
    ));

    let state = AppState { resolver, registry };
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
