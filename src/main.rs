use std::path::Path;

use anyhow::Context;
use county_reconciler::config::PipelineConfig;
use county_reconciler::generate_summary;
use county_reconciler::pipeline;
use log::info;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::from_file(Path::new(&path))
            .with_context(|| format!("loading configuration from {path}"))?,
        None => PipelineConfig::default(),
    };

    info!(
        "Reconciling county sources: classification={}, shortage={}, hospitalization={}",
        config.rucc_path.display(),
        config.hpsa_path.display(),
        config.pqi_path.display()
    );

    let start = std::time::Instant::now();
    let outcome = pipeline::run(&config).await?;
    info!(
        "Wrote {} county records to {} in {:?}",
        outcome.records.len(),
        config.output_path.display(),
        start.elapsed()
    );
    info!("\n{}", generate_summary(&outcome.report, &outcome.metrics));

    Ok(())
}
