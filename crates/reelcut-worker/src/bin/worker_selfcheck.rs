use std::path::Path;

use reelcut_worker::WorkerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    reelcut_worker::telemetry::init_tracing();

    let config = WorkerConfig::from_env();

    println!(
        "worker-selfcheck: starting with work_dir={}",
        config.work_dir
    );
    ensure_workdir(&config.work_dir).await?;
    ensure_config_sane(&config)?;

    println!("worker-selfcheck: ok");
    Ok(())
}

async fn ensure_workdir<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path).await?;

    // Scratch dirs are created under the work dir for every job
    let probe = tempfile::tempdir_in(path)?;
    drop(probe);
    Ok(())
}

fn ensure_config_sane(config: &WorkerConfig) -> anyhow::Result<()> {
    if config.max_highlights == 0 {
        return Err(anyhow::anyhow!("REELCUT_MAX_HIGHLIGHTS must be positive"));
    }
    if config.sample_rate == 0 {
        return Err(anyhow::anyhow!("REELCUT_SAMPLE_RATE must be positive"));
    }
    if !(0.0..=1.0).contains(&config.smoothing_alpha) {
        return Err(anyhow::anyhow!(
            "REELCUT_SMOOTHING_ALPHA must be in [0, 1], got {}",
            config.smoothing_alpha
        ));
    }
    Ok(())
}
