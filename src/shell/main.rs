use chrono::{Local, Utc};
use tracing_subscriber::{EnvFilter, fmt};

use project_metrics::shell::config::AppConfig;
use project_metrics::shell::render::render_views;
use project_metrics::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        period = ?config.period,
        "loading snapshot"
    );

    let state = AppState::from_config(config);
    state.loader.refresh().await?;
    let index = state
        .loader
        .current()
        .await
        .ok_or_else(|| anyhow::anyhow!("no snapshot installed"))?;

    let views = match state.config.utc_offset {
        Some(offset) => render_views(&index, &Utc::now().with_timezone(&offset), &state.config),
        None => render_views(&index, &Local::now(), &state.config),
    };
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}
