//! Machine Failure Prediction Desk - Main Entry Point
//!
//! Loads the model store, then serves manually entered sensor readings
//! through the desktop form until the window closes.

use anyhow::Result;
use machine_failure_predictor::{
    alert, config::AppConfig, metrics::SessionMetrics, models::inference::PredictionEngine,
    ui::{self, PredictorApp},
};
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("machine_failure_predictor=info".parse()?),
        )
        .init();

    info!("Starting Machine Failure Prediction Desk");

    // Load configuration
    let config = AppConfig::load_or_default()?;
    info!(
        decision_threshold = config.detection.decision_threshold,
        alarm_enabled = config.alarm.enabled,
        "Configuration loaded"
    );

    // Load the model store; a missing artifact is fatal
    let engine = PredictionEngine::new(&config)?;
    info!(models = ?engine.model_names(), "Prediction engine ready");

    let metrics = Arc::new(SessionMetrics::new());
    let alert = alert::sink_from_config(&config.alarm);

    let app = PredictorApp::new(engine, alert, metrics.clone(), &config);
    ui::run(&config, app)?;

    info!("Desk shutting down");
    metrics.print_summary();

    Ok(())
}
