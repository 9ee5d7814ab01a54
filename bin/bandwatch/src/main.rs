use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use common::{AlertSink, CandleProvider, Config};
use engine::{DerivClient, Scanner};
use strategy::{ScannerFileConfig, SignalEvaluator};
use telegram_alert::TelegramSink;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().unwrap_or_else(|e| panic!("{e}"));
    let scanner_file = ScannerFileConfig::load(&cfg.scanner_config_path)
        .unwrap_or_else(|e| panic!("{e}"));
    let instruments = scanner_file.unique_instruments();
    info!(
        instruments = instruments.len(),
        interval_secs = cfg.scan_interval_secs,
        candle_interval = %cfg.candle_interval,
        "Bandwatch starting"
    );

    // ── Data provider ─────────────────────────────────────────────────────────
    let provider: Arc<dyn CandleProvider> = Arc::new(
        DerivClient::new(&cfg.data_api_url, cfg.candle_interval.clone())
            .unwrap_or_else(|e| panic!("Failed to build data client: {e}")),
    );

    // ── Alert sink ────────────────────────────────────────────────────────────
    let sink: Arc<dyn AlertSink> =
        Arc::new(TelegramSink::new(cfg.telegram_token.clone(), &cfg.telegram_chat_ids));

    // ── Scanner ───────────────────────────────────────────────────────────────
    let scanner = Scanner::new(
        provider,
        sink,
        instruments,
        SignalEvaluator::new(scanner_file.thresholds),
    )
    .with_candle_count(cfg.candle_count)
    .with_interval(Duration::from_secs(cfg.scan_interval_secs));

    let handle = tokio::spawn(scanner.run());

    info!("Scanner started. Waiting for shutdown signal.");
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    handle.abort();
    info!("Shutdown signal received. Exiting.");
}
