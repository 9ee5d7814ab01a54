use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use common::{AlertSink, CandleProvider};
use strategy::{
    AlertMessage, CandleWindow, InstrumentConfig, SignalEvaluator, DEFAULT_RETENTION,
};

/// Default pause between full passes over the instrument list.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(300);

/// What happened to one instrument during a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Fewer candles than an evaluation needs; nothing evaluated.
    Skipped { available: usize },
    /// The data provider returned an error.
    ProviderFailed,
    /// Evaluated, no signal.
    Quiet,
    /// A signal fired and its alert was handed to the sink.
    Alerted { alert: AlertMessage, delivered: bool },
}

/// Polls every configured instrument on a fixed interval and dispatches alerts.
///
/// Each instrument is evaluated from a freshly fetched window; nothing is
/// carried between cycles.
pub struct Scanner {
    provider: Arc<dyn CandleProvider>,
    sink: Arc<dyn AlertSink>,
    instruments: Vec<InstrumentConfig>,
    evaluator: SignalEvaluator,
    candle_count: usize,
    interval: Duration,
}

impl Scanner {
    pub fn new(
        provider: Arc<dyn CandleProvider>,
        sink: Arc<dyn AlertSink>,
        instruments: Vec<InstrumentConfig>,
        evaluator: SignalEvaluator,
    ) -> Self {
        Self {
            provider,
            sink,
            instruments,
            evaluator,
            candle_count: DEFAULT_RETENTION,
            interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Candles requested per instrument; also the window retention.
    pub fn with_candle_count(mut self, candle_count: usize) -> Self {
        self.candle_count = candle_count;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the polling loop forever. Call from `tokio::spawn`.
    pub async fn run(self) {
        info!(
            instruments = self.instruments.len(),
            interval = ?self.interval,
            "Scanner running"
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            info!("🔄 Scanning for signals...");
            let outcomes = self.scan_once().await;
            let alerts = outcomes
                .iter()
                .filter(|o| matches!(o, ScanOutcome::Alerted { .. }))
                .count();
            let skipped = outcomes
                .iter()
                .filter(|o| {
                    matches!(o, ScanOutcome::Skipped { .. } | ScanOutcome::ProviderFailed)
                })
                .count();
            debug!(alerts, skipped, "Scan cycle complete");
        }
    }

    /// Evaluate every instrument once, in configured order.
    pub async fn scan_once(&self) -> Vec<ScanOutcome> {
        let mut outcomes = Vec::with_capacity(self.instruments.len());
        for instrument in &self.instruments {
            outcomes.push(self.check_instrument(instrument).await);
        }
        outcomes
    }

    /// Fetch, evaluate and (if a signal fires) alert for one instrument.
    pub async fn check_instrument(&self, instrument: &InstrumentConfig) -> ScanOutcome {
        let symbol = instrument.symbol.as_str();
        let name = instrument.display_name();
        let candles = match self.provider.fetch_candles(symbol, self.candle_count).await {
            Ok(c) => c,
            Err(e) => {
                warn!(symbol = %symbol, name = %name, error = %e, "Failed to fetch candles");
                return ScanOutcome::ProviderFailed;
            }
        };

        let window = CandleWindow::new(&candles, self.candle_count);
        let evaluation = match self.evaluator.evaluate_window(&window) {
            Ok(Some(ev)) => ev,
            Ok(None) => {
                warn!(
                    symbol = %symbol,
                    name = %name,
                    available = window.len(),
                    "Not enough candles"
                );
                return ScanOutcome::Skipped { available: window.len() };
            }
            Err(e) => {
                warn!(symbol = %symbol, name = %name, error = %e, "Indicator computation failed");
                return ScanOutcome::Skipped { available: window.len() };
            }
        };

        let curr = &evaluation.current;
        if curr.has_flat_bands() {
            debug!(symbol = %symbol, "Degenerate market: zero deviation over the band window");
        }
        debug!(
            symbol = %symbol,
            name = %name,
            close = curr.last_close,
            rsi = curr.rsi,
            stoch_k = curr.stoch_k,
            signal = %evaluation.signal,
            "Evaluated"
        );

        match AlertMessage::build(
            symbol,
            evaluation.signal,
            evaluation.current,
            evaluation.previous,
        ) {
            Some(alert) => {
                let delivered = self.dispatch(&alert).await;
                ScanOutcome::Alerted { alert, delivered }
            }
            None => ScanOutcome::Quiet,
        }
    }

    /// Hand an alert to the sink. Failures are logged, never propagated.
    pub async fn dispatch(&self, alert: &AlertMessage) -> bool {
        match self.sink.send(&alert.text).await {
            Ok(()) => {
                info!(symbol = %alert.symbol, signal = %alert.signal, "Signal alert sent");
                true
            }
            Err(e) => {
                warn!(symbol = %alert.symbol, error = %e, "Failed to deliver alert");
                false
            }
        }
    }
}
