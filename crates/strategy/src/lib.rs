pub mod alert;
pub mod config;
pub mod evaluator;
pub mod indicators;
pub mod snapshot;
pub mod window;

pub use alert::{format_alert, AlertMessage};
pub use config::{InstrumentConfig, ScannerFileConfig};
pub use evaluator::{Evaluation, SignalEvaluator, SignalThresholds};
pub use snapshot::{IndicatorEngine, IndicatorSnapshot};
pub use window::{CandleWindow, DEFAULT_RETENTION, MIN_EVALUATION_CANDLES};
