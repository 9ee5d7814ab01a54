use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candles needed for one full evaluation: the 20-candle Bollinger lookback
/// for the previous frame plus the latest candle.
pub const MIN_EVALUATION_CANDLES: usize = 21;

/// One OHLC sample for a fixed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Start of the interval the candle covers.
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            open,
            high,
            low,
            close,
            timestamp,
        }
    }
}

/// Classification of one evaluation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// No qualifying crossover on the latest candle.
    #[default]
    #[serde(rename = "NONE")]
    Neutral,
    Buy,
    Sell,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Neutral => write!(f, "NONE"),
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
        }
    }
}
