use serde::Serialize;

use common::{Error, Result};

use crate::indicators::{BollingerIndicator, RsiIndicator, StochasticIndicator};
use crate::window::CandleWindow;

/// Derived indicator values for one candle window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub last_close: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    pub rsi: f64,
    pub stoch_k: f64,
    pub stoch_d: f64,
}

impl IndicatorSnapshot {
    /// Bands collapsed onto each other (zero deviation over the Bollinger window).
    pub fn has_flat_bands(&self) -> bool {
        self.upper_band == self.lower_band
    }
}

/// Fixed-parameter indicator set: Bollinger(20, 2σ), RSI(14), Stochastic(14).
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    bollinger: BollingerIndicator,
    rsi: RsiIndicator,
    stochastic: StochasticIndicator,
}

impl IndicatorEngine {
    /// Candles required by the longest lookback (the Bollinger SMA).
    pub fn min_candles(&self) -> usize {
        self.bollinger
            .period
            .max(self.rsi.period + 1)
            .max(self.stochastic.period)
    }

    /// Compute a snapshot from `window`.
    ///
    /// Fails with `InsufficientData` when the window is shorter than
    /// [`Self::min_candles`]; callers are expected to check first and skip.
    pub fn compute(&self, window: &CandleWindow<'_>) -> Result<IndicatorSnapshot> {
        let insufficient = || Error::InsufficientData {
            required: self.min_candles(),
            available: window.len(),
        };
        if window.len() < self.min_candles() {
            return Err(insufficient());
        }

        let closes = window.closes();
        let bands = self.bollinger.compute(&closes).ok_or_else(insufficient)?;
        let rsi = self.rsi.compute(&closes).ok_or_else(insufficient)?;
        let stoch = self
            .stochastic
            .compute(window.candles())
            .ok_or_else(insufficient)?;
        let last_close = window.last().map(|c| c.close).ok_or_else(insufficient)?;

        Ok(IndicatorSnapshot {
            last_close,
            upper_band: bands.upper,
            lower_band: bands.lower,
            rsi,
            stoch_k: stoch.k,
            stoch_d: stoch.d,
        })
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            bollinger: BollingerIndicator::default(),
            rsi: RsiIndicator::default(),
            stochastic: StochasticIndicator::default(),
        }
    }
}
