use serde::{Deserialize, Serialize};

use common::{Result, Signal};

use crate::snapshot::{IndicatorEngine, IndicatorSnapshot};
use crate::window::CandleWindow;

/// Crossing levels for the RSI and %K legs of the rule.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// RSI must cross this level upward for a buy.
    pub rsi_oversold: f64,
    /// RSI must cross this level downward for a sell.
    pub rsi_overbought: f64,
    /// %K must leave the zone below this level for a buy.
    pub stoch_oversold: f64,
    /// %K must leave the zone above this level for a sell.
    pub stoch_overbought: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_oversold: 26.0,
            rsi_overbought: 74.0,
            stoch_oversold: 7.5,
            stoch_overbought: 92.5,
        }
    }
}

/// Result of evaluating one window: the classification and both frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub signal: Signal,
    pub current: IndicatorSnapshot,
    pub previous: IndicatorSnapshot,
}

/// Stateless Bollinger / RSI / Stochastic crossover rule.
///
/// A buy needs the close under the lower band while RSI crosses up through the
/// oversold level and %K crosses up through both %D and its oversold level,
/// all between the previous and current candle. A sell mirrors it.
#[derive(Debug, Clone, Default)]
pub struct SignalEvaluator {
    thresholds: SignalThresholds,
    engine: IndicatorEngine,
}

impl SignalEvaluator {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self {
            thresholds,
            engine: IndicatorEngine::default(),
        }
    }

    /// Classify the step from `prev` to `curr`. Buy is checked first.
    pub fn evaluate(&self, prev: &IndicatorSnapshot, curr: &IndicatorSnapshot) -> Signal {
        if self.is_buy(prev, curr) {
            Signal::Buy
        } else if self.is_sell(prev, curr) {
            Signal::Sell
        } else {
            Signal::Neutral
        }
    }

    /// Compute both frames from `window` and classify them.
    ///
    /// Returns `Ok(None)` when the window is too short to evaluate; that is
    /// a skip, not a failure.
    pub fn evaluate_window(&self, window: &CandleWindow<'_>) -> Result<Option<Evaluation>> {
        if !window.is_evaluable() {
            return Ok(None);
        }
        let current = self.engine.compute(window)?;
        let previous = self.engine.compute(&window.slice(true))?;
        Ok(Some(Evaluation {
            signal: self.evaluate(&previous, &current),
            current,
            previous,
        }))
    }

    /// All buy legs hold for the step from `prev` to `curr`.
    pub fn is_buy(&self, prev: &IndicatorSnapshot, curr: &IndicatorSnapshot) -> bool {
        let t = &self.thresholds;
        curr.last_close < curr.lower_band
            && crosses_above(prev.rsi, curr.rsi, t.rsi_oversold)
            && prev.stoch_k < prev.stoch_d
            && curr.stoch_k > curr.stoch_d
            && crosses_above(prev.stoch_k, curr.stoch_k, t.stoch_oversold)
    }

    pub fn is_sell(&self, prev: &IndicatorSnapshot, curr: &IndicatorSnapshot) -> bool {
        let t = &self.thresholds;
        curr.last_close > curr.upper_band
            && crosses_below(prev.rsi, curr.rsi, t.rsi_overbought)
            && prev.stoch_k > prev.stoch_d
            && curr.stoch_k < curr.stoch_d
            && crosses_below(prev.stoch_k, curr.stoch_k, t.stoch_overbought)
    }
}

/// Strict upward crossing: below the level before, above it now.
fn crosses_above(prev: f64, curr: f64, level: f64) -> bool {
    prev < level && curr > level
}

fn crosses_below(prev: f64, curr: f64, level: f64) -> bool {
    prev > level && curr < level
}
