use common::Candle;

/// Stochastic oscillator over the last `period` candles.
///
/// %D is the mean of %K replicated over the smoothing length, which is %K
/// itself. It is not a rolling average across distinct candles.
#[derive(Debug, Clone)]
pub struct StochasticIndicator {
    pub period: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticValue {
    pub k: f64,
    pub d: f64,
}

impl StochasticIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Stochastic period must be >= 1");
        Self { period }
    }

    /// Compute %K/%D from candles (oldest first).
    /// Returns `None` if there are fewer than `period` candles.
    pub fn compute(&self, candles: &[Candle]) -> Option<StochasticValue> {
        if candles.len() < self.period {
            return None;
        }

        let window = &candles[candles.len() - self.period..];
        let low_min = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let high_max = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let last_close = window[window.len() - 1].close;

        // Flat range: no scale to place the close on.
        let k = if high_max == low_min {
            0.0
        } else {
            100.0 * (last_close - low_min) / (high_max - low_min)
        };

        Some(StochasticValue { k, d: k })
    }
}

impl Default for StochasticIndicator {
    fn default() -> Self {
        Self::new(14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candle(high: f64, low: f64, close: f64) -> Candle {
        Candle::new(close, high, low, close, Utc::now())
    }

    #[test]
    fn returns_none_when_insufficient_data() {
        let st = StochasticIndicator::default();
        let candles = vec![candle(2.0, 1.0, 1.5); 13];
        assert!(st.compute(&candles).is_none());
    }

    #[test]
    fn close_at_top_of_range_is_100() {
        let st = StochasticIndicator::new(3);
        let candles = vec![candle(10.0, 5.0, 6.0), candle(9.0, 6.0, 7.0), candle(12.0, 8.0, 12.0)];
        let v = st.compute(&candles).unwrap();
        assert_eq!(v.k, 100.0);
    }

    #[test]
    fn close_in_middle_of_range() {
        let st = StochasticIndicator::new(2);
        // Range over last 2: low 10, high 20; close 15 → 50
        let candles = vec![
            candle(100.0, 0.0, 50.0),
            candle(20.0, 12.0, 14.0),
            candle(18.0, 10.0, 15.0),
        ];
        let v = st.compute(&candles).unwrap();
        assert!((v.k - 50.0).abs() < 1e-12);
    }

    #[test]
    fn flat_range_yields_zero() {
        let st = StochasticIndicator::default();
        let candles = vec![candle(7.0, 7.0, 7.0); 14];
        let v = st.compute(&candles).unwrap();
        assert_eq!(v.k, 0.0);
        assert_eq!(v.d, 0.0);
    }

    #[test]
    fn d_equals_k() {
        let st = StochasticIndicator::new(3);
        let candles = vec![candle(3.0, 1.0, 2.0), candle(4.0, 2.0, 3.3), candle(5.0, 1.5, 2.1)];
        let v = st.compute(&candles).unwrap();
        assert_eq!(v.d, v.k);
    }
}
