use common::Candle;

pub use common::MIN_EVALUATION_CANDLES;

/// Default number of recent candles kept per instrument.
pub const DEFAULT_RETENTION: usize = 100;

/// Read-only view over the most recent candles of one instrument, oldest first.
///
/// A fresh window is built every polling cycle; it borrows the fetched candles
/// and never outlives them.
#[derive(Debug, Clone, Copy)]
pub struct CandleWindow<'a> {
    candles: &'a [Candle],
}

impl<'a> CandleWindow<'a> {
    /// Wrap `candles`, keeping only the last `retention` of them.
    pub fn new(candles: &'a [Candle], retention: usize) -> Self {
        let start = candles.len().saturating_sub(retention);
        Self {
            candles: &candles[start..],
        }
    }

    /// The same window, optionally without its final candle.
    /// Used to build the previous evaluation frame without re-fetching.
    pub fn slice(&self, exclude_last: bool) -> CandleWindow<'a> {
        let end = if exclude_last {
            self.candles.len().saturating_sub(1)
        } else {
            self.candles.len()
        };
        CandleWindow {
            candles: &self.candles[..end],
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// True when the window holds enough candles for a current and previous frame.
    pub fn is_evaluable(&self) -> bool {
        self.len() >= MIN_EVALUATION_CANDLES
    }

    pub fn candles(&self) -> &'a [Candle] {
        self.candles
    }

    pub fn last(&self) -> Option<&'a Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}
