use async_trait::async_trait;

use crate::{Candle, Result};

/// Source of OHLC candles for an instrument.
///
/// `DerivClient` implements this against the public price endpoint.
/// Implementations may return fewer candles than requested; callers must
/// check the length before evaluating.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch up to `count` of the most recent candles, oldest first.
    async fn fetch_candles(&self, symbol: &str, count: usize) -> Result<Vec<Candle>>;
}

/// Destination for formatted alert text.
///
/// `TelegramSink` implements this for chat delivery. Errors are reported to
/// the scanner, which logs them and moves on.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}
