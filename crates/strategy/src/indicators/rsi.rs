/// RSI (Relative Strength Index) indicator.
///
/// Plain average of gains and losses over the last `period` close-to-close
/// changes (no Wilder smoothing). When there are no losses the relative
/// strength is taken as zero, so the result is 0 rather than the textbook 100.
/// Returns `None` until at least `period + 1` closes are available.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    /// Compute RSI from a slice of close prices (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Option<f64> {
        if closes.len() < self.period + 1 {
            return None;
        }

        let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let recent = &changes[changes.len() - self.period..];

        let n = self.period as f64;
        let avg_gain = recent.iter().map(|&c| c.max(0.0)).sum::<f64>() / n;
        let avg_loss = recent.iter().map(|&c| (-c).max(0.0)).sum::<f64>() / n;

        let rs = if avg_loss == 0.0 { 0.0 } else { avg_gain / avg_loss };
        Some(100.0 - 100.0 / (1.0 + rs))
    }
}

impl Default for RsiIndicator {
    fn default() -> Self {
        Self::new(14)
    }
}
