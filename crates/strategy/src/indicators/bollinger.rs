/// Bollinger Bands: SMA of the last `period` closes ± `num_std` standard deviations.
///
/// The deviation is the population deviation over exactly that window (no
/// Bessel correction).
#[derive(Debug, Clone)]
pub struct BollingerIndicator {
    pub period: usize,
    pub num_std: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerIndicator {
    pub fn new(period: usize, num_std: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self { period, num_std }
    }

    /// Compute bands from close prices (oldest first).
    /// Returns `None` if there are fewer than `period` values.
    pub fn compute(&self, closes: &[f64]) -> Option<BollingerBands> {
        if self.period == 0 || closes.len() < self.period {
            return None;
        }

        let window = &closes[closes.len() - self.period..];
        let n = self.period as f64;

        // Offsets from the first close keep a constant window at exactly zero deviation.
        let anchor = window[0];
        let mean_offset = window.iter().map(|x| x - anchor).sum::<f64>() / n;
        let middle = anchor + mean_offset;
        let variance = window
            .iter()
            .map(|x| (x - anchor - mean_offset).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        Some(BollingerBands {
            upper: middle + self.num_std * std_dev,
            middle,
            lower: middle - self.num_std * std_dev,
        })
    }
}

impl Default for BollingerIndicator {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}
