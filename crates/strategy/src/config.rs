use serde::{Deserialize, Serialize};

use common::{Error, Result};

use crate::evaluator::SignalThresholds;

/// Instrument list and rule thresholds (TOML).
///
/// Example `config/scanner.toml`:
/// ```toml
/// [thresholds]
/// rsi_oversold = 26.0
/// rsi_overbought = 74.0
///
/// [[instrument]]
/// symbol = "R_10"
/// name = "Volatility 10 Index"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScannerFileConfig {
    #[serde(rename = "instrument", default)]
    pub instruments: Vec<InstrumentConfig>,
    /// Missing keys fall back to the default crossing levels.
    #[serde(default)]
    pub thresholds: SignalThresholds,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InstrumentConfig {
    /// Provider index identifier, e.g. "R_10".
    pub symbol: String,
    /// Human-readable name shown in logs.
    #[serde(default)]
    pub name: Option<String>,
}

impl InstrumentConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
        }
    }

    /// The configured name, or the symbol when none is set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

impl ScannerFileConfig {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read scanner config at '{path}': {e}"))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Invalid scanner config at '{path}': {e}")))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        if cfg.instruments.is_empty() {
            return Err(Error::Config("no [[instrument]] entries configured".into()));
        }
        if let Some(blank) = cfg.instruments.iter().find(|i| i.symbol.trim().is_empty()) {
            return Err(Error::Config(format!("instrument with empty symbol: {blank:?}")));
        }
        Ok(cfg)
    }

    /// Instruments in file order; a repeated symbol keeps its first entry.
    pub fn unique_instruments(&self) -> Vec<InstrumentConfig> {
        let mut seen = std::collections::HashSet::new();
        self.instruments
            .iter()
            .filter(|i| seen.insert(i.symbol.clone()))
            .cloned()
            .collect()
    }
}
