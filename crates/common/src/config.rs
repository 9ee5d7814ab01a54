use crate::{Error, Result, MIN_EVALUATION_CANDLES};

pub const DEFAULT_DATA_API_URL: &str = "https://api.deriv.com/api/exchange/v1/price";

/// All configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_token: String,
    pub telegram_chat_ids: Vec<i64>,

    // Market data
    pub data_api_url: String,
    pub candle_interval: String,
    /// Candles requested per poll; also the window retention.
    pub candle_count: usize,

    // Scheduling
    pub scan_interval_secs: u64,

    // Instrument / threshold file path
    pub scanner_config_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                Error::Config(format!(
                    "Required environment variable '{key}' is not set. Check your .env file."
                ))
            })
        };

        // TELEGRAM_CHAT_ID is the single-chat spelling and is accepted as a fallback.
        let chat_ids_raw =
            required("TELEGRAM_CHAT_IDS").or_else(|_| required("TELEGRAM_CHAT_ID"))?;
        let telegram_chat_ids = chat_ids_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>().map_err(|_| {
                    Error::Config(format!("TELEGRAM_CHAT_IDS contains non-numeric ID: '{s}'"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if telegram_chat_ids.is_empty() {
            return Err(Error::Config("TELEGRAM_CHAT_IDS is empty".into()));
        }

        let candle_count = parse_optional(&lookup, "CANDLE_COUNT", 100usize)?;
        if candle_count < MIN_EVALUATION_CANDLES {
            return Err(Error::Config(format!(
                "CANDLE_COUNT must be at least {MIN_EVALUATION_CANDLES}, got {candle_count}"
            )));
        }
        let scan_interval_secs = parse_optional(&lookup, "SCAN_INTERVAL_SECS", 300u64)?;
        if scan_interval_secs == 0 {
            return Err(Error::Config("SCAN_INTERVAL_SECS must be positive".into()));
        }

        Ok(Config {
            telegram_token: required("TELEGRAM_TOKEN")?,
            telegram_chat_ids,
            data_api_url: lookup("DATA_API_URL")
                .unwrap_or_else(|| DEFAULT_DATA_API_URL.to_string()),
            candle_interval: lookup("CANDLE_INTERVAL").unwrap_or_else(|| "5m".to_string()),
            candle_count,
            scan_interval_secs,
            scanner_config_path: lookup("SCANNER_CONFIG_PATH")
                .unwrap_or_else(|| "config/scanner.toml".to_string()),
        })
    }
}

fn parse_optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{key} has an invalid value: '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_fill_optional_values() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_IDS", "42"),
        ]))
        .unwrap();
        assert_eq!(cfg.telegram_chat_ids, vec![42]);
        assert_eq!(cfg.data_api_url, DEFAULT_DATA_API_URL);
        assert_eq!(cfg.candle_interval, "5m");
        assert_eq!(cfg.candle_count, 100);
        assert_eq!(cfg.scan_interval_secs, 300);
        assert_eq!(cfg.scanner_config_path, "config/scanner.toml");
    }

    #[test]
    fn single_chat_id_variable_is_accepted() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_ID", "-1001"),
        ]))
        .unwrap();
        assert_eq!(cfg.telegram_chat_ids, vec![-1001]);
    }

    #[test]
    fn chat_id_list_is_split_and_trimmed() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_IDS", " 1, 2 ,3"),
        ]))
        .unwrap();
        assert_eq!(cfg.telegram_chat_ids, vec![1, 2, 3]);
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("TELEGRAM_CHAT_IDS", "1")])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("TELEGRAM_TOKEN")));
    }

    #[test]
    fn non_numeric_chat_id_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_IDS", "1,abc"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_numeric_override_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_IDS", "1"),
            ("SCAN_INTERVAL_SECS", "five"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("SCAN_INTERVAL_SECS")));
    }

    #[test]
    fn zero_candle_count_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_IDS", "1"),
            ("CANDLE_COUNT", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn candle_count_below_one_evaluation_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_IDS", "1"),
            ("CANDLE_COUNT", "20"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("CANDLE_COUNT")));
    }

    #[test]
    fn candle_count_of_one_evaluation_is_accepted() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_IDS", "1"),
            ("CANDLE_COUNT", "21"),
        ]))
        .unwrap();
        assert_eq!(cfg.candle_count, MIN_EVALUATION_CANDLES);
    }
}
