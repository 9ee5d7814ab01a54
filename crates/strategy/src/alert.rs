use serde::Serialize;

use common::Signal;

use crate::snapshot::IndicatorSnapshot;

/// A formatted alert ready for hand-off to an `AlertSink`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertMessage {
    pub symbol: String,
    pub signal: Signal,
    pub snapshot: IndicatorSnapshot,
    pub previous: IndicatorSnapshot,
    pub text: String,
}

impl AlertMessage {
    /// Build an alert for an actionable signal. `Neutral` yields `None`.
    pub fn build(
        symbol: &str,
        signal: Signal,
        snapshot: IndicatorSnapshot,
        previous: IndicatorSnapshot,
    ) -> Option<Self> {
        let text = format_alert(symbol, signal, &snapshot, &previous)?;
        Some(Self {
            symbol: symbol.to_string(),
            signal,
            snapshot,
            previous,
            text,
        })
    }
}

/// Render the fixed alert template. All values are rounded to two decimals.
pub fn format_alert(
    symbol: &str,
    signal: Signal,
    snapshot: &IndicatorSnapshot,
    previous: &IndicatorSnapshot,
) -> Option<String> {
    let (header, price_marker, band_label, band) = match signal {
        Signal::Buy => ("🟢 *BUY Signal*", "📉", "Lower", snapshot.lower_band),
        Signal::Sell => ("🔴 *SELL Signal*", "📈", "Upper", snapshot.upper_band),
        Signal::Neutral => return None,
    };

    Some(format!(
        "{header} — {symbol}\n\n\
         {price_marker} Price: {price:.2}\n\
         📊 RSI: {rsi:.2} (prev: {prev_rsi:.2})\n\
         🌀 Stochastic: K={k:.2}, D={d:.2}\n\
         📍 BB {band_label} Band: {band:.2}\n\
         ⏰ Entry in 2 minutes!",
        price = snapshot.last_close,
        rsi = snapshot.rsi,
        prev_rsi = previous.rsi,
        k = snapshot.stoch_k,
        d = snapshot.stoch_d,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            last_close: 6120.456,
            upper_band: 6200.0,
            lower_band: 6125.004,
            rsi: 27.1249,
            stoch_k: 8.3333,
            stoch_d: 8.3333,
        }
    }

    fn previous() -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: 25.5,
            ..snapshot()
        }
    }

    #[test]
    fn buy_template_is_stable() {
        let text = format_alert("R_10", Signal::Buy, &snapshot(), &previous()).unwrap();
        assert_eq!(
            text,
            "🟢 *BUY Signal* — R_10\n\n\
             📉 Price: 6120.46\n\
             📊 RSI: 27.12 (prev: 25.50)\n\
             🌀 Stochastic: K=8.33, D=8.33\n\
             📍 BB Lower Band: 6125.00\n\
             ⏰ Entry in 2 minutes!"
        );
    }

    #[test]
    fn sell_template_uses_upper_band() {
        let text = format_alert("R_75_1s", Signal::Sell, &snapshot(), &previous()).unwrap();
        assert!(text.starts_with("🔴 *SELL Signal* — R_75_1s\n\n📈 Price: 6120.46\n"));
        assert!(text.contains("📍 BB Upper Band: 6200.00\n"));
        assert!(!text.contains("Lower"));
    }

    #[test]
    fn neutral_has_no_message() {
        assert!(format_alert("R_10", Signal::Neutral, &snapshot(), &previous()).is_none());
        assert!(AlertMessage::build("R_10", Signal::Neutral, snapshot(), previous()).is_none());
    }

    #[test]
    fn message_carries_both_frames() {
        let msg = AlertMessage::build("R_25", Signal::Buy, snapshot(), previous()).unwrap();
        assert_eq!(msg.symbol, "R_25");
        assert_eq!(msg.signal, Signal::Buy);
        assert_eq!(msg.previous.rsi, 25.5);
        assert!(msg.text.contains("(prev: 25.50)"));
    }
}
