//! Rule-based signal derivation.

use crate::services::analysis;
use crate::types::{Candle, IndicatorSnapshot, Signal, Strategy, Verdict};
use tracing::warn;

/// Minimum bars before any rule fires.
pub const MIN_BARS: usize = 50;

/// Derive a trading signal for a candle window.
///
/// Fewer than [`MIN_BARS`] bars always yields HOLD with empty
/// supporting data, whatever the strategy name.
pub fn derive_signal(candles: &[Candle], strategy: &str) -> Verdict {
    if candles.len() < MIN_BARS {
        return Verdict::hold_empty();
    }

    let Some((prev, last)) = analysis::latest_snapshots(candles) else {
        warn!(
            "Indicator computation failed for {}-bar window",
            candles.len()
        );
        return Verdict::hold_empty();
    };

    let (signal, reason) = evaluate(Strategy::from_name(strategy), &prev, &last);

    Verdict {
        signal,
        rsi: Some(last.rsi),
        price: Some(last.close),
        reason: reason.to_string(),
    }
}

/// Apply a strategy's rules to the last two indicator rows.
///
/// Rules run in order and a later match overwrites an earlier one:
/// for "momentum" the overbought SELL is checked after the crossover
/// BUY and wins when both hold. Unknown strategies match nothing.
pub fn evaluate(
    strategy: Option<Strategy>,
    prev: &IndicatorSnapshot,
    last: &IndicatorSnapshot,
) -> (Signal, &'static str) {
    let mut signal = Signal::Hold;
    let mut reason = "";

    match strategy {
        Some(Strategy::Momentum) => {
            let bullish_cross =
                prev.macd <= prev.macd_signal && last.macd > last.macd_signal;
            if last.rsi < 70.0 && bullish_cross {
                signal = Signal::Buy;
                reason = "MACD Bullish Crossover";
            }
            if last.rsi > 70.0 {
                signal = Signal::Sell;
                reason = "RSI Overbought";
            }
        }
        Some(Strategy::MeanRevert) => {
            if last.rsi < 30.0 {
                signal = Signal::Buy;
                reason = "RSI Oversold";
            }
            if last.rsi > 70.0 {
                signal = Signal::Sell;
                reason = "RSI Overbought";
            }
        }
        None => {}
    }

    (signal, reason)
}
