//! Signal derivation over synthetic candle series.

use vantage::services::strategy::{self, MIN_BARS};
use vantage::types::{Candle, Signal, Verdict};

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            time: 1_700_000_000 + i as i64 * 3600,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Strongly rising closes: RSI saturates near 100.
fn rising(n: usize) -> Vec<Candle> {
    candles_from_closes(&(0..n).map(|i| 100.0 + 2.0 * i as f64).collect::<Vec<_>>())
}

/// Strongly falling closes: RSI collapses toward 0.
fn falling(n: usize) -> Vec<Candle> {
    candles_from_closes(&(0..n).map(|i| 300.0 - 2.0 * i as f64).collect::<Vec<_>>())
}

#[test]
fn test_underfull_window_always_holds() {
    let short = rising(MIN_BARS - 1);

    for strategy_name in ["momentum", "meanrevert", "anything"] {
        let verdict = strategy::derive_signal(&short, strategy_name);
        assert_eq!(verdict, Verdict::hold_empty(), "strategy {}", strategy_name);
    }
}

#[test]
fn test_empty_window_holds() {
    let verdict = strategy::derive_signal(&[], "momentum");
    assert_eq!(verdict, Verdict::hold_empty());
}

#[test]
fn test_exactly_min_bars_produces_support() {
    let candles = rising(MIN_BARS);
    let verdict = strategy::derive_signal(&candles, "momentum");

    assert!(verdict.rsi.is_some());
    assert_eq!(verdict.price, Some(candles.last().unwrap().close));
}

#[test]
fn test_momentum_overbought_sells_on_rising_series() {
    let verdict = strategy::derive_signal(&rising(60), "momentum");

    assert_eq!(verdict.signal, Signal::Sell);
    assert_eq!(verdict.reason, "RSI Overbought");
    assert!(verdict.rsi.unwrap() > 70.0);
}

#[test]
fn test_meanrevert_oversold_buys_on_falling_series() {
    let verdict = strategy::derive_signal(&falling(60), "meanrevert");

    assert_eq!(verdict.signal, Signal::Buy);
    assert_eq!(verdict.reason, "RSI Oversold");
    assert!(verdict.rsi.unwrap() < 30.0);
}

#[test]
fn test_meanrevert_overbought_sells_on_rising_series() {
    let verdict = strategy::derive_signal(&rising(60), "meanrevert");

    assert_eq!(verdict.signal, Signal::Sell);
    assert_eq!(verdict.reason, "RSI Overbought");
}

#[test]
fn test_unknown_strategy_holds_with_support() {
    let candles = rising(60);
    let verdict = strategy::derive_signal(&candles, "scalping");

    assert_eq!(verdict.signal, Signal::Hold);
    assert!(verdict.reason.is_empty());
    assert!(verdict.rsi.is_some());
    assert_eq!(verdict.price, Some(candles.last().unwrap().close));
}
