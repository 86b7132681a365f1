//! Indicator computation over candle series.
//!
//! The math is delegated to the `ta` crate; this module aligns the
//! streaming outputs with the bar series and leaves each indicator's
//! warm-up window empty, so consumers can tell a settled value from
//! one computed on a partial window.

use crate::types::{Candle, IndicatorSnapshot};
use ta::indicators::{
    BollingerBands, MovingAverageConvergenceDivergence, RelativeStrengthIndex, SimpleMovingAverage,
};
use ta::Next;
use tracing::warn;

/// RSI period.
const RSI_PERIOD: usize = 14;
/// MACD fast/slow/signal periods.
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
/// Bollinger period and width in standard deviations.
const BB_PERIOD: usize = 20;
const BB_MULTIPLIER: f64 = 2.0;
/// Short and long SMA periods.
const SMA_SHORT: usize = 20;
const SMA_LONG: usize = 50;

/// Per-bar indicator values aligned with a candle series. `None`
/// marks a bar inside that indicator's warm-up window.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub sma20: Vec<Option<f64>>,
    pub sma50: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_hist: Vec<Option<f64>>,
}

/// Compute the indicator series for a candle window. An indicator
/// that fails to initialize is logged and left blank; the rest still
/// populate.
pub fn indicator_series(candles: &[Candle]) -> IndicatorSeries {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let n = closes.len();

    let mut series = IndicatorSeries {
        sma20: vec![None; n],
        sma50: vec![None; n],
        rsi: vec![None; n],
        macd: vec![None; n],
        macd_signal: vec![None; n],
        macd_hist: vec![None; n],
    };

    fill_sma(&closes, SMA_SHORT, &mut series.sma20);
    fill_sma(&closes, SMA_LONG, &mut series.sma50);
    fill_rsi(&closes, &mut series.rsi);
    fill_macd(&closes, &mut series);

    series
}

fn fill_sma(closes: &[f64], period: usize, out: &mut [Option<f64>]) {
    let Ok(mut sma) = SimpleMovingAverage::new(period) else {
        warn!("SMA({}) failed to initialize", period);
        return;
    };

    for (i, &close) in closes.iter().enumerate() {
        let value = sma.next(close);
        if i + 1 >= period {
            out[i] = Some(value);
        }
    }
}

fn fill_rsi(closes: &[f64], out: &mut [Option<f64>]) {
    let Ok(mut rsi) = RelativeStrengthIndex::new(RSI_PERIOD) else {
        warn!("RSI({}) failed to initialize", RSI_PERIOD);
        return;
    };

    for (i, &close) in closes.iter().enumerate() {
        let value = rsi.next(close);
        // The first valid RSI needs RSI_PERIOD price changes.
        if i >= RSI_PERIOD {
            out[i] = Some(value);
        }
    }
}

fn fill_macd(closes: &[f64], series: &mut IndicatorSeries) {
    let Ok(mut macd) = MovingAverageConvergenceDivergence::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
    else {
        warn!("MACD({},{},{}) failed to initialize", MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        return;
    };

    // The line needs a full slow-EMA window; signal and histogram
    // additionally need MACD_SIGNAL line values.
    let line_from = MACD_SLOW - 1;
    let signal_from = MACD_SLOW + MACD_SIGNAL - 2;

    for (i, &close) in closes.iter().enumerate() {
        let out = macd.next(close);
        if i >= line_from {
            series.macd[i] = Some(out.macd);
        }
        if i >= signal_from {
            series.macd_signal[i] = Some(out.signal);
            series.macd_hist[i] = Some(out.histogram);
        }
    }
}

/// The last two indicator rows (previous, latest) for signal rules.
/// `None` when the series has fewer than two bars or an indicator
/// failed to initialize.
pub fn latest_snapshots(candles: &[Candle]) -> Option<(IndicatorSnapshot, IndicatorSnapshot)> {
    if candles.len() < 2 {
        return None;
    }

    let mut rsi = RelativeStrengthIndex::new(RSI_PERIOD).ok()?;
    let mut macd = MovingAverageConvergenceDivergence::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL).ok()?;
    let mut bb = BollingerBands::new(BB_PERIOD, BB_MULTIPLIER).ok()?;

    let mut prev: Option<IndicatorSnapshot> = None;
    let mut last: Option<IndicatorSnapshot> = None;

    for candle in candles {
        let rsi_value = rsi.next(candle.close);
        let macd_out = macd.next(candle.close);
        let bb_out = bb.next(candle.close);

        prev = last;
        last = Some(IndicatorSnapshot {
            close: candle.close,
            rsi: rsi_value,
            macd: macd_out.macd,
            macd_signal: macd_out.signal,
            macd_hist: macd_out.histogram,
            bb_upper: bb_out.upper,
            bb_middle: bb_out.average,
            bb_lower: bb_out.lower,
        });
    }

    Some((prev?, last?))
}
