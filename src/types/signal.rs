use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Rule set used to derive a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Momentum,
    MeanRevert,
}

impl Strategy {
    /// Parse a strategy name. Unknown names yield `None`: no rule
    /// fires and derivation falls through to HOLD.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "momentum" => Some(Strategy::Momentum),
            "meanrevert" => Some(Strategy::MeanRevert),
            _ => None,
        }
    }
}

/// One row of derived indicator values for a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
}

/// A signal plus the values that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub signal: Signal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub reason: String,
}

impl Verdict {
    /// HOLD with no supporting data (insufficient history).
    pub fn hold_empty() -> Self {
        Self {
            signal: Signal::Hold,
            rsi: None,
            price: None,
            reason: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_serialization() {
        assert_eq!(serde_json::to_string(&Signal::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Signal::Sell).unwrap(), "\"SELL\"");
        assert_eq!(serde_json::to_string(&Signal::Hold).unwrap(), "\"HOLD\"");
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::Hold.to_string(), "HOLD");
    }

    #[test]
    fn test_strategy_from_name() {
        assert_eq!(Strategy::from_name("momentum"), Some(Strategy::Momentum));
        assert_eq!(Strategy::from_name("MeanRevert"), Some(Strategy::MeanRevert));
        assert_eq!(Strategy::from_name("scalping"), None);
        assert_eq!(Strategy::from_name(""), None);
    }

    #[test]
    fn test_hold_empty_verdict() {
        let verdict = Verdict::hold_empty();
        assert_eq!(verdict.signal, Signal::Hold);
        assert!(verdict.rsi.is_none());
        assert!(verdict.price.is_none());
        assert!(verdict.reason.is_empty());
    }

    #[test]
    fn test_verdict_serialization_skips_empty_support() {
        let verdict = Verdict::hold_empty();
        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"signal\":\"HOLD\""));
        assert!(!json.contains("rsi"));
        assert!(!json.contains("price"));
    }
}
