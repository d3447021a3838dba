use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional bias of a detected pattern or prediction input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    pub fn label(&self) -> &'static str {
        match self {
            Bias::Bullish => "Bullish",
            Bias::Bearish => "Bearish",
            Bias::Neutral => "Neutral",
        }
    }
}

/// How much a pattern is trusted when combining signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceTier {
    /// Weight used by the prediction combinator.
    pub fn weight(&self) -> f64 {
        match self {
            ConfidenceTier::VeryHigh => 3.0,
            ConfidenceTier::High => 2.0,
            ConfidenceTier::Medium => 1.0,
            ConfidenceTier::Low => 0.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::High => "High",
            ConfidenceTier::VeryHigh => "Very High",
        }
    }
}

/// Family a pattern kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    Candlestick,
    Chart,
    Divergence,
    Volume,
}

/// Catalog of detectable patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Hammer,
    ShootingStar,
    BullishEngulfing,
    BearishEngulfing,
    Doji,
    ThreeWhiteSoldiers,
    ThreeBlackCrows,
    DoubleTop,
    DoubleBottom,
    ResistanceBreak,
    SupportBreak,
    BullishDivergence,
    BearishDivergence,
    VolumeSpikeUp,
    VolumeSpikeDown,
}

impl PatternKind {
    pub fn bias(&self) -> Bias {
        match self {
            PatternKind::Hammer
            | PatternKind::BullishEngulfing
            | PatternKind::ThreeWhiteSoldiers
            | PatternKind::DoubleBottom
            | PatternKind::ResistanceBreak
            | PatternKind::BullishDivergence
            | PatternKind::VolumeSpikeUp => Bias::Bullish,
            PatternKind::ShootingStar
            | PatternKind::BearishEngulfing
            | PatternKind::ThreeBlackCrows
            | PatternKind::DoubleTop
            | PatternKind::SupportBreak
            | PatternKind::BearishDivergence
            | PatternKind::VolumeSpikeDown => Bias::Bearish,
            PatternKind::Doji => Bias::Neutral,
        }
    }

    pub fn confidence(&self) -> ConfidenceTier {
        match self {
            PatternKind::Doji => ConfidenceTier::Low,
            PatternKind::Hammer
            | PatternKind::ShootingStar
            | PatternKind::ResistanceBreak
            | PatternKind::SupportBreak
            | PatternKind::BullishDivergence
            | PatternKind::BearishDivergence => ConfidenceTier::Medium,
            PatternKind::BullishEngulfing
            | PatternKind::BearishEngulfing
            | PatternKind::DoubleTop
            | PatternKind::DoubleBottom
            | PatternKind::VolumeSpikeUp
            | PatternKind::VolumeSpikeDown => ConfidenceTier::High,
            PatternKind::ThreeWhiteSoldiers | PatternKind::ThreeBlackCrows => {
                ConfidenceTier::VeryHigh
            }
        }
    }

    pub fn family(&self) -> PatternFamily {
        match self {
            PatternKind::Hammer
            | PatternKind::ShootingStar
            | PatternKind::BullishEngulfing
            | PatternKind::BearishEngulfing
            | PatternKind::Doji
            | PatternKind::ThreeWhiteSoldiers
            | PatternKind::ThreeBlackCrows => PatternFamily::Candlestick,
            PatternKind::DoubleTop
            | PatternKind::DoubleBottom
            | PatternKind::ResistanceBreak
            | PatternKind::SupportBreak => PatternFamily::Chart,
            PatternKind::BullishDivergence | PatternKind::BearishDivergence => {
                PatternFamily::Divergence
            }
            PatternKind::VolumeSpikeUp | PatternKind::VolumeSpikeDown => PatternFamily::Volume,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Hammer => "Hammer",
            PatternKind::ShootingStar => "Shooting Star",
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
            PatternKind::Doji => "Doji",
            PatternKind::ThreeWhiteSoldiers => "Three White Soldiers",
            PatternKind::ThreeBlackCrows => "Three Black Crows",
            PatternKind::DoubleTop => "Double Top",
            PatternKind::DoubleBottom => "Double Bottom",
            PatternKind::ResistanceBreak => "Resistance Break",
            PatternKind::SupportBreak => "Support Break",
            PatternKind::BullishDivergence => "Bullish Divergence",
            PatternKind::BearishDivergence => "Bearish Divergence",
            PatternKind::VolumeSpikeUp => "Bullish Volume Spike",
            PatternKind::VolumeSpikeDown => "Bearish Volume Spike",
        }
    }
}

/// Extra measurement attached to some pattern kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum PatternDetail {
    /// Price level that formed or was broken.
    Level(f64),
    /// RSI at the bar where the divergence completed.
    Rsi(f64),
    /// Bar volume as a multiple of the trailing average.
    VolumeRatio(f64),
}

/// A pattern found at one bar of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub timestamp: DateTime<Utc>,
    pub kind: PatternKind,
    pub bias: Bias,
    pub confidence: ConfidenceTier,
    pub rationale: String,
    /// Close price of the bar the pattern was found at.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<PatternDetail>,
}

impl Pattern {
    /// Create a pattern; bias and confidence follow from the kind.
    pub fn new(
        kind: PatternKind,
        timestamp: DateTime<Utc>,
        price: f64,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            bias: kind.bias(),
            confidence: kind.confidence(),
            rationale: rationale.into(),
            price,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: PatternDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn is_bullish(&self) -> bool {
        self.bias == Bias::Bullish
    }

    pub fn is_bearish(&self) -> bool {
        self.bias == Bias::Bearish
    }
}

/// Result of one detector run over a series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternScan {
    pub candlestick: Vec<Pattern>,
    pub chart: Vec<Pattern>,
    pub divergence: Vec<Pattern>,
    pub volume: Vec<Pattern>,
    /// Number of detections across all families.
    pub total: usize,
    /// Most recent detections first, truncated to the scan limit.
    pub recent: Vec<Pattern>,
}

impl PatternScan {
    pub fn bullish_count(&self) -> usize {
        self.recent.iter().filter(|p| p.is_bullish()).count()
    }

    pub fn bearish_count(&self) -> usize {
        self.recent.iter().filter(|p| p.is_bearish()).count()
    }

    /// Share of recent detections that are bullish, if any were found.
    pub fn bullish_ratio(&self) -> Option<f64> {
        if self.recent.is_empty() {
            None
        } else {
            Some(self.bullish_count() as f64 / self.recent.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_confidence_weights() {
        assert_eq!(ConfidenceTier::VeryHigh.weight(), 3.0);
        assert_eq!(ConfidenceTier::High.weight(), 2.0);
        assert_eq!(ConfidenceTier::Medium.weight(), 1.0);
        assert_eq!(ConfidenceTier::Low.weight(), 0.5);
    }

    #[test]
    fn test_kind_catalog() {
        assert_eq!(PatternKind::Doji.bias(), Bias::Neutral);
        assert_eq!(PatternKind::Doji.confidence(), ConfidenceTier::Low);
        assert_eq!(PatternKind::ThreeBlackCrows.confidence(), ConfidenceTier::VeryHigh);
        assert_eq!(PatternKind::DoubleBottom.bias(), Bias::Bullish);
        assert_eq!(PatternKind::SupportBreak.family(), PatternFamily::Chart);
        assert_eq!(PatternKind::VolumeSpikeDown.family(), PatternFamily::Volume);
    }

    #[test]
    fn test_pattern_new_derives_bias_and_tier() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let pattern = Pattern::new(PatternKind::BullishEngulfing, ts, 102.0, "engulfs");
        assert_eq!(pattern.bias, Bias::Bullish);
        assert_eq!(pattern.confidence, ConfidenceTier::High);
        assert!(pattern.detail.is_none());
    }

    #[test]
    fn test_pattern_serialization() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let pattern = Pattern::new(PatternKind::DoubleTop, ts, 99.0, "two peaks")
            .with_detail(PatternDetail::Level(101.5));
        let json = serde_json::to_string(&pattern).unwrap();
        assert!(json.contains("\"kind\":\"double_top\""));
        assert!(json.contains("\"bias\":\"bearish\""));
        assert!(json.contains("\"type\":\"level\""));
    }

    #[test]
    fn test_scan_ratio_empty() {
        let scan = PatternScan::default();
        assert_eq!(scan.bullish_ratio(), None);
        assert_eq!(scan.bullish_count(), 0);
    }
}
