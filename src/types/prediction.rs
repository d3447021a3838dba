use super::PatternKind;
use serde::{Deserialize, Serialize};

/// Probable direction of the next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bullish,
    Bearish,
    Sideways,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Bullish => "Bullish",
            Direction::Bearish => "Bearish",
            Direction::Sideways => "Neutral/Sideways",
        }
    }

    /// +1 for bullish, -1 for bearish, 0 otherwise.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Bullish => 1.0,
            Direction::Bearish => -1.0,
            Direction::Sideways => 0.0,
        }
    }
}

/// Projected price band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub minimum: f64,
    pub target: f64,
    pub maximum: f64,
}

/// Name of a projection branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioName {
    Optimistic,
    Base,
    Pessimistic,
}

/// One weighted branch of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: ScenarioName,
    pub target_price: f64,
    /// Probability in percent.
    pub probability: f64,
    pub description: String,
}

/// A recent pattern that fed the prediction, with its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePattern {
    pub kind: PatternKind,
    pub bullish: bool,
    pub weight: f64,
}

/// Directional call for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub direction: Direction,
    /// Confidence in percent, 0-100.
    pub confidence: f64,
    pub price_range: PriceRange,
    pub scenarios: Vec<Scenario>,
    pub active_patterns: Vec<ActivePattern>,
    /// Volatility used for the range, in percent.
    pub volatility: f64,
    pub current_price: f64,
}

impl Prediction {
    pub fn scenario(&self, name: ScenarioName) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Return to the target price, in percent.
    pub fn expected_return_pct(&self) -> f64 {
        if self.current_price > 0.0 {
            (self.price_range.target - self.current_price) / self.current_price * 100.0
        } else {
            0.0
        }
    }
}
