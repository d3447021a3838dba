use serde::{Deserialize, Serialize};

/// Seven-bucket classification of a rentability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    VeryBearish,
    Bearish,
    NeutralBearish,
    Neutral,
    NeutralBullish,
    Bullish,
    VeryBullish,
}

impl ScoreCategory {
    /// Bucket a score. Each bucket includes its lower bound.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 75.0 => ScoreCategory::VeryBullish,
            s if s >= 60.0 => ScoreCategory::Bullish,
            s if s >= 45.0 => ScoreCategory::NeutralBullish,
            s if s >= 35.0 => ScoreCategory::Neutral,
            s if s >= 25.0 => ScoreCategory::NeutralBearish,
            s if s >= 15.0 => ScoreCategory::Bearish,
            _ => ScoreCategory::VeryBearish,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::VeryBullish => "very bullish",
            ScoreCategory::Bullish => "bullish",
            ScoreCategory::NeutralBullish => "neutral-bullish",
            ScoreCategory::Neutral => "neutral",
            ScoreCategory::NeutralBearish => "neutral-bearish",
            ScoreCategory::Bearish => "bearish",
            ScoreCategory::VeryBearish => "very bearish",
        }
    }
}

/// Investment recommendation derived from score and prediction confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    ModerateBuy,
    Hold,
    Caution,
    ConsiderSelling,
    StrongSell,
}

impl Recommendation {
    pub fn from_score(score: f64, confidence: f64) -> Self {
        if score >= 70.0 && confidence >= 60.0 {
            Recommendation::StrongBuy
        } else if score >= 60.0 && confidence >= 50.0 {
            Recommendation::Buy
        } else if score >= 50.0 {
            Recommendation::ModerateBuy
        } else if score >= 40.0 {
            Recommendation::Hold
        } else if score >= 30.0 {
            Recommendation::Caution
        } else if score >= 20.0 {
            Recommendation::ConsiderSelling
        } else {
            Recommendation::StrongSell
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::ModerateBuy => "Moderate Buy",
            Recommendation::Hold => "Hold/Watch",
            Recommendation::Caution => "Caution",
            Recommendation::ConsiderSelling => "Consider Selling",
            Recommendation::StrongSell => "Strong Sell",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(
            self,
            Recommendation::StrongBuy | Recommendation::Buy | Recommendation::ModerateBuy
        )
    }

    pub fn is_sell(&self) -> bool {
        matches!(
            self,
            Recommendation::ConsiderSelling | Recommendation::StrongSell
        )
    }
}

/// Ranking score of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentabilityScore {
    /// 0-100, rounded to two decimals.
    pub score: f64,
    pub category: ScoreCategory,
    pub recommendation: Recommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lower_bounds_inclusive() {
        assert_eq!(ScoreCategory::from_score(75.0), ScoreCategory::VeryBullish);
        assert_eq!(ScoreCategory::from_score(74.99), ScoreCategory::Bullish);
        assert_eq!(ScoreCategory::from_score(60.0), ScoreCategory::Bullish);
        assert_eq!(ScoreCategory::from_score(45.0), ScoreCategory::NeutralBullish);
        assert_eq!(ScoreCategory::from_score(35.0), ScoreCategory::Neutral);
        assert_eq!(ScoreCategory::from_score(25.0), ScoreCategory::NeutralBearish);
        assert_eq!(ScoreCategory::from_score(15.0), ScoreCategory::Bearish);
        assert_eq!(ScoreCategory::from_score(14.99), ScoreCategory::VeryBearish);
        assert_eq!(ScoreCategory::from_score(0.0), ScoreCategory::VeryBearish);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ScoreCategory::NeutralBullish.label(), "neutral-bullish");
        assert_eq!(ScoreCategory::VeryBearish.label(), "very bearish");
    }

    #[test]
    fn test_recommendation_buckets() {
        assert_eq!(Recommendation::from_score(72.0, 65.0), Recommendation::StrongBuy);
        assert_eq!(Recommendation::from_score(72.0, 55.0), Recommendation::Buy);
        assert_eq!(Recommendation::from_score(65.0, 40.0), Recommendation::ModerateBuy);
        assert_eq!(Recommendation::from_score(45.0, 90.0), Recommendation::Hold);
        assert_eq!(Recommendation::from_score(30.0, 90.0), Recommendation::Caution);
        assert_eq!(Recommendation::from_score(20.0, 90.0), Recommendation::ConsiderSelling);
        assert_eq!(Recommendation::from_score(19.9, 90.0), Recommendation::StrongSell);
    }

    #[test]
    fn test_recommendation_groups() {
        assert!(Recommendation::ModerateBuy.is_buy());
        assert!(Recommendation::StrongSell.is_sell());
        assert!(!Recommendation::Hold.is_buy());
        assert!(!Recommendation::Caution.is_sell());
    }
}
