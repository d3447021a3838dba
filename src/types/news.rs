use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentiment label of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    /// Label a score in [-1, 1]; the neutral band is [-0.1, 0.1].
    pub fn from_score(score: f64) -> Self {
        if score > 0.1 {
            Polarity::Positive
        } else if score < -0.1 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Neutral => "neutral",
            Polarity::Negative => "negative",
        }
    }
}

/// A headline with its polarity score, supplied by an external feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub published: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub score: f64,
}

impl NewsItem {
    pub fn polarity(&self) -> Polarity {
        Polarity::from_score(self.score)
    }
}

/// Aggregate sentiment over a set of news items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub mean_score: f64,
    pub overall: Polarity,
}
