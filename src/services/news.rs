//! Sentiment aggregation over externally scored headlines.

use crate::types::{NewsItem, Polarity, SentimentSummary};

/// Count items per polarity and derive the overall polarity from the mean
/// score. An empty slice is neutral with a zero mean.
pub fn summarize(items: &[NewsItem]) -> SentimentSummary {
    let mut summary = SentimentSummary {
        total: items.len(),
        positive: 0,
        neutral: 0,
        negative: 0,
        mean_score: 0.0,
        overall: Polarity::Neutral,
    };

    for item in items {
        match item.polarity() {
            Polarity::Positive => summary.positive += 1,
            Polarity::Neutral => summary.neutral += 1,
            Polarity::Negative => summary.negative += 1,
        }
    }

    if !items.is_empty() {
        summary.mean_score = items.iter().map(|i| i.score).sum::<f64>() / items.len() as f64;
        summary.overall = Polarity::from_score(summary.mean_score);
    }

    summary
}
