//! News sentiment response types

use serde::{Deserialize, Serialize};

/// News sentiment API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsSentimentResponse {
    #[serde(default)]
    pub items: String,
    #[serde(default)]
    pub sentiment_score_definition: String,
    #[serde(default)]
    pub relevance_score_definition: String,
    #[serde(default)]
    pub feed: Vec<NewsFeedItem>,
}

/// A single news article with sentiment scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsFeedItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub time_published: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub banner_image: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category_within_source: String,
    #[serde(default)]
    pub source_domain: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub overall_sentiment_score: f64,
    #[serde(default)]
    pub overall_sentiment_label: String,
    #[serde(default)]
    pub ticker_sentiment: Vec<TickerSentiment>,
}

/// Topic tag attached to an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub relevance_score: String,
}

/// Per-ticker sentiment within an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerSentiment {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub relevance_score: String,
    #[serde(default)]
    pub ticker_sentiment_score: String,
    #[serde(default)]
    pub ticker_sentiment_label: String,
}
