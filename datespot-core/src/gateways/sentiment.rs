use async_trait::async_trait;

#[async_trait]
pub trait SentimentGateway: Send + Sync {
    /// Scores the sentiment of a text from -1 (very negative) to 1 (very positive).
    ///
    /// Implementations return whatever the service answered; the
    /// range is checked by the caller.
    async fn sentiment_score(&self, text: &str) -> anyhow::Result<f64>;
}
