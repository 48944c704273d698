use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{ActivitySample, BurnoutScoreRecord, JournalEntry, SentimentLabel};

/// Journal fields as computed at submission time; the store assigns the
/// entry id and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub user_id: Uuid,
    pub content: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub word_count: i32,
}

/// Persistence collaborator for the scoring engine. Score appends for the
/// same user must be serialized by the backend so a concurrent run cannot
/// lose a record; different users are independent.
#[async_trait]
pub trait Store: Send + Sync {
    async fn latest_score(&self, user_id: Uuid) -> anyhow::Result<Option<BurnoutScoreRecord>>;

    async fn append_score(&self, record: &BurnoutScoreRecord) -> anyhow::Result<()>;

    /// Samples for the user within [from, to], ordered by date ascending.
    async fn activity_samples(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<ActivitySample>>;

    /// Insert or overwrite the sample for its (user_id, date) key.
    async fn upsert_activity_sample(&self, sample: &ActivitySample) -> anyhow::Result<()>;

    async fn append_journal_entry(&self, entry: NewJournalEntry)
        -> anyhow::Result<JournalEntry>;

    /// Most recent entries first, at most `limit`.
    async fn journal_entries(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> anyhow::Result<Vec<JournalEntry>>;
}
