use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::EngineError;
use crate::factors;
use crate::models::{BurnoutScoreRecord, JournalEntry};
use crate::notify::ScoreSink;
use crate::score;
use crate::sentiment;
use crate::store::{NewJournalEntry, Store};
use crate::trend;

/// Journal entries considered when averaging sentiment over a window.
const JOURNAL_FETCH_LIMIT: usize = 50;

pub fn cutoff_date(window_days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(window_days.max(1))
}

/// Run the full scoring pass for one user: load the activity window,
/// normalize per day, fold in journal sentiment, aggregate, annotate the
/// trend against the previous record, append, then notify sinks.
pub async fn compute_score(
    store: &dyn Store,
    sinks: &[&dyn ScoreSink],
    user_id: Uuid,
    window_days: i64,
) -> anyhow::Result<BurnoutScoreRecord> {
    if window_days <= 0 {
        return Err(EngineError::validation(format!(
            "window_days must be positive, got {window_days}"
        ))
        .into());
    }

    let today = Utc::now().date_naive();
    let cutoff = cutoff_date(window_days);

    let samples = store.activity_samples(user_id, cutoff, today).await?;
    let mut normalized = Vec::with_capacity(samples.len());
    for sample in &samples {
        normalized.push(factors::normalize(sample)?);
    }
    let averaged = factors::average(&normalized)?;

    let entries = store.journal_entries(user_id, JOURNAL_FETCH_LIMIT).await?;
    let sentiment_subscore = window_sentiment(&entries, cutoff);

    let previous = store
        .latest_score(user_id)
        .await?
        .map(|record| record.overall_score);

    let mut record = score::aggregate(
        user_id,
        averaged,
        sentiment_subscore,
        crate::models::Trend::none(),
        Utc::now(),
    );
    let trend = trend::trend(record.overall_score, previous);
    record.trend_direction = trend.direction;
    record.trend_percentage = trend.percentage;

    store.append_score(&record).await?;
    tracing::debug!(
        user_id = %user_id,
        samples = samples.len(),
        journal_entries = entries.len(),
        "scoring pass complete"
    );
    for sink in sinks {
        sink.score_appended(&record);
    }

    Ok(record)
}

/// Mean journal sentiment within the window, remapped to the [0, 10] risk
/// subscale. `None` when the user wrote nothing in the window, which the
/// aggregator replaces with its neutral default.
fn window_sentiment(entries: &[JournalEntry], cutoff: NaiveDate) -> Option<f64> {
    let in_window: Vec<f64> = entries
        .iter()
        .filter(|entry| entry.created_at.date_naive() >= cutoff)
        .map(|entry| entry.sentiment_score)
        .collect();

    if in_window.is_empty() {
        return None;
    }

    let mean = in_window.iter().sum::<f64>() / in_window.len() as f64;
    Some(score::sentiment_subscore(mean))
}

/// Record a journal entry: validate, derive sentiment and word count, then
/// hand it to the store, which assigns identity and timestamp.
pub async fn submit_journal(
    store: &dyn Store,
    user_id: Uuid,
    content: &str,
) -> anyhow::Result<JournalEntry> {
    let content = content.trim();
    if content.is_empty() {
        return Err(EngineError::validation("journal content is required").into());
    }

    let sentiment = sentiment::analyze(content);
    let entry = store
        .append_journal_entry(NewJournalEntry {
            user_id,
            content: content.to_string(),
            sentiment_score: sentiment.score,
            sentiment_label: sentiment.label,
            word_count: sentiment::word_count(content),
        })
        .await?;

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::{ActivitySample, RiskLevel, SentimentLabel, TrendDirection};
    use crate::store::testing::MemStore;

    struct RecordingSink {
        seen: Mutex<Vec<BurnoutScoreRecord>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            RecordingSink {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ScoreSink for RecordingSink {
        fn score_appended(&self, record: &BurnoutScoreRecord) {
            self.seen.lock().unwrap().push(record.clone());
        }
    }

    fn day_sample(user_id: Uuid, days_ago: i64, work_hours: f64) -> ActivitySample {
        ActivitySample {
            user_id,
            date: Utc::now().date_naive() - Duration::days(days_ago),
            work_hours,
            meeting_count: 6,
            meeting_duration_minutes: 300.0,
            emails_sent: 15,
            emails_received: 20,
            break_count: 1,
            break_duration_minutes: 10.0,
            after_hours_activity: true,
        }
    }

    #[tokio::test]
    async fn heavy_week_scores_elevated_risk() {
        let store = MemStore::default();
        let user_id = Uuid::new_v4();

        store
            .upsert_activity_sample(&day_sample(user_id, 1, 9.0))
            .await
            .unwrap();
        store
            .upsert_activity_sample(&day_sample(user_id, 2, 11.0))
            .await
            .unwrap();
        submit_journal(&store, user_id, "stressed overwhelmed exhausted")
            .await
            .unwrap();

        let record = compute_score(&store, &[], user_id, 7).await.unwrap();

        assert!(record.overall_score > 5.0);
        assert!(matches!(
            record.risk_level,
            RiskLevel::Moderate | RiskLevel::High
        ));
        // First record for the user: no history, so trend is flat.
        assert_eq!(record.trend_direction, TrendDirection::Stable);
        assert_eq!(record.trend_percentage, 0.0);
    }

    #[tokio::test]
    async fn second_run_annotates_the_trend() {
        let store = MemStore::default();
        let user_id = Uuid::new_v4();

        store
            .upsert_activity_sample(&day_sample(user_id, 1, 8.0))
            .await
            .unwrap();
        let first = compute_score(&store, &[], user_id, 7).await.unwrap();

        // Same day re-ingested with a much longer day pushes the score up.
        store
            .upsert_activity_sample(&day_sample(user_id, 1, 14.0))
            .await
            .unwrap();
        let second = compute_score(&store, &[], user_id, 7).await.unwrap();

        assert!(second.overall_score > first.overall_score);
        assert_eq!(second.trend_direction, TrendDirection::Up);
        let expected =
            (second.overall_score - first.overall_score).abs() / first.overall_score * 100.0;
        assert!((second.trend_percentage - expected).abs() < 1e-9);

        let latest = store.latest_score(user_id).await.unwrap().unwrap();
        assert_eq!(latest, second);
    }

    #[tokio::test]
    async fn empty_window_is_a_missing_factor_not_a_fabricated_score() {
        let store = MemStore::default();
        let user_id = Uuid::new_v4();

        let err = compute_score(&store, &[], user_id, 7).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::MissingFactor(_))
        ));
        assert!(store.latest_score(user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn no_journal_entries_fall_back_to_neutral_sentiment() {
        let store = MemStore::default();
        let user_id = Uuid::new_v4();

        store
            .upsert_activity_sample(&day_sample(user_id, 1, 8.0))
            .await
            .unwrap();
        let record = compute_score(&store, &[], user_id, 7).await.unwrap();

        assert_eq!(record.sentiment_score, score::NEUTRAL_SENTIMENT_SUBSCORE);
    }

    #[tokio::test]
    async fn sinks_receive_the_appended_record() {
        let store = MemStore::default();
        let user_id = Uuid::new_v4();
        let sink = RecordingSink::new();

        store
            .upsert_activity_sample(&day_sample(user_id, 1, 9.0))
            .await
            .unwrap();
        let record = compute_score(&store, &[&sink], user_id, 7).await.unwrap();

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], record);
    }

    #[tokio::test]
    async fn rejects_nonpositive_window() {
        let store = MemStore::default();
        let err = compute_score(&store, &[], Uuid::new_v4(), 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn journal_submission_derives_sentiment_fields() {
        let store = MemStore::default();
        let user_id = Uuid::new_v4();

        let entry = submit_journal(&store, user_id, "  I love this team, great sprint  ")
            .await
            .unwrap();
        assert_eq!(entry.content, "I love this team, great sprint");
        assert!((entry.sentiment_score - 0.2).abs() < 1e-9);
        assert_eq!(entry.sentiment_label, SentimentLabel::Neutral);
        assert_eq!(entry.word_count, 6);

        let listed = store.journal_entries(user_id, 10).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], entry);
    }

    #[tokio::test]
    async fn blank_journal_content_is_rejected() {
        let store = MemStore::default();
        let err = submit_journal(&store, Uuid::new_v4(), "   ")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::Validation(_))
        ));
    }
}
