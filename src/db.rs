use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{
    ActivitySample, BurnoutScoreRecord, JournalEntry, RiskLevel, SentimentLabel, TrendDirection,
};
use crate::store::{NewJournalEntry, Store};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[async_trait]
impl Store for PgStore {
    async fn latest_score(&self, user_id: Uuid) -> anyhow::Result<Option<BurnoutScoreRecord>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, overall_score, risk_level, work_hours_score,
                   email_stress_score, meeting_load_score, break_frequency_score,
                   sentiment_score, trend_direction, trend_percentage, created_at
            FROM burnout.scores
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(score_from_row).transpose()
    }

    async fn append_score(&self, record: &BurnoutScoreRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO burnout.scores
            (id, user_id, overall_score, risk_level, work_hours_score,
             email_stress_score, meeting_load_score, break_frequency_score,
             sentiment_score, trend_direction, trend_percentage, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.user_id)
        .bind(record.overall_score)
        .bind(record.risk_level.as_str())
        .bind(record.work_hours_score)
        .bind(record.email_stress_score)
        .bind(record.meeting_load_score)
        .bind(record.break_frequency_score)
        .bind(record.sentiment_score)
        .bind(record.trend_direction.as_str())
        .bind(record.trend_percentage)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn activity_samples(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<ActivitySample>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, date, work_hours, meeting_count, meeting_duration_minutes,
                   emails_sent, emails_received, break_count, break_duration_minutes,
                   after_hours_activity
            FROM burnout.activity_samples
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let mut samples = Vec::with_capacity(rows.len());
        for row in rows {
            samples.push(ActivitySample {
                user_id: row.get("user_id"),
                date: row.get("date"),
                work_hours: row.get("work_hours"),
                meeting_count: row.get("meeting_count"),
                meeting_duration_minutes: row.get("meeting_duration_minutes"),
                emails_sent: row.get("emails_sent"),
                emails_received: row.get("emails_received"),
                break_count: row.get("break_count"),
                break_duration_minutes: row.get("break_duration_minutes"),
                after_hours_activity: row.get("after_hours_activity"),
            });
        }
        Ok(samples)
    }

    async fn upsert_activity_sample(&self, sample: &ActivitySample) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO burnout.activity_samples
            (id, user_id, date, work_hours, meeting_count, meeting_duration_minutes,
             emails_sent, emails_received, break_count, break_duration_minutes,
             after_hours_activity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id, date) DO UPDATE SET
                work_hours = EXCLUDED.work_hours,
                meeting_count = EXCLUDED.meeting_count,
                meeting_duration_minutes = EXCLUDED.meeting_duration_minutes,
                emails_sent = EXCLUDED.emails_sent,
                emails_received = EXCLUDED.emails_received,
                break_count = EXCLUDED.break_count,
                break_duration_minutes = EXCLUDED.break_duration_minutes,
                after_hours_activity = EXCLUDED.after_hours_activity
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sample.user_id)
        .bind(sample.date)
        .bind(sample.work_hours)
        .bind(sample.meeting_count)
        .bind(sample.meeting_duration_minutes)
        .bind(sample.emails_sent)
        .bind(sample.emails_received)
        .bind(sample.break_count)
        .bind(sample.break_duration_minutes)
        .bind(sample.after_hours_activity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn append_journal_entry(
        &self,
        entry: NewJournalEntry,
    ) -> anyhow::Result<JournalEntry> {
        let row = sqlx::query(
            r#"
            INSERT INTO burnout.journal_entries
            (id, user_id, content, sentiment_score, sentiment_label, word_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id, user_id, content, sentiment_score, sentiment_label,
                      word_count, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(&entry.content)
        .bind(entry.sentiment_score)
        .bind(entry.sentiment_label.as_str())
        .bind(entry.word_count)
        .fetch_one(&self.pool)
        .await?;

        journal_from_row(row)
    }

    async fn journal_entries(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> anyhow::Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, content, sentiment_score, sentiment_label,
                   word_count, created_at
            FROM burnout.journal_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(journal_from_row).collect()
    }
}

fn score_from_row(row: sqlx::postgres::PgRow) -> anyhow::Result<BurnoutScoreRecord> {
    let risk_level: String = row.get("risk_level");
    let trend_direction: String = row.get("trend_direction");

    Ok(BurnoutScoreRecord {
        user_id: row.get("user_id"),
        overall_score: row.get("overall_score"),
        risk_level: RiskLevel::parse(&risk_level)
            .with_context(|| format!("unknown risk level in store: {risk_level}"))?,
        work_hours_score: row.get("work_hours_score"),
        email_stress_score: row.get("email_stress_score"),
        meeting_load_score: row.get("meeting_load_score"),
        break_frequency_score: row.get("break_frequency_score"),
        sentiment_score: row.get("sentiment_score"),
        trend_direction: TrendDirection::parse(&trend_direction)
            .with_context(|| format!("unknown trend direction in store: {trend_direction}"))?,
        trend_percentage: row.get("trend_percentage"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}

fn journal_from_row(row: sqlx::postgres::PgRow) -> anyhow::Result<JournalEntry> {
    let label: String = row.get("sentiment_label");

    Ok(JournalEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        sentiment_score: row.get("sentiment_score"),
        sentiment_label: SentimentLabel::parse(&label)
            .with_context(|| format!("unknown sentiment label in store: {label}"))?,
        word_count: row.get("word_count"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}

/// Deterministic fixtures for demos: one user with a week of activity and a
/// few journal entries. Re-running refreshes the same rows.
pub async fn seed(store: &PgStore) -> anyhow::Result<Uuid> {
    let user_id = Uuid::parse_str("7c2f9d4e-51a8-4b6e-9c3d-2f8e61b0a754")?;
    let today = Utc::now().date_naive();

    let days: [(i64, f64, i32, f64, i32, i32, i32, f64, bool); 5] = [
        (1, 9.5, 6, 270.0, 18, 34, 1, 10.0, true),
        (2, 8.0, 4, 180.0, 12, 20, 3, 35.0, false),
        (3, 10.5, 7, 330.0, 22, 41, 0, 0.0, true),
        (4, 7.5, 3, 120.0, 9, 15, 4, 50.0, false),
        (5, 11.0, 5, 240.0, 16, 28, 1, 5.0, true),
    ];

    for (days_ago, hours, meetings, meeting_min, sent, received, breaks, break_min, after_hours) in
        days
    {
        let sample = ActivitySample {
            user_id,
            date: today - chrono::Duration::days(days_ago),
            work_hours: hours,
            meeting_count: meetings,
            meeting_duration_minutes: meeting_min,
            emails_sent: sent,
            emails_received: received,
            break_count: breaks,
            break_duration_minutes: break_min,
            after_hours_activity: after_hours,
        };
        store.upsert_activity_sample(&sample).await?;
    }

    let entries = [
        "Another late night, feeling exhausted and a bit overwhelmed by the backlog.",
        "Good progress on the migration today, happy with how the pairing session went.",
        "Back to back meetings all day, stressed about the release date.",
    ];

    for content in entries {
        let sentiment = crate::sentiment::analyze(content);
        store
            .append_journal_entry(NewJournalEntry {
                user_id,
                content: content.to_string(),
                sentiment_score: sentiment.score,
                sentiment_label: sentiment.label,
                word_count: crate::sentiment::word_count(content),
            })
            .await?;
    }

    Ok(user_id)
}

/// Import activity samples from CSV, upserting on (user_id, date). Returns
/// the number of rows applied.
pub async fn import_csv(store: &PgStore, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        user_id: Uuid,
        date: NaiveDate,
        work_hours: f64,
        meeting_count: i32,
        meeting_duration_minutes: f64,
        emails_sent: i32,
        emails_received: i32,
        break_count: i32,
        break_duration_minutes: f64,
        after_hours_activity: bool,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut applied = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let sample = ActivitySample {
            user_id: row.user_id,
            date: row.date,
            work_hours: row.work_hours,
            meeting_count: row.meeting_count,
            meeting_duration_minutes: row.meeting_duration_minutes,
            emails_sent: row.emails_sent,
            emails_received: row.emails_received,
            break_count: row.break_count,
            break_duration_minutes: row.break_duration_minutes,
            after_hours_activity: row.after_hours_activity,
        };

        // Reject malformed rows before they reach the store.
        crate::factors::normalize(&sample)?;
        store.upsert_activity_sample(&sample).await?;
        applied += 1;
    }

    Ok(applied)
}
