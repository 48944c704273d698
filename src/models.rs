use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day's raw signal bundle for one user. Keyed by (user_id, date);
/// re-ingestion for the same date overwrites in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySample {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub work_hours: f64,
    pub meeting_count: i32,
    pub meeting_duration_minutes: f64,
    pub emails_sent: i32,
    pub emails_received: i32,
    pub break_count: i32,
    pub break_duration_minutes: f64,
    pub after_hours_activity: bool,
}

/// Append-only journal entry with sentiment derived at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub word_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "positive" => Some(SentimentLabel::Positive),
            "neutral" => Some(SentimentLabel::Neutral),
            "negative" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Classification thresholds over the [0, 10] overall score.
    pub fn from_score(score: f64) -> Self {
        if score > 7.0 {
            RiskLevel::High
        } else if score > 4.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(RiskLevel::Low),
            "moderate" => Some(RiskLevel::Moderate),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(TrendDirection::Up),
            "down" => Some(TrendDirection::Down),
            "stable" => Some(TrendDirection::Stable),
            _ => None,
        }
    }
}

/// The four activity-derived risk subscales, each clamped to [0, 10].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedFactors {
    pub work_hours: f64,
    pub meeting_load: f64,
    pub email_stress: f64,
    pub break_frequency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    pub percentage: f64,
}

impl Trend {
    pub fn none() -> Self {
        Trend {
            direction: TrendDirection::Stable,
            percentage: 0.0,
        }
    }
}

/// One computed snapshot for one user. Immutable; the most recent record
/// per user is the current score.
#[derive(Debug, Clone, PartialEq)]
pub struct BurnoutScoreRecord {
    pub user_id: Uuid,
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub work_hours_score: f64,
    pub email_stress_score: f64,
    pub meeting_load_score: f64,
    pub break_frequency_score: f64,
    pub sentiment_score: f64,
    pub trend_direction: TrendDirection,
    pub trend_percentage: f64,
    pub created_at: DateTime<Utc>,
}

/// Read-only payload handed to the presentation collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub score: f64,
    pub risk_level: RiskLevel,
    pub factors: DashboardFactors,
    pub trend: DashboardTrend,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardFactors {
    pub work_hours: f64,
    pub email_stress: f64,
    pub meeting_load: f64,
    pub break_frequency: f64,
    pub sentiment: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardTrend {
    pub direction: TrendDirection,
    pub percentage: f64,
}

impl From<&BurnoutScoreRecord> for DashboardMetrics {
    fn from(record: &BurnoutScoreRecord) -> Self {
        DashboardMetrics {
            score: record.overall_score,
            risk_level: record.risk_level,
            factors: DashboardFactors {
                work_hours: record.work_hours_score,
                email_stress: record.email_stress_score,
                meeting_load: record.meeting_load_score,
                break_frequency: record.break_frequency_score,
                sentiment: record.sentiment_score,
            },
            trend: DashboardTrend {
                direction: record.trend_direction,
                percentage: record.trend_percentage,
            },
            last_updated: record.created_at,
        }
    }
}
