use crate::models::BurnoutScoreRecord;

/// One-way notification fired after a score record is appended. Fan-out
/// transport (websocket, polling, whatever the app uses) lives behind the
/// sink; the engine only announces the record.
pub trait ScoreSink: Send + Sync {
    fn score_appended(&self, record: &BurnoutScoreRecord);
}

/// Default sink: structured log line per appended score.
pub struct LogSink;

impl ScoreSink for LogSink {
    fn score_appended(&self, record: &BurnoutScoreRecord) {
        tracing::info!(
            user_id = %record.user_id,
            overall_score = record.overall_score,
            risk_level = record.risk_level.as_str(),
            trend = record.trend_direction.as_str(),
            "burnout score appended"
        );
    }
}
