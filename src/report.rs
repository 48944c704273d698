use std::fmt::Write;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{ActivitySample, BurnoutScoreRecord, JournalEntry, SentimentLabel};

pub fn build_report(
    user_id: Uuid,
    window_days: i64,
    cutoff: NaiveDate,
    latest: Option<&BurnoutScoreRecord>,
    samples: &[ActivitySample],
    entries: &[JournalEntry],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Burnout Wellness Report");
    let _ = writeln!(
        output,
        "Generated for user {} (last {} days, activity since {})",
        user_id, window_days, cutoff
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Current Score");

    match latest {
        None => {
            let _ = writeln!(output, "No burnout score recorded yet.");
        }
        Some(record) => {
            let _ = writeln!(
                output,
                "Overall {:.1} / 10 ({} risk), trend {} {:.1}% since the previous snapshot.",
                record.overall_score,
                record.risk_level.as_str(),
                record.trend_direction.as_str(),
                record.trend_percentage
            );
            let _ = writeln!(output);
            let _ = writeln!(output, "## Factor Breakdown");
            for (name, value) in [
                ("Work hours", record.work_hours_score),
                ("Meeting load", record.meeting_load_score),
                ("Email stress", record.email_stress_score),
                ("Break frequency", record.break_frequency_score),
                ("Sentiment", record.sentiment_score),
            ] {
                let _ = writeln!(output, "- {}: {:.1} / 10", name, value);
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Activity Window");

    if samples.is_empty() {
        let _ = writeln!(output, "No activity samples recorded for this window.");
    } else {
        let days = samples.len() as f64;
        let avg_hours = samples.iter().map(|s| s.work_hours).sum::<f64>() / days;
        let total_meetings: i32 = samples.iter().map(|s| s.meeting_count).sum();
        let total_emails: i32 = samples
            .iter()
            .map(|s| s.emails_sent + s.emails_received)
            .sum();
        let after_hours_days = samples.iter().filter(|s| s.after_hours_activity).count();

        let _ = writeln!(
            output,
            "{} tracked days, averaging {:.1} work hours per day.",
            samples.len(),
            avg_hours
        );
        let _ = writeln!(
            output,
            "- {} meetings and {} emails across the window",
            total_meetings, total_emails
        );
        let _ = writeln!(
            output,
            "- after-hours activity on {} of {} days",
            after_hours_days,
            samples.len()
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Journal Sentiment");

    if entries.is_empty() {
        let _ = writeln!(output, "No journal entries for this window.");
    } else {
        let positive = entries
            .iter()
            .filter(|e| e.sentiment_label == SentimentLabel::Positive)
            .count();
        let negative = entries
            .iter()
            .filter(|e| e.sentiment_label == SentimentLabel::Negative)
            .count();
        let neutral = entries.len() - positive - negative;
        let _ = writeln!(
            output,
            "{} entries: {} positive, {} neutral, {} negative.",
            entries.len(),
            positive,
            neutral,
            negative
        );
        for entry in entries.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}, {:+.1}): {}",
                entry.created_at.date_naive(),
                entry.sentiment_label.as_str(),
                entry.sentiment_score,
                snippet(&entry.content)
            );
        }
    }

    output
}

fn snippet(content: &str) -> String {
    const MAX: usize = 80;
    if content.chars().count() <= MAX {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(MAX).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::{RiskLevel, TrendDirection};

    fn record(user_id: Uuid) -> BurnoutScoreRecord {
        BurnoutScoreRecord {
            user_id,
            overall_score: 7.4,
            risk_level: RiskLevel::High,
            work_hours_score: 8.0,
            email_stress_score: 9.0,
            meeting_load_score: 7.0,
            break_frequency_score: 6.5,
            sentiment_score: 6.5,
            trend_direction: TrendDirection::Up,
            trend_percentage: 12.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn report_includes_score_and_factors() {
        let user_id = Uuid::new_v4();
        let cutoff = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let report = build_report(user_id, 7, cutoff, Some(&record(user_id)), &[], &[]);

        assert!(report.contains("# Burnout Wellness Report"));
        assert!(report.contains("Overall 7.4 / 10 (high risk)"));
        assert!(report.contains("trend up 12.0%"));
        assert!(report.contains("- Work hours: 8.0 / 10"));
        assert!(report.contains("No activity samples recorded for this window."));
        assert!(report.contains("No journal entries for this window."));
    }

    #[test]
    fn report_handles_missing_history() {
        let user_id = Uuid::new_v4();
        let cutoff = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let report = build_report(user_id, 7, cutoff, None, &[], &[]);

        assert!(report.contains("No burnout score recorded yet."));
        assert!(!report.contains("Factor Breakdown"));
    }

    #[test]
    fn long_journal_content_is_truncated() {
        let text = "word ".repeat(40);
        let short = snippet(&text);
        assert!(short.ends_with("..."));
        assert!(short.chars().count() <= 83);
    }
}
