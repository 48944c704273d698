use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{BurnoutScoreRecord, NormalizedFactors, RiskLevel, Trend};

/// Subscore substituted when a user has no journal entries in the window.
pub const NEUTRAL_SENTIMENT_SUBSCORE: f64 = 5.0;

/// Remap a [-1, 1] sentiment score to a [0, 10] risk contribution. The
/// relationship is inverse: more negative sentiment means more risk, so a
/// sentiment of -1 maps to 10 and +1 maps to 0.
pub fn sentiment_subscore(sentiment_score: f64) -> f64 {
    ((1.0 - sentiment_score.clamp(-1.0, 1.0)) * 5.0).clamp(0.0, 10.0)
}

/// Combine the five bounded subscores into one record. The overall score is
/// their equal-weight mean, defensively clamped, with the risk level derived
/// from it. A `None` sentiment input takes the documented neutral default.
/// Trend fields come from the caller; `Trend::none()` when no history exists.
pub fn aggregate(
    user_id: Uuid,
    factors: NormalizedFactors,
    sentiment: Option<f64>,
    trend: Trend,
    created_at: DateTime<Utc>,
) -> BurnoutScoreRecord {
    let sentiment_score = sentiment.unwrap_or(NEUTRAL_SENTIMENT_SUBSCORE);

    let overall = (factors.work_hours
        + factors.email_stress
        + factors.meeting_load
        + factors.break_frequency
        + sentiment_score)
        / 5.0;
    let overall = overall.clamp(0.0, 10.0);

    BurnoutScoreRecord {
        user_id,
        overall_score: overall,
        risk_level: RiskLevel::from_score(overall),
        work_hours_score: factors.work_hours,
        email_stress_score: factors.email_stress,
        meeting_load_score: factors.meeting_load,
        break_frequency_score: factors.break_frequency,
        sentiment_score,
        trend_direction: trend.direction,
        trend_percentage: trend.percentage,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendDirection;

    fn factors(value: f64) -> NormalizedFactors {
        NormalizedFactors {
            work_hours: value,
            meeting_load: value,
            email_stress: value,
            break_frequency: value,
        }
    }

    #[test]
    fn sentiment_remap_is_inverse_and_bounded() {
        assert_eq!(sentiment_subscore(1.0), 0.0);
        assert_eq!(sentiment_subscore(0.0), 5.0);
        assert_eq!(sentiment_subscore(-1.0), 10.0);
        // Out-of-range inputs are clamped before remapping.
        assert_eq!(sentiment_subscore(3.0), 0.0);
        assert_eq!(sentiment_subscore(-3.0), 10.0);
    }

    #[test]
    fn overall_is_the_mean_of_five_subscores() {
        let uneven = NormalizedFactors {
            work_hours: 8.0,
            meeting_load: 6.0,
            email_stress: 4.0,
            break_frequency: 2.0,
        };
        let record = aggregate(
            Uuid::new_v4(),
            uneven,
            Some(10.0),
            Trend::none(),
            Utc::now(),
        );
        assert!((record.overall_score - 6.0).abs() < 1e-9);
        assert_eq!(record.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn missing_sentiment_takes_the_neutral_default() {
        let record = aggregate(Uuid::new_v4(), factors(5.0), None, Trend::none(), Utc::now());
        assert_eq!(record.sentiment_score, NEUTRAL_SENTIMENT_SUBSCORE);
        assert!((record.overall_score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn overall_stays_in_range_at_the_extremes() {
        let low = aggregate(Uuid::new_v4(), factors(0.0), Some(0.0), Trend::none(), Utc::now());
        assert_eq!(low.overall_score, 0.0);
        assert_eq!(low.risk_level, RiskLevel::Low);

        let high = aggregate(
            Uuid::new_v4(),
            factors(10.0),
            Some(10.0),
            Trend::none(),
            Utc::now(),
        );
        assert_eq!(high.overall_score, 10.0);
        assert_eq!(high.risk_level, RiskLevel::High);
    }

    #[test]
    fn trend_fields_pass_through() {
        let record = aggregate(
            Uuid::new_v4(),
            factors(5.0),
            Some(5.0),
            Trend {
                direction: TrendDirection::Up,
                percentage: 12.5,
            },
            Utc::now(),
        );
        assert_eq!(record.trend_direction, TrendDirection::Up);
        assert!((record.trend_percentage - 12.5).abs() < 1e-9);
    }
}
