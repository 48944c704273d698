use crate::models::{Trend, TrendDirection};

/// Compare the fresh overall score against the previous persisted one.
///
/// With no history the trend is stable at 0%. A previous score of exactly
/// zero would divide by zero, so the percentage is defined as 0 there while
/// the direction still reflects the comparison.
pub fn trend(current: f64, previous: Option<f64>) -> Trend {
    let Some(previous) = previous else {
        return Trend::none();
    };

    let direction = if current > previous {
        TrendDirection::Up
    } else if current < previous {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    let percentage = if previous == 0.0 {
        0.0
    } else {
        (current - previous).abs() / previous * 100.0
    };

    Trend {
        direction,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_history_is_stable_at_zero() {
        let result = trend(5.0, None);
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn rising_score_reports_percentage_of_previous() {
        let result = trend(6.0, Some(5.0));
        assert_eq!(result.direction, TrendDirection::Up);
        assert!((result.percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn falling_score_keeps_percentage_unsigned() {
        let result = trend(4.0, Some(5.0));
        assert_eq!(result.direction, TrendDirection::Down);
        assert!((result.percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn equal_scores_are_stable() {
        let result = trend(5.0, Some(5.0));
        assert_eq!(result.direction, TrendDirection::Stable);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn zero_previous_avoids_division() {
        let result = trend(5.0, Some(0.0));
        assert_eq!(result.direction, TrendDirection::Up);
        assert_eq!(result.percentage, 0.0);
    }
}
