use crate::error::EngineError;
use crate::models::{ActivitySample, NormalizedFactors};

// Operating-range anchors for the monotone [0, 10] mappings. An 8-hour
// workday lands at 5.0; the other anchors mark where a metric saturates.
const HOURS_AT_MIDPOINT: f64 = 8.0;
const HOURS_SLOPE: f64 = 0.625;
const MEETINGS_AT_MAX: f64 = 5.0;
const MEETING_MINUTES_AT_MAX: f64 = 480.0;
const EMAILS_AT_MAX: f64 = 20.0;
const AFTER_HOURS_MULTIPLIER: f64 = 1.25;
const BREAKS_AT_MAX: f64 = 4.0;
const BREAK_MINUTES_AT_MAX: f64 = 60.0;

/// Map one day's raw metrics onto the four [0, 10] risk subscales.
///
/// Each mapping is monotone in its inputs and clamped at both ends.
/// break_frequency is inverse: more or longer breaks lower the subscale.
pub fn normalize(sample: &ActivitySample) -> Result<NormalizedFactors, EngineError> {
    validate(sample)?;

    Ok(NormalizedFactors {
        work_hours: work_hours_subscale(sample.work_hours),
        meeting_load: meeting_load_subscale(
            sample.meeting_count,
            sample.meeting_duration_minutes,
        ),
        email_stress: email_stress_subscale(
            sample.emails_sent,
            sample.emails_received,
            sample.after_hours_activity,
        ),
        break_frequency: break_frequency_subscale(
            sample.break_count,
            sample.break_duration_minutes,
        ),
    })
}

fn validate(sample: &ActivitySample) -> Result<(), EngineError> {
    if sample.work_hours < 0.0 || !sample.work_hours.is_finite() {
        return Err(EngineError::validation(format!(
            "work_hours must be a finite non-negative number, got {}",
            sample.work_hours
        )));
    }
    if sample.meeting_duration_minutes < 0.0 || !sample.meeting_duration_minutes.is_finite() {
        return Err(EngineError::validation(
            "meeting_duration_minutes must be a finite non-negative number",
        ));
    }
    if sample.break_duration_minutes < 0.0 || !sample.break_duration_minutes.is_finite() {
        return Err(EngineError::validation(
            "break_duration_minutes must be a finite non-negative number",
        ));
    }
    for (name, value) in [
        ("meeting_count", sample.meeting_count),
        ("emails_sent", sample.emails_sent),
        ("emails_received", sample.emails_received),
        ("break_count", sample.break_count),
    ] {
        if value < 0 {
            return Err(EngineError::validation(format!(
                "{name} must be non-negative, got {value}"
            )));
        }
    }
    Ok(())
}

/// Piecewise linear: 8h maps to 5.0, 16h or more saturates at 10.
fn work_hours_subscale(hours: f64) -> f64 {
    let score = if hours <= HOURS_AT_MIDPOINT {
        hours * HOURS_SLOPE
    } else {
        5.0 + (hours - HOURS_AT_MIDPOINT) * HOURS_SLOPE
    };
    score.clamp(0.0, 10.0)
}

/// Meeting count dominates, duration contributes; 5 meetings or 8h of
/// meetings in a day saturates the respective term.
fn meeting_load_subscale(count: i32, duration_minutes: f64) -> f64 {
    let frequency = (count as f64 / MEETINGS_AT_MAX).min(1.0);
    let duration = (duration_minutes / MEETING_MINUTES_AT_MAX).min(1.0);
    ((0.6 * frequency + 0.4 * duration) * 10.0).clamp(0.0, 10.0)
}

/// Combined sent+received volume, weighted upward when activity spilled
/// past working hours. 20 emails a day saturates the base scale.
fn email_stress_subscale(sent: i32, received: i32, after_hours: bool) -> f64 {
    let volume = ((sent + received) as f64 / EMAILS_AT_MAX).min(1.0);
    let mut score = volume * 10.0;
    if after_hours {
        score *= AFTER_HOURS_MULTIPLIER;
    }
    score.clamp(0.0, 10.0)
}

/// Inverse subscale: a day with no breaks scores 10, four short breaks
/// plus an hour away from the desk scores 0.
fn break_frequency_subscale(count: i32, duration_minutes: f64) -> f64 {
    let frequency = (count as f64 / BREAKS_AT_MAX).min(1.0);
    let duration = (duration_minutes / BREAK_MINUTES_AT_MAX).min(1.0);
    let relief = 0.6 * frequency + 0.4 * duration;
    ((1.0 - relief) * 10.0).clamp(0.0, 10.0)
}

/// Mean of per-day factors across a scoring window. The caller guarantees
/// at least one sample; an empty slice is a missing factor.
pub fn average(factors: &[NormalizedFactors]) -> Result<NormalizedFactors, EngineError> {
    if factors.is_empty() {
        return Err(EngineError::MissingFactor("no activity samples in window"));
    }

    let n = factors.len() as f64;
    Ok(NormalizedFactors {
        work_hours: factors.iter().map(|f| f.work_hours).sum::<f64>() / n,
        meeting_load: factors.iter().map(|f| f.meeting_load).sum::<f64>() / n,
        email_stress: factors.iter().map(|f| f.email_stress).sum::<f64>() / n,
        break_frequency: factors.iter().map(|f| f.break_frequency).sum::<f64>() / n,
    })
}
