use crate::models::SentimentLabel;

/// Closed vocabularies for the lexicon-counting heuristic. Matching is
/// case-insensitive and exact per whitespace token; no stemming.
pub const POSITIVE_WORDS: [&str; 10] = [
    "good",
    "great",
    "happy",
    "excellent",
    "wonderful",
    "amazing",
    "fantastic",
    "love",
    "enjoy",
    "excited",
];

pub const NEGATIVE_WORDS: [&str; 10] = [
    "bad",
    "terrible",
    "awful",
    "hate",
    "stressed",
    "overwhelmed",
    "exhausted",
    "frustrated",
    "angry",
    "sad",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    pub score: f64,
    pub label: SentimentLabel,
}

/// Score free text by counting lexicon hits: +0.1 per positive token,
/// -0.1 per negative token, clamped to [-1, 1]. Repeated occurrences each
/// count. Empty or whitespace-only text is neutral.
///
/// The tally is kept in integer tenths so that a score landing exactly on
/// the 0.3 label boundary compares cleanly.
pub fn analyze(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let mut tenths: i32 = 0;

    for token in lowered.split_whitespace() {
        if POSITIVE_WORDS.contains(&token) {
            tenths += 1;
        }
        if NEGATIVE_WORDS.contains(&token) {
            tenths -= 1;
        }
    }

    let score = f64::from(tenths.clamp(-10, 10)) / 10.0;
    Sentiment {
        score,
        label: label_for(score),
    }
}

/// Strictly greater than 0.3 is positive, strictly less than -0.3 is
/// negative; exactly 0.3 stays neutral.
pub fn label_for(score: f64) -> SentimentLabel {
    if score > 0.3 {
        SentimentLabel::Positive
    } else if score < -0.3 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn word_count(text: &str) -> i32 {
    text.split_whitespace().count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral() {
        let result = analyze("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);

        let result = analyze("   \t  \n ");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn three_positive_tokens_sit_on_the_boundary() {
        // 0.3 is not strictly greater than the 0.3 threshold.
        let result = analyze("good great happy");
        assert!((result.score - 0.3).abs() < 1e-9);
        assert_eq!(result.label, SentimentLabel::Neutral);

        let result = analyze("good great happy excited");
        assert!((result.score - 0.4).abs() < 1e-9);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn negative_tokens_pull_the_score_down() {
        let result = analyze("stressed overwhelmed exhausted frustrated");
        assert!((result.score + 0.4).abs() < 1e-9);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn repeated_tokens_each_count() {
        let result = analyze("sad sad sad sad sad");
        assert!((result.score + 0.5).abs() < 1e-9);
    }

    #[test]
    fn matching_is_case_insensitive_and_exact() {
        let result = analyze("GREAT Happy");
        assert!((result.score - 0.2).abs() < 1e-9);

        // "greatness" is not "great"; no partial matching.
        let result = analyze("greatness sadness");
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn score_is_clamped_to_unit_range() {
        let positive = "love ".repeat(30);
        assert_eq!(analyze(&positive).score, 1.0);

        let negative = "hate ".repeat(30);
        let result = analyze(&negative);
        assert_eq!(result.score, -1.0);
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn lexicons_are_disjoint() {
        for word in POSITIVE_WORDS {
            assert!(!NEGATIVE_WORDS.contains(&word));
        }
    }

    #[test]
    fn counts_words_by_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one two  three"), 3);
    }
}
