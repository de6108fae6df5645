//! Candidate quality scoring.
//! Weighted linear combination over provider signals, then two
//! multiplicative discounts (provider penalty, phrase probability).
//! Pure and total: any well-formed candidate scores in [0, 1].

use std::sync::OnceLock;

use regex::Regex;

use crate::provider::RawCandidate;

/// Trust weights per provenance tag.
const SOURCE_WEIGHTS: &[(&str, f64)] = &[("MateCat", 0.8), ("Wikipedia", 0.5), ("MT!", 0.3)];
const DEFAULT_SOURCE_WEIGHT: f64 = 0.2;

fn sentence_punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[!?.,"“”«»]"#).unwrap())
}

fn source_weight(created_by: Option<&str>) -> f64 {
    created_by
        .and_then(|tag| {
            SOURCE_WEIGHTS
                .iter()
                .find(|(name, _)| *name == tag)
                .map(|(_, w)| *w)
        })
        .unwrap_or(DEFAULT_SOURCE_WEIGHT)
}

/// Estimate in [0, 1] of how likely the text is a full sentence rather
/// than a single word or short term.
pub fn phrase_probability(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    let mut prob: f64 = 0.0;
    if words >= 3 {
        prob += 0.5;
    }
    if words >= 5 {
        prob += 0.2;
    }
    if sentence_punctuation().is_match(text) {
        prob += 0.4;
    }
    prob.min(1.0)
}

/// Score one raw candidate. Deterministic, no I/O; out-of-range provider
/// values are clamped so the result always lands in [0, 1].
pub fn score(candidate: &RawCandidate) -> f64 {
    let match_score = candidate.match_score.clamp(0.0, 1.0);
    let quality_norm = (candidate.quality / 100.0).clamp(0.0, 1.0);
    let source_weight = source_weight(candidate.created_by.as_deref());

    let words = candidate.translation.split_whitespace().count();
    // Exponential discount for long results.
    let length_penalty = if words > 0 {
        1.0 / (words as f64).powf(0.7)
    } else {
        0.1
    };

    let usage_weight = (candidate.usage_count as f64 / 5.0).min(1.0);

    let penalty_factor = 1.0 - candidate.penalty.clamp(0.0, 1.0);
    // Up to 60% discount for sentence-like results.
    let phrase_factor = 1.0 - 0.6 * phrase_probability(&candidate.translation);

    let base = 0.35 * match_score
        + 0.20 * quality_norm
        + 0.20 * source_weight
        + 0.15 * usage_weight
        + 0.05 * length_penalty;

    (base * penalty_factor * phrase_factor).clamp(0.0, 1.0)
}

/// Four-tier quality bucket for display.
pub fn quality_marker(score: f64) -> &'static str {
    if score >= 0.9 {
        "🟢"
    } else if score >= 0.7 {
        "🟡"
    } else if score >= 0.5 {
        "🟠"
    } else {
        "🔴"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        translation: &str,
        match_score: f64,
        quality: f64,
        created_by: Option<&str>,
        usage_count: u64,
        penalty: f64,
    ) -> RawCandidate {
        RawCandidate {
            translation: translation.to_string(),
            match_score,
            quality,
            created_by: created_by.map(str::to_string),
            usage_count,
            penalty,
        }
    }

    #[test]
    fn phrase_probability_single_word() {
        assert_eq!(phrase_probability("house"), 0.0);
    }

    #[test]
    fn phrase_probability_with_punctuation() {
        assert!(phrase_probability("Hold it, bastard!") >= 0.9);
    }

    #[test]
    fn phrase_probability_long_phrase() {
        assert!(phrase_probability("This is a long sentence.") >= 0.9);
    }

    #[test]
    fn phrase_probability_capped_at_one() {
        assert_eq!(
            phrase_probability("one two three four five, and then some!"),
            1.0
        );
    }

    #[test]
    fn score_strong_single_word_candidate() {
        let c = candidate("house", 0.9, 80.0, Some("MateCat"), 10, 0.0);
        let s = score(&c);
        assert!((0.0..=1.0).contains(&s));
        assert!(s > 0.5);
    }

    #[test]
    fn score_penalized_low_usage_candidate() {
        let c = candidate("something vague", 0.7, 40.0, Some("Wikipedia"), 0, 0.5);
        assert!(score(&c) < 0.5);
    }

    #[test]
    fn score_sentence_heavily_discounted() {
        let c = candidate(
            "And so it was written, behold! The day of judgment shall come to pass.",
            0.6,
            50.0,
            Some("Unknown"),
            0,
            0.0,
        );
        assert!(score(&c) < 0.2);
    }

    #[test]
    fn score_defaults_everything_absent() {
        let c = RawCandidate::bare("haus");
        let s = score(&c);
        // Only the default source weight and the length term contribute.
        assert!(s > 0.0 && s < 0.2);
    }

    #[test]
    fn score_clamps_out_of_range_provider_values() {
        let c = candidate("casa", 3.0, 900.0, Some("MateCat"), 1000, -2.0);
        let s = score(&c);
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn score_monotonic_in_match() {
        let lo = candidate("casa", 0.2, 50.0, None, 2, 0.1);
        let hi = candidate("casa", 0.9, 50.0, None, 2, 0.1);
        assert!(score(&hi) >= score(&lo));
    }

    #[test]
    fn score_antitonic_in_penalty() {
        let lo = candidate("casa", 0.5, 50.0, None, 2, 0.1);
        let hi = candidate("casa", 0.5, 50.0, None, 2, 0.8);
        assert!(score(&hi) <= score(&lo));
    }

    #[test]
    fn quality_marker_buckets() {
        assert_eq!(quality_marker(0.95), "🟢");
        assert_eq!(quality_marker(0.9), "🟢");
        assert_eq!(quality_marker(0.7), "🟡");
        assert_eq!(quality_marker(0.5), "🟠");
        assert_eq!(quality_marker(0.49), "🔴");
    }
}
