//! A/B test simulation — fills missing engagement scores and picks the winner.
//!
//! Synthetic scores come from a pluggable `ScoreSource` so tests and seeded
//! deployments get reproducible values. `AppState` holds an `Arc<dyn ScoreSource>`.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::caption::CaptionVariation;

/// Inclusive range synthetic scores are drawn from.
pub const SYNTHETIC_SCORE_MIN: f64 = 6.5;
pub const SYNTHETIC_SCORE_MAX: f64 = 9.2;

/// Rationale given to variations the model left unexplained.
pub const DEFAULT_RATIONALE: &str = "Likely to drive strong engagement for the target audience.";

/// Display value for a missing score.
pub const SCORE_NOT_AVAILABLE: &str = "N/A";

pub trait ScoreSource: Send + Sync {
    /// A raw draw in `[SYNTHETIC_SCORE_MIN, SYNTHETIC_SCORE_MAX]`. Rounding is the caller's job.
    fn synthetic_score(&self) -> f64;
}

/// Uniform scores from a `StdRng`. Seed it for reproducible simulations.
pub struct RandomScoreSource {
    rng: Mutex<StdRng>,
}

impl RandomScoreSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ScoreSource for RandomScoreSource {
    fn synthetic_score(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(SYNTHETIC_SCORE_MIN..=SYNTHETIC_SCORE_MAX)
    }
}

/// Fills every missing score and empty rationale, then marks the single best variation.
///
/// Call exactly once per result set: missing scores are re-rolled on every call.
pub fn run_ab_simulation(
    mut variations: Vec<CaptionVariation>,
    scores: &dyn ScoreSource,
) -> Vec<CaptionVariation> {
    for variation in &mut variations {
        if variation.score.is_none() {
            variation.score = Some(round_to_tenth(scores.synthetic_score()));
        }
        if variation.why.trim().is_empty() {
            variation.why = DEFAULT_RATIONALE.to_string();
        }
    }
    mark_recommended(&mut variations);
    variations
}

/// Flags the highest-scoring variation and clears the flag on the rest.
///
/// Missing scores count as 0. Ties go to the earliest entry.
pub fn mark_recommended(variations: &mut [CaptionVariation]) {
    let mut best: Option<(usize, f64)> = None;
    for (idx, variation) in variations.iter().enumerate() {
        let score = variation.score.unwrap_or(0.0);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((idx, score));
        }
    }
    for (idx, variation) in variations.iter_mut().enumerate() {
        variation.recommended = best.is_some_and(|(top_idx, _)| top_idx == idx);
    }
}

/// Formats an engagement score for display, e.g. `8.3/10` or `N/A`.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        // `{:?}` keeps the trailing `.0` on whole numbers (8.0/10, not 8/10).
        Some(score) => format!("{score:?}/10"),
        None => SCORE_NOT_AVAILABLE.to_string(),
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
pub(crate) struct FixedScores(pub f64);

#[cfg(test)]
impl ScoreSource for FixedScores {
    fn synthetic_score(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variation(caption: &str, score: Option<f64>) -> CaptionVariation {
        CaptionVariation {
            caption: caption.to_string(),
            score,
            why: String::new(),
            recommended: false,
        }
    }

    fn recommended_count(variations: &[CaptionVariation]) -> usize {
        variations.iter().filter(|v| v.recommended).count()
    }

    #[test]
    fn test_format_score_absent() {
        assert_eq!(format_score(None), "N/A");
    }

    #[test]
    fn test_format_score_present() {
        assert_eq!(format_score(Some(7.5)), "7.5/10");
        assert_eq!(format_score(Some(8.0)), "8.0/10");
    }

    #[test]
    fn test_missing_scores_filled_within_range() {
        let source = RandomScoreSource::seeded(7);
        let input: Vec<_> = (0..50).map(|i| variation(&format!("c{i}"), None)).collect();
        let ranked = run_ab_simulation(input, &source);

        for v in &ranked {
            let score = v.score.unwrap();
            assert!((SYNTHETIC_SCORE_MIN..=SYNTHETIC_SCORE_MAX).contains(&score), "{score}");
            assert!(((score * 10.0).round() - score * 10.0).abs() < 1e-9, "{score}");
            assert_eq!(v.why, DEFAULT_RATIONALE);
        }
        assert_eq!(recommended_count(&ranked), 1);
    }

    #[test]
    fn test_existing_scores_and_rationale_preserved() {
        let mut input = vec![variation("A", Some(4.2)), variation("B", None)];
        input[0].why = "Punchy and short".to_string();
        let ranked = run_ab_simulation(input, &FixedScores(7.0));

        assert_eq!(ranked[0].score, Some(4.2));
        assert_eq!(ranked[0].why, "Punchy and short");
        assert_eq!(ranked[1].score, Some(7.0));
        assert!(ranked[1].recommended);
        assert!(!ranked[0].recommended);
    }

    #[test]
    fn test_recommended_is_maximum_score() {
        let input = vec![
            variation("A", Some(6.1)),
            variation("B", Some(9.4)),
            variation("C", Some(7.7)),
        ];
        let ranked = run_ab_simulation(input, &FixedScores(8.0));
        let top = ranked.iter().find(|v| v.recommended).unwrap();
        assert_eq!(top.caption, "B");
        assert!(ranked.iter().all(|v| v.score <= top.score));
    }

    #[test]
    fn test_ties_resolve_to_first_occurrence() {
        let mut variations = vec![
            variation("A", Some(8.0)),
            variation("B", Some(8.5)),
            variation("C", Some(8.5)),
        ];
        mark_recommended(&mut variations);
        assert!(variations[1].recommended);
        assert_eq!(recommended_count(&variations), 1);
    }

    #[test]
    fn test_all_absent_scores_recommend_first() {
        let mut variations = vec![variation("A", None), variation("B", None)];
        mark_recommended(&mut variations);
        assert!(variations[0].recommended);
        assert!(!variations[1].recommended);
    }

    #[test]
    fn test_stale_recommendation_cleared() {
        let mut variations = vec![variation("A", Some(5.0)), variation("B", Some(9.0))];
        variations[0].recommended = true;
        mark_recommended(&mut variations);
        assert!(!variations[0].recommended);
        assert!(variations[1].recommended);
    }

    #[test]
    fn test_empty_set_is_untouched() {
        let ranked = run_ab_simulation(Vec::new(), &FixedScores(8.0));
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let a = RandomScoreSource::seeded(42);
        let b = RandomScoreSource::seeded(42);
        let draws_a: Vec<f64> = (0..5).map(|_| a.synthetic_score()).collect();
        let draws_b: Vec<f64> = (0..5).map(|_| b.synthetic_score()).collect();
        assert_eq!(draws_a, draws_b);
    }
}
