//! Chakra-assessment scoring engine
//!
//! Deterministic reduction of an answer set plus a question catalogue into a
//! seven-chakra intensity profile. Pure functions only: no I/O, no hidden
//! state, calling twice with the same input yields the same profile.
//!
//! The two assessment modes share this single code path, parameterized by
//! each question's `AnswerScale`, so the modes can never silently diverge in
//! rounding or clamping behavior. Normalization targets a common 1-10 output
//! range, rounded to one decimal place for both scales.

use crate::assessment::catalog::{AnswerScale, AssessmentMode, ChakraTarget, Question};
use crate::chakra::{ChakraKey, ChakraProfile, NEUTRAL_INTENSITY};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Raw responses keyed by question id. Insertion order is irrelevant to the
/// engine; a BTreeMap keeps iteration deterministic.
pub type AnswerSet = BTreeMap<String, i64>;

/// Failures of the scoring engine and assessment session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Answer value outside the question's declared scale, or unknown
    /// question id. Caller's bug: not retryable, must be fixed before
    /// resubmission.
    #[error("invalid answer for question '{question_id}': {reason}")]
    InvalidAnswer { question_id: String, reason: String },

    /// Questions on mixed scales feed one chakra accumulator. A catalogue
    /// authoring defect, caught by `validate_catalog` at startup; never
    /// expected at runtime against a validated catalogue.
    #[error("inconsistent answer scales for chakra {chakra}")]
    InconsistentScale { chakra: ChakraKey },

    /// Other catalogue authoring defect (duplicate id, malformed options)
    #[error("catalogue defect: {0}")]
    Catalog(String),

    /// Answer submitted to an already-completed session
    #[error("assessment session is already complete")]
    SessionComplete,
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score an answer set against one of the built-in catalogues.
///
/// Partial answer sets never fail: chakras no answered question touched
/// default to the neutral midpoint 5.0. An empty answer set therefore yields
/// the full neutral profile.
pub fn score(mode: AssessmentMode, answers: &AnswerSet) -> Result<ChakraProfile, ScoringError> {
    score_with(crate::assessment::catalog::questions_for(mode), answers)
}

/// Score an answer set against an explicit question list.
///
/// The engine re-checks scale consistency per chakra even though
/// `validate_catalog` guards the built-in catalogues, because callers may
/// supply their own question lists.
pub fn score_with<'a, I>(questions: I, answers: &AnswerSet) -> Result<ChakraProfile, ScoringError>
where
    I: IntoIterator<Item = &'a Question>,
{
    let by_id: HashMap<&str, &Question> =
        questions.into_iter().map(|q| (q.id, q)).collect();

    // Raw signal accumulators per chakra, plus the scale each one is fed on
    let mut accumulators: [Vec<i64>; 7] = Default::default();
    let mut scales: [Option<AnswerScale>; 7] = [None; 7];

    for (question_id, raw) in answers {
        let question = by_id.get(question_id.as_str()).ok_or_else(|| {
            ScoringError::InvalidAnswer {
                question_id: question_id.clone(),
                reason: "unknown question id".to_string(),
            }
        })?;

        if !question.scale.contains(*raw) {
            return Err(ScoringError::InvalidAnswer {
                question_id: question_id.clone(),
                reason: format!(
                    "value {} outside scale range 1-{}",
                    raw,
                    question.scale.max_value()
                ),
            });
        }

        let signal = if question.inverse {
            question.scale.max_value() + 1 - raw
        } else {
            *raw
        };

        let touched: &[ChakraKey] = match &question.target {
            ChakraTarget::Single(key) => std::slice::from_ref(key),
            ChakraTarget::All => &ChakraKey::ALL,
        };
        for key in touched {
            let idx = key.index();
            match scales[idx] {
                None => scales[idx] = Some(question.scale),
                Some(existing) if existing != question.scale => {
                    return Err(ScoringError::InconsistentScale { chakra: *key });
                }
                Some(_) => {}
            }
            accumulators[idx].push(signal);
        }
    }

    let mut profile = ChakraProfile::neutral();
    for key in ChakraKey::ALL {
        let idx = key.index();
        let contributions = &accumulators[idx];
        if contributions.is_empty() {
            // Untouched chakra: neutral midpoint by policy, not an error
            profile.set(key, NEUTRAL_INTENSITY);
            continue;
        }

        let mean = contributions.iter().sum::<i64>() as f64 / contributions.len() as f64;
        let intensity = match scales[idx].expect("non-empty accumulator has a scale") {
            AnswerScale::LinearTen => round1(mean),
            AnswerScale::CategoricalFive => round1(mean * 2.0),
        };

        profile.set(key, intensity.clamp(1.0, 10.0));
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::questions_for;

    fn answers(pairs: &[(&str, i64)]) -> AnswerSet {
        pairs.iter().map(|(id, v)| (id.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_answers_yield_neutral_profile() {
        let profile = score(AssessmentMode::Basic, &AnswerSet::new()).unwrap();
        assert_eq!(profile, ChakraProfile::neutral());
    }

    #[test]
    fn test_all_keys_in_range_for_valid_answers() {
        let mut set = AnswerSet::new();
        for (i, q) in questions_for(AssessmentMode::Basic).iter().enumerate() {
            set.insert(q.id.to_string(), 1 + (i as i64 % 10));
        }
        let profile = score(AssessmentMode::Basic, &set).unwrap();
        assert!(profile.in_range());
    }

    #[test]
    fn test_idempotence() {
        let set = answers(&[("root-1", 7), ("heart-1", 4), ("crown-5", 9)]);
        let first = score(AssessmentMode::Basic, &set).unwrap();
        let second = score(AssessmentMode::Basic, &set).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inverse_scoring_flips_signal() {
        // root-2 is reverse-worded LinearTen: raw 3 contributes 11 - 3 = 8
        let profile = score(AssessmentMode::Basic, &answers(&[("root-2", 3)])).unwrap();
        assert_eq!(profile.root, 8.0);
        for key in &ChakraKey::ALL[1..] {
            assert_eq!(profile.get(*key), 5.0, "{} should stay neutral", key);
        }
    }

    #[test]
    fn test_categorical_scaling() {
        // eh-heart-1 is CategoricalFive: raw 5 -> 10.0, raw 1 -> 2.0
        let high = score(AssessmentMode::Enhanced, &answers(&[("eh-heart-1", 5)])).unwrap();
        assert_eq!(high.heart, 10.0);

        let low = score(AssessmentMode::Enhanced, &answers(&[("eh-heart-1", 1)])).unwrap();
        assert_eq!(low.heart, 2.0);
    }

    #[test]
    fn test_all_target_fans_out() {
        // eh-all-1 targets every chakra: raw 4 doubles to 8.0 everywhere
        let profile = score(AssessmentMode::Enhanced, &answers(&[("eh-all-1", 4)])).unwrap();
        for (key, intensity) in profile.iter() {
            assert_eq!(intensity, 8.0, "{} should be 8.0", key);
        }
    }

    #[test]
    fn test_all_target_linear_fans_out() {
        // same fan-out property on a LinearTen question
        let q = Question {
            id: "general-1",
            text: "Overall wellbeing",
            target: ChakraTarget::All,
            scale: AnswerScale::LinearTen,
            inverse: false,
            options: &[],
        };
        let profile = score_with(std::iter::once(&q), &answers(&[("general-1", 8)])).unwrap();
        for (_, intensity) in profile.iter() {
            assert_eq!(intensity, 8.0);
        }
    }

    #[test]
    fn test_value_above_linear_max_rejected() {
        let err = score(AssessmentMode::Basic, &answers(&[("root-1", 11)])).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidAnswer { .. }));
    }

    #[test]
    fn test_value_below_categorical_min_rejected() {
        let err = score(AssessmentMode::Enhanced, &answers(&[("eh-root-1", 0)])).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidAnswer { .. }));
    }

    #[test]
    fn test_unknown_question_id_rejected() {
        let err = score(AssessmentMode::Basic, &answers(&[("nonexistent", 5)])).unwrap_err();
        match err {
            ScoringError::InvalidAnswer { question_id, .. } => {
                assert_eq!(question_id, "nonexistent");
            }
            other => panic!("expected InvalidAnswer, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_scales_on_one_chakra_rejected() {
        let linear = Question {
            id: "mix-1",
            text: "slider",
            target: ChakraTarget::Single(ChakraKey::Heart),
            scale: AnswerScale::LinearTen,
            inverse: false,
            options: &[],
        };
        let categorical = Question {
            id: "mix-2",
            text: "choice",
            target: ChakraTarget::Single(ChakraKey::Heart),
            scale: AnswerScale::CategoricalFive,
            inverse: false,
            options: &["a", "b", "c", "d", "e"],
        };
        let catalogue = vec![linear, categorical];
        let err = score_with(catalogue.iter(), &answers(&[("mix-1", 7), ("mix-2", 3)]))
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::InconsistentScale { chakra: ChakraKey::Heart }
        );
    }

    #[test]
    fn test_mean_is_rounded_to_one_decimal() {
        // root-1 and root-3 forward: raw 7 and 8 -> mean 7.5
        let profile =
            score(AssessmentMode::Basic, &answers(&[("root-1", 7), ("root-3", 8)])).unwrap();
        assert_eq!(profile.root, 7.5);

        // three contributions: (7 + 8 + 7) / 3 = 7.333... -> 7.3
        let profile = score(
            AssessmentMode::Basic,
            &answers(&[("root-1", 7), ("root-3", 8), ("root-5", 7)]),
        )
        .unwrap();
        assert_eq!(profile.root, 7.3);
    }

    #[test]
    fn test_basic_mode_symmetry() {
        // Every question answered 8: forward items contribute 8, reverse
        // items contribute 11 - 8 = 3. Each chakra receives the identical
        // mixture (3 forward, 2 reverse), so all seven land together:
        // (8 + 3 + 8 + 3 + 8) / 5 = 6.0
        let mut set = AnswerSet::new();
        for q in questions_for(AssessmentMode::Basic) {
            set.insert(q.id.to_string(), 8);
        }
        let profile = score(AssessmentMode::Basic, &set).unwrap();
        for (key, intensity) in profile.iter() {
            assert_eq!(intensity, 6.0, "{} broke symmetry", key);
        }
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(7.25), 7.3);
        assert_eq!(round1(7.333333), 7.3);
        assert_eq!(round1(2.0), 2.0);
        assert_eq!(round1(9.96), 10.0);
    }
}
