//! Sequential assessment traversal
//!
//! An `AssessmentSession` walks a catalogue one question at a time, accepting
//! answers in presentation order and allowing backward navigation to revise
//! earlier answers. When the final answer lands the session scores itself and
//! transitions to `Complete`; after that it rejects further submissions.
//!
//! The session holds only in-memory state. Persisting the resulting profile
//! is the caller's job.

use crate::assessment::catalog::{steps_for, AssessmentMode, AssessmentStep, Question};
use crate::assessment::scoring::{score_with, AnswerSet, ScoringError};
use crate::chakra::ChakraProfile;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Complete,
}

/// Result of a successful answer submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Moved to the next question; indices identify it within the catalogue
    Advanced { step: usize, question: usize },
    /// That was the last question; the session scored itself
    Complete(ChakraProfile),
}

/// One in-progress walk through a catalogue
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    mode: AssessmentMode,
    steps: &'static [AssessmentStep],
    answers: AnswerSet,
    step_index: usize,
    question_index: usize,
    state: SessionState,
}

impl AssessmentSession {
    /// Start a session at the first question of the mode's catalogue
    pub fn new(mode: AssessmentMode) -> Self {
        Self::with_steps(mode, steps_for(mode))
    }

    fn with_steps(mode: AssessmentMode, steps: &'static [AssessmentStep]) -> Self {
        Self {
            mode,
            steps,
            answers: AnswerSet::new(),
            step_index: 0,
            question_index: 0,
            state: SessionState::InProgress,
        }
    }

    pub fn mode(&self) -> AssessmentMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current (step, question) position within the catalogue
    pub fn position(&self) -> (usize, usize) {
        (self.step_index, self.question_index)
    }

    /// Answers recorded so far
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The question awaiting an answer, or None once complete
    pub fn current_question(&self) -> Option<&'static Question> {
        if self.state == SessionState::Complete {
            return None;
        }
        self.steps
            .get(self.step_index)
            .and_then(|s| s.questions.get(self.question_index))
    }

    /// Record an answer for the current question and advance.
    ///
    /// Rejects out-of-scale values without moving the cursor, so the caller
    /// can re-prompt. Submitting to a completed session is an error.
    /// Re-answering a previously visited question overwrites the old value;
    /// a back-then-forward round trip with the same value leaves the answer
    /// set unchanged.
    pub fn submit_answer(&mut self, value: i64) -> Result<SubmitOutcome, ScoringError> {
        if self.state == SessionState::Complete {
            return Err(ScoringError::SessionComplete);
        }

        let question = self
            .current_question()
            .ok_or(ScoringError::SessionComplete)?;

        if !question.scale.contains(value) {
            return Err(ScoringError::InvalidAnswer {
                question_id: question.id.to_string(),
                reason: format!(
                    "value {} outside scale range 1-{}",
                    value,
                    question.scale.max_value()
                ),
            });
        }

        self.answers.insert(question.id.to_string(), value);

        // Advance within the step, then across steps
        if self.question_index + 1 < self.steps[self.step_index].questions.len() {
            self.question_index += 1;
        } else if self.step_index + 1 < self.steps.len() {
            self.step_index += 1;
            self.question_index = 0;
        } else {
            let questions: Vec<&Question> = self
                .steps
                .iter()
                .flat_map(|s| s.questions.iter())
                .collect();
            // Complete only once scoring succeeds; a scoring failure leaves
            // the session InProgress and resumable
            let profile = score_with(questions, &self.answers)?;
            self.state = SessionState::Complete;
            return Ok(SubmitOutcome::Complete(profile));
        }

        Ok(SubmitOutcome::Advanced {
            step: self.step_index,
            question: self.question_index,
        })
    }

    /// Step back to the previous question to revise its answer.
    ///
    /// Returns false (and does nothing) at the first question or once the
    /// session is complete. The previous answer stays recorded until
    /// overwritten by a new submission.
    pub fn go_to_previous(&mut self) -> bool {
        if self.state == SessionState::Complete {
            return false;
        }
        if self.question_index > 0 {
            self.question_index -= 1;
            true
        } else if self.step_index > 0 {
            self.step_index -= 1;
            self.question_index = self.steps[self.step_index].questions.len() - 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{questions_for, AnswerScale, ChakraTarget};
    use crate::chakra::ChakraKey;

    #[test]
    fn test_new_session_starts_at_first_question() {
        let session = AssessmentSession::new(AssessmentMode::Basic);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.position(), (0, 0));
        assert_eq!(session.current_question().unwrap().id, "root-1");
    }

    #[test]
    fn test_full_walkthrough_completes_with_profile() {
        let mut session = AssessmentSession::new(AssessmentMode::Basic);
        let total = questions_for(AssessmentMode::Basic).len();

        for i in 0..total {
            let outcome = session.submit_answer(7).unwrap();
            if i + 1 < total {
                assert!(matches!(outcome, SubmitOutcome::Advanced { .. }));
            } else {
                match outcome {
                    SubmitOutcome::Complete(profile) => assert!(profile.in_range()),
                    other => panic!("expected Complete, got {:?}", other),
                }
            }
        }
        assert_eq!(session.state(), SessionState::Complete);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_enhanced_walkthrough_crosses_steps() {
        let mut session = AssessmentSession::new(AssessmentMode::Enhanced);
        // first step ("Foundation") has two questions; the third submission
        // must land in the second step
        session.submit_answer(3).unwrap();
        let outcome = session.submit_answer(3).unwrap();
        assert_eq!(outcome, SubmitOutcome::Advanced { step: 1, question: 0 });
        assert_eq!(session.current_question().unwrap().id, "eh-sacral-1");
    }

    #[test]
    fn test_invalid_answer_does_not_advance() {
        let mut session = AssessmentSession::new(AssessmentMode::Basic);
        let err = session.submit_answer(11).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidAnswer { .. }));
        assert_eq!(session.position(), (0, 0));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_back_and_forward_round_trip_is_stable() {
        let mut session = AssessmentSession::new(AssessmentMode::Basic);
        session.submit_answer(6).unwrap();
        session.submit_answer(4).unwrap();
        let before = session.answers().clone();

        assert!(session.go_to_previous());
        assert_eq!(session.current_question().unwrap().id, "root-2");
        session.submit_answer(4).unwrap();

        assert_eq!(session.answers(), &before);
        assert_eq!(session.position(), (0, 2));
    }

    #[test]
    fn test_revising_an_answer_overwrites() {
        let mut session = AssessmentSession::new(AssessmentMode::Basic);
        session.submit_answer(6).unwrap();
        assert!(session.go_to_previous());
        session.submit_answer(9).unwrap();
        assert_eq!(session.answers().get("root-1"), Some(&9));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn test_previous_at_first_question_is_a_no_op() {
        let mut session = AssessmentSession::new(AssessmentMode::Basic);
        assert!(!session.go_to_previous());
        assert_eq!(session.position(), (0, 0));
    }

    #[test]
    fn test_previous_crosses_step_boundary() {
        let mut session = AssessmentSession::new(AssessmentMode::Enhanced);
        session.submit_answer(3).unwrap();
        session.submit_answer(3).unwrap();
        assert_eq!(session.position(), (1, 0));

        assert!(session.go_to_previous());
        assert_eq!(session.position(), (0, 1));
        assert_eq!(session.current_question().unwrap().id, "eh-root-2");
    }

    #[test]
    fn test_scoring_failure_leaves_session_in_progress() {
        // Two scales feeding the same chakra is a catalogue defect that only
        // surfaces at scoring time, so the final submission fails after all
        // answers are in
        let steps: &'static [AssessmentStep] = Box::leak(Box::new([AssessmentStep {
            title: "Mixed",
            questions: vec![
                Question {
                    id: "mix-1",
                    text: "slider item",
                    target: ChakraTarget::Single(ChakraKey::Heart),
                    scale: AnswerScale::LinearTen,
                    inverse: false,
                    options: &[],
                },
                Question {
                    id: "mix-2",
                    text: "choice item",
                    target: ChakraTarget::Single(ChakraKey::Heart),
                    scale: AnswerScale::CategoricalFive,
                    inverse: false,
                    options: &["never", "rarely", "sometimes", "often", "always"],
                },
            ],
        }]));

        let mut session = AssessmentSession::with_steps(AssessmentMode::Basic, steps);
        session.submit_answer(7).unwrap();
        let err = session.submit_answer(3).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InconsistentScale {
                chakra: ChakraKey::Heart
            }
        );

        // The session stays open at the failing question instead of locking
        // itself Complete without a profile
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_question().unwrap().id, "mix-2");
    }

    #[test]
    fn test_submit_after_complete_rejected() {
        let mut session = AssessmentSession::new(AssessmentMode::Enhanced);
        for _ in 0..questions_for(AssessmentMode::Enhanced).len() {
            session.submit_answer(4).unwrap();
        }
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.submit_answer(4), Err(ScoringError::SessionComplete));
        assert!(!session.go_to_previous());
    }
}
