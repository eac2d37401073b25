//! Assessment core: question catalogues, scoring engine, session traversal
//!
//! The three pieces compose in one direction only: the catalogue is static
//! data, the scoring engine is a pure function over a catalogue plus an
//! answer set, and the session walks a catalogue one question at a time and
//! invokes the engine once every question is answered. No I/O happens
//! anywhere in this module tree; persistence of the resulting profile is the
//! caller's responsibility.

pub mod catalog;
pub mod scoring;
pub mod session;

pub use catalog::{
    questions_for, steps_for, validate_catalog, AnswerScale, AssessmentMode, AssessmentStep,
    ChakraTarget, Question,
};
pub use scoring::{score, score_with, AnswerSet, ScoringError};
pub use session::{AssessmentSession, SessionState, SubmitOutcome};
