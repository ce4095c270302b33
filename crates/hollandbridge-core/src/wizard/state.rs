//! WizardState: the step cursor plus the answer record for one session.
//!
//! Every operation here is total. Navigation clamps at both ends, and
//! selection updates past a cap are refused without an error. The only way
//! answers leave this struct is through [`WizardState::snapshot`], which
//! hands out an immutable copy.

use std::ops::Deref;
use std::sync::Arc;

use hollandbridge_types::answers::{AnswerRecord, AnswerUpdate, UpdateOutcome};
use hollandbridge_types::wizard::WizardStep;

/// Step cursor and mutable answers for a single user.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: WizardStep,
    answers: AnswerRecord,
}

impl WizardState {
    /// Start on step 1 with every answer unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on step 1 with previously saved answers.
    pub fn with_answers(answers: AnswerRecord) -> Self {
        Self {
            step: WizardStep::FIRST,
            answers,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Read-only view of the live answers.
    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    /// Whether "Next" is available.
    pub fn can_advance(&self) -> bool {
        !self.step.is_last()
    }

    /// Whether "Back" is available.
    pub fn can_retreat(&self) -> bool {
        !self.step.is_first()
    }

    /// Move forward one step; a no-op on the last step.
    pub fn advance(&mut self) -> WizardStep {
        self.step = self.step.next();
        self.step
    }

    /// Move back one step; a no-op on the first step.
    pub fn retreat(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    /// Write one field of the answer record.
    pub fn set_field(&mut self, update: AnswerUpdate) -> UpdateOutcome {
        let outcome = self.answers.apply(update);
        if outcome == UpdateOutcome::CapReached {
            tracing::debug!(step = self.step.number(), "selection refused: cap reached");
        }
        outcome
    }

    /// Immutable copy of the current answers.
    ///
    /// Later calls to [`set_field`](Self::set_field) never show through a
    /// snapshot that was already taken.
    pub fn snapshot(&self) -> AnswerSnapshot {
        AnswerSnapshot(Arc::new(self.answers.clone()))
    }
}

/// A frozen copy of an [`AnswerRecord`].
///
/// Cheap to clone and safe to move into an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSnapshot(Arc<AnswerRecord>);

impl Deref for AnswerSnapshot {
    type Target = AnswerRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<AnswerRecord> for AnswerSnapshot {
    fn from(record: AnswerRecord) -> Self {
        Self(Arc::new(record))
    }
}
