//! A wizard plus the state of its submission attempts.

use chrono::{DateTime, Utc};
use hollandbridge_types::answers::{AnswerRecord, AnswerUpdate, UpdateOutcome};
use hollandbridge_types::error::{SessionError, SubmissionError};
use hollandbridge_types::wizard::WizardStep;
use serde::Serialize;

use super::state::{AnswerSnapshot, WizardState};
use crate::submission::InsightReport;

/// Where the latest submission attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// A generation call is pending. Answers and step are frozen.
    InFlight,
    Completed { report: InsightReport },
    /// The last attempt failed. The user may resubmit.
    Failed { message: String },
}

impl SubmissionStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionStatus::InFlight)
    }
}

/// One user's wizard and submission status.
#[derive(Debug, Clone)]
pub struct WizardSession {
    wizard: WizardState,
    status: SubmissionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(WizardState::new())
    }
}

impl WizardSession {
    pub fn new(wizard: WizardState) -> Self {
        let now = Utc::now();
        Self {
            wizard,
            status: SubmissionStatus::Idle,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn answers(&self) -> &AnswerRecord {
        self.wizard.answers()
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The last successful report, if any.
    pub fn report(&self) -> Option<&InsightReport> {
        match &self.status {
            SubmissionStatus::Completed { report } => Some(report),
            _ => None,
        }
    }

    pub fn advance(&mut self) -> Result<WizardStep, SessionError> {
        self.ensure_idle()?;
        self.touch();
        Ok(self.wizard.advance())
    }

    pub fn retreat(&mut self) -> Result<WizardStep, SessionError> {
        self.ensure_idle()?;
        self.touch();
        Ok(self.wizard.retreat())
    }

    pub fn apply(&mut self, update: AnswerUpdate) -> Result<UpdateOutcome, SessionError> {
        self.ensure_idle()?;
        let outcome = self.wizard.set_field(update);
        if outcome == UpdateOutcome::Applied {
            self.touch();
        }
        Ok(outcome)
    }

    /// Freeze the answers for a generation call and mark the session busy.
    ///
    /// Only valid on the last step with nothing already in flight.
    pub fn begin_submission(&mut self) -> Result<AnswerSnapshot, SessionError> {
        self.ensure_idle()?;
        if !self.wizard.step().is_last() {
            return Err(SessionError::NotOnFinalStep);
        }
        self.status = SubmissionStatus::InFlight;
        self.touch();
        Ok(self.wizard.snapshot())
    }

    /// Record the result of the call started by [`begin_submission`](Self::begin_submission).
    ///
    /// Answers are left exactly as they are on both paths.
    pub fn finish_submission(&mut self, result: &Result<InsightReport, SubmissionError>) {
        if !self.status.is_in_flight() {
            tracing::warn!("submission finished without one in flight");
        }
        self.status = match result {
            Ok(report) => SubmissionStatus::Completed {
                report: report.clone(),
            },
            Err(e) => SubmissionStatus::Failed {
                message: e.to_string(),
            },
        };
        self.touch();
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.status.is_in_flight() {
            Err(SessionError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
