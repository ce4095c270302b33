//! Session registry for the multi-user surface.
//!
//! Each session owns its own `WizardSession`; nothing is shared between
//! them. Every method clones what it returns so no `DashMap` guard outlives
//! the call, which keeps the registry safe to use around `.await` points.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use hollandbridge_types::answers::{AnswerRecord, AnswerUpdate, UpdateOutcome};
use hollandbridge_types::error::{SessionError, SubmissionError};
use hollandbridge_types::wizard::WizardStep;
use serde::Serialize;
use uuid::Uuid;

use super::session::{SubmissionStatus, WizardSession};
use super::state::{AnswerSnapshot, WizardState};
use crate::prompt::build_insights_prompt;
use crate::submission::InsightReport;

/// Read-only copy of a session, suitable for returning to a client.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub step: WizardStep,
    pub step_title: &'static str,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub answers: AnswerRecord,
    pub submission: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    fn of(id: Uuid, session: &WizardSession) -> Self {
        let wizard = session.wizard();
        Self {
            id,
            step: wizard.step(),
            step_title: wizard.step().title(),
            can_advance: wizard.can_advance(),
            can_retreat: wizard.can_retreat(),
            answers: wizard.answers().clone(),
            submission: session.status().clone(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// In-memory map of session id to wizard session.
///
/// Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<Uuid, WizardSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session on step 1 with empty answers.
    pub fn create(&self) -> SessionView {
        self.insert(WizardSession::default())
    }

    /// Start a session preloaded with saved answers.
    pub fn create_with_answers(&self, answers: AnswerRecord) -> SessionView {
        self.insert(WizardSession::new(WizardState::with_answers(answers)))
    }

    fn insert(&self, session: WizardSession) -> SessionView {
        let id = Uuid::now_v7();
        let view = SessionView::of(id, &session);
        self.sessions.insert(id, session);
        tracing::debug!(session_id = %id, "session created");
        view
    }

    pub fn view(&self, id: Uuid) -> Result<SessionView, SessionError> {
        self.with_session(id, |session| SessionView::of(id, session))
    }

    pub fn advance(&self, id: Uuid) -> Result<SessionView, SessionError> {
        self.with_session_mut(id, |session| {
            session.advance()?;
            Ok(SessionView::of(id, session))
        })
    }

    pub fn retreat(&self, id: Uuid) -> Result<SessionView, SessionError> {
        self.with_session_mut(id, |session| {
            session.retreat()?;
            Ok(SessionView::of(id, session))
        })
    }

    pub fn apply(&self, id: Uuid, update: AnswerUpdate) -> Result<UpdateOutcome, SessionError> {
        self.with_session_mut(id, |session| session.apply(update))
    }

    /// The payload the session's current answers would produce.
    pub fn prompt(&self, id: Uuid) -> Result<String, SessionError> {
        self.with_session(id, |session| build_insights_prompt(session.answers()))
    }

    pub fn report(&self, id: Uuid) -> Result<Option<InsightReport>, SessionError> {
        self.with_session(id, |session| session.report().cloned())
    }

    pub fn begin_submission(&self, id: Uuid) -> Result<AnswerSnapshot, SessionError> {
        self.with_session_mut(id, |session| session.begin_submission())
    }

    /// Record a finished call. A session deleted meanwhile is ignored.
    pub fn finish_submission(&self, id: Uuid, result: &Result<InsightReport, SubmissionError>) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.finish_submission(result);
        } else {
            tracing::debug!(session_id = %id, "session removed before submission finished");
        }
    }

    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| tracing::debug!(session_id = %id, "session removed"))
            .ok_or(SessionError::NotFound)
    }

    /// Drop sessions untouched for longer than `max_idle`. In-flight
    /// sessions are kept so their submission can still land.
    pub fn evict_idle(&self, max_idle: TimeDelta) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            session.status().is_in_flight() || now - session.updated_at() < max_idle
        });
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::debug!(evicted, "idle sessions evicted");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&WizardSession) -> T,
    ) -> Result<T, SessionError> {
        self.sessions
            .get(&id)
            .map(|entry| f(entry.value()))
            .ok_or(SessionError::NotFound)
    }

    fn with_session_mut<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut WizardSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut entry = self.sessions.get_mut(&id).ok_or(SessionError::NotFound)?;
        f(entry.value_mut())
    }
}
