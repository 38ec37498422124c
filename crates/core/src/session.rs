//! In-memory session lifecycle store.
//!
//! Sessions live in a sharded concurrent map keyed by session id, with a
//! secondary patient-id index. Operations on distinct keys never block
//! each other. Mutation uses snapshot-plus-version: callers take a cloned
//! snapshot, modify it, and commit; a commit whose version no longer
//! matches the stored session is rejected, so concurrent writers surface
//! as an explicit error instead of a silently lost update.

use crate::reasoner::ReasoningReport;
use crate::{CoreResult, DiagnosisError};
use adss_types::{DiagnosisResult, Step1Data, Step2Data, Step3Data};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Per-assessment-run state spanning steps 1-3 for one patient.
///
/// `result` is set only once `completed` is true; a completed session is
/// never recomputed.
#[derive(Clone, Debug)]
pub struct Session {
    pub session_id: String,
    pub patient_id: String,
    /// Incremented on every successful commit.
    pub version: u64,
    pub step1_data: Option<Step1Data>,
    pub step2_data: Option<Step2Data>,
    pub step3_data: Option<Step3Data>,
    /// Opaque handle returned by the reasoning collaborator.
    pub ontology_patient_ref: Option<String>,
    /// Snapshot of the most recent reasoning pass.
    pub last_reasoning: Option<ReasoningReport>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub result: Option<DiagnosisResult>,
}

impl Session {
    fn new(session_id: String, patient_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            patient_id,
            version: 1,
            step1_data: None,
            step2_data: None,
            step3_data: None,
            ontology_patient_ref: None,
            last_reasoning: None,
            completed: false,
            created_at: now,
            updated_at: now,
            result: None,
        }
    }
}

/// Concurrency-safe associative store for in-flight and completed sessions.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    by_patient: DashMap<String, String>,
    session_prefix: String,
}

impl SessionStore {
    pub fn new(session_prefix: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            by_patient: DashMap::new(),
            session_prefix: session_prefix.into(),
        }
    }

    fn mint_id(&self) -> String {
        let uuid = Uuid::new_v4().simple().to_string();
        format!("{}{}", self.session_prefix, &uuid[..8])
    }

    /// Mint a fresh session for the patient and index it by both keys.
    ///
    /// Deliberately does not check for an existing session for the same
    /// patient; a newer session simply takes over the patient index, and
    /// the older one stays reachable by id only.
    pub fn create(&self, patient_id: &str) -> Session {
        self.create_with_id(&self.mint_id(), patient_id)
    }

    /// Create a session under a caller-supplied id (step 3 recovery path).
    pub fn create_with_id(&self, session_id: &str, patient_id: &str) -> Session {
        let session = Session::new(session_id.to_string(), patient_id.to_string());
        self.sessions
            .insert(session_id.to_string(), session.clone());
        self.by_patient
            .insert(patient_id.to_string(), session_id.to_string());
        session
    }

    /// Snapshot of the session, if present.
    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    /// Session id currently indexed for the patient, if any.
    pub fn session_id_for_patient(&self, patient_id: &str) -> Option<String> {
        self.by_patient.get(patient_id).map(|id| id.clone())
    }

    /// Commit a mutated snapshot.
    ///
    /// Succeeds only when the stored version still matches the snapshot's;
    /// the stored session then advances to `version + 1`. Returns the
    /// committed state.
    pub fn commit(&self, mut session: Session) -> CoreResult<Session> {
        let mut stored = self
            .sessions
            .get_mut(&session.session_id)
            .ok_or_else(|| DiagnosisError::SessionNotFound(session.session_id.clone()))?;
        if stored.version != session.version {
            return Err(DiagnosisError::ConcurrentUpdate(session.session_id.clone()));
        }
        session.version += 1;
        session.updated_at = Utc::now();
        *stored = session.clone();
        Ok(session)
    }

    /// Remove the session and its patient index entry.
    ///
    /// The index entry is dropped only when it still points at this
    /// session, so removing a superseded session does not orphan the
    /// patient's newer one.
    pub fn remove(&self, session_id: &str) -> Option<Session> {
        let (_, session) = self.sessions.remove(session_id)?;
        self.by_patient
            .remove_if(&session.patient_id, |_, indexed| indexed == session_id);
        Some(session)
    }
}
