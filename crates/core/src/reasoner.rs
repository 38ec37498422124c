//! Contract for the external semantic-reasoning collaborator.
//!
//! The engine talks to the ontology/rule reasoner exclusively through this
//! trait, over plain JSON attribute maps. No semantic-web library type may
//! cross this boundary, which keeps the core deterministic and lets tests
//! substitute an in-memory stub.

use serde::{Deserialize, Serialize};

/// Attribute map handed to the reasoner when registering data.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, thiserror::Error)]
pub enum ReasonerError {
    #[error("patient not registered with reasoner: {0}")]
    PatientNotRegistered(String),
    #[error("reasoner backend error: {0}")]
    Backend(String),
}

/// Opaque handle for a registered patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRegistration {
    pub patient_ref: String,
}

/// Handle for a registered clinical test panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRegistration {
    pub test_id: String,
}

/// Result of one reasoning pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningReport {
    /// Class names the patient was inferred to satisfy, in reasoner order.
    pub inferred_classes: Vec<String>,
    pub reasoning_time_ms: u64,
    pub is_consistent: bool,
}

/// External reasoning collaborator.
///
/// Every call is a single blocking request; the orchestrator commits
/// session mutations only after all calls for a step succeeded.
pub trait Reasoner: Send + Sync {
    /// Register (or re-register) a patient with its demographic attributes.
    fn register_patient(
        &self,
        patient_id: &str,
        attributes: &Attributes,
    ) -> Result<PatientRegistration, ReasonerError>;

    /// Attach a clinical test panel to a previously registered patient.
    fn register_clinical_test(
        &self,
        patient_id: &str,
        attributes: &Attributes,
    ) -> Result<TestRegistration, ReasonerError>;

    /// Run inference for the patient and report the derived classes.
    fn execute_reasoning(&self, patient_id: &str) -> Result<ReasoningReport, ReasonerError>;

    /// Drop all data held for the patient. Returns whether anything was
    /// removed; absence is not an error.
    fn purge_patient_data(&self, patient_id: &str) -> Result<bool, ReasonerError>;
}
