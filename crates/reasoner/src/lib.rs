//! # ADSS Reasoner
//!
//! Deterministic in-memory implementation of the semantic-reasoning
//! collaborator. It keeps the registered attribute maps per patient and
//! derives inferred classes from the same clinical rule base the ontology
//! encodes, so the workflow can run without an external description-logic
//! engine. The core never sees any of this crate's internals; it only
//! consumes the [`Reasoner`] trait.

mod rules;

use adss_core::{
    Attributes, PatientRegistration, Reasoner, ReasonerError, ReasoningReport, TestRegistration,
};
use chrono::Utc;
use dashmap::DashMap;
use std::time::Instant;

#[derive(Clone, Debug, Default)]
struct PatientRecord {
    patient_ref: String,
    attributes: Attributes,
    tests: Vec<Attributes>,
}

impl PatientRecord {
    /// Merged attribute view: demographics first, then each test panel in
    /// registration order, later values overriding earlier ones.
    fn merged_attributes(&self) -> Attributes {
        let mut merged = self.attributes.clone();
        for test in &self.tests {
            for (key, value) in test {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// In-memory reasoner keyed by patient id.
#[derive(Default)]
pub struct MemoryReasoner {
    patients: DashMap<String, PatientRecord>,
}

impl MemoryReasoner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reasoner for MemoryReasoner {
    fn register_patient(
        &self,
        patient_id: &str,
        attributes: &Attributes,
    ) -> Result<PatientRegistration, ReasonerError> {
        let mut record = self.patients.entry(patient_id.to_string()).or_default();
        if record.patient_ref.is_empty() {
            record.patient_ref =
                format!("patient_{patient_id}_{}", Utc::now().timestamp_millis());
        }
        for (key, value) in attributes {
            record.attributes.insert(key.clone(), value.clone());
        }
        tracing::info!(patient = %patient_id, patient_ref = %record.patient_ref, "patient registered");
        Ok(PatientRegistration {
            patient_ref: record.patient_ref.clone(),
        })
    }

    fn register_clinical_test(
        &self,
        patient_id: &str,
        attributes: &Attributes,
    ) -> Result<TestRegistration, ReasonerError> {
        let mut record = self
            .patients
            .get_mut(patient_id)
            .ok_or_else(|| ReasonerError::PatientNotRegistered(patient_id.to_string()))?;
        record.tests.push(attributes.clone());
        let test_id = format!(
            "test_{patient_id}_{}",
            Utc::now().timestamp_millis()
        );
        tracing::info!(patient = %patient_id, test = %test_id, "clinical test registered");
        Ok(TestRegistration { test_id })
    }

    fn execute_reasoning(&self, patient_id: &str) -> Result<ReasoningReport, ReasonerError> {
        let record = self
            .patients
            .get(patient_id)
            .ok_or_else(|| ReasonerError::PatientNotRegistered(patient_id.to_string()))?;
        let started = Instant::now();

        let inferred_classes = rules::infer_classes(&record.merged_attributes());
        let reasoning_time_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            patient = %patient_id,
            inferred = inferred_classes.len(),
            elapsed_ms = reasoning_time_ms,
            "reasoning completed"
        );
        Ok(ReasoningReport {
            inferred_classes,
            reasoning_time_ms,
            is_consistent: true,
        })
    }

    fn purge_patient_data(&self, patient_id: &str) -> Result<bool, ReasonerError> {
        let removed = self.patients.remove(patient_id).is_some();
        if removed {
            tracing::info!(patient = %patient_id, "patient data purged");
        }
        Ok(removed)
    }
}
