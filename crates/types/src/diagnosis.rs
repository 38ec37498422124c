//! Final diagnosis output and its supporting evidence records.

use crate::{AtnStatus, ConfidenceLevel, DiseaseStage, Step1Data, Step2Data};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Audit record for a semantic rule that fired during reasoning.
///
/// Traceability only; triggers never feed back into the diagnosis decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleTrigger {
    pub rule_name: String,
    pub description: String,
    pub parameters: BTreeMap<String, String>,
    pub triggered_at: DateTime<Utc>,
}

/// Raw biomarker inputs that fed the ATN classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BiomarkerValues {
    pub abeta4240_ratio: Option<f64>,
    #[serde(rename = "pTauAbeta42Ratio")]
    pub p_tau_abeta42_ratio: Option<f64>,
    pub hippocampal_volume: Option<f64>,
    pub mta_score: Option<i32>,
}

/// Per-axis classification outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtnClassification {
    pub amyloid_status: AtnStatus,
    pub tau_status: AtnStatus,
    pub neurodegen_status: AtnStatus,
    pub atn_profile: String,
}

/// Human-readable summary of the cutoff values the engine applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CutoffSummary {
    pub mmse_ranges: BTreeMap<String, String>,
    pub biomarker_cutoffs: BTreeMap<String, String>,
    pub atn_framework: String,
}

/// Inputs and provenance backing a [`DiagnosisResult`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_data: Option<Step1Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_results: Option<Step2Data>,
    pub biomarker_values: BiomarkerValues,
    pub atn_classification: AtnClassification,
    pub diagnostic_cutoffs: CutoffSummary,
}

/// One fluid-biomarker reading with its classified status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BiomarkerReading {
    pub value: Option<f64>,
    pub status: AtnStatus,
}

/// Neurodegeneration reading: volumetry plus the MTA rating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NeurodegenerationReading {
    pub volume: Option<f64>,
    pub status: AtnStatus,
    pub mta_score: Option<i32>,
}

/// Structured biomarker section of the final report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BiomarkerResults {
    pub amyloid: BiomarkerReading,
    pub tau: BiomarkerReading,
    pub neurodegeneration: NeurodegenerationReading,
    pub atn_classification: String,
    pub mmse_score: Option<i32>,
    pub interpretation: String,
}

/// Complete diagnosis produced by step 3.
///
/// Once stored on a completed session this value is immutable; repeated
/// reads return it unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub patient_id: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub diagnosis: String,
    pub confidence_level: ConfidenceLevel,
    pub disease_stage: DiseaseStage,
    pub atn_profile: String,
    pub inferred_classes: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub recommended_activities: Vec<String>,
    pub required_tests: Vec<String>,
    pub triggered_rules: Vec<RuleTrigger>,
    pub evidence: Evidence,
    pub biomarker_results: BiomarkerResults,
    pub follow_up_schedule: String,
    pub referral_recommendation: String,
    pub reasoning_time_ms: u64,
    pub is_consistent: bool,
    pub ontology_version: String,
}

/// Outcome of clearing a session. `cleared: false` is not an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearOutcome {
    pub session_id: String,
    pub cleared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_outcome_omits_missing_patient() {
        let outcome = ClearOutcome {
            session_id: "sess_deadbeef".into(),
            cleared: false,
            patient_id: None,
            message: "Session not found".into(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"cleared\":false"));
        assert!(!json.contains("patientId"));
    }

    #[test]
    fn rule_trigger_parameters_serialize_deterministically() {
        let mut parameters = BTreeMap::new();
        parameters.insert("tau".to_string(), "positive".to_string());
        parameters.insert("amyloid".to_string(), "positive".to_string());
        let trigger = RuleTrigger {
            rule_name: "PersonWithADDementia_Rule".into(),
            description: "desc".into(),
            parameters,
            triggered_at: Utc::now(),
        };
        let json = serde_json::to_string(&trigger).unwrap();
        // BTreeMap keys come out sorted.
        assert!(json.find("amyloid").unwrap() < json.find("tau").unwrap());
    }
}
