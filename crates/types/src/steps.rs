//! Step payloads for the 3-step assessment workflow.
//!
//! These are the wire models accepted by the REST surface and accumulated
//! verbatim inside a session as evidence. Field-level validation (score
//! ranges, required combinations) happens at the transport boundary, not
//! here.

use crate::ImagingType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Step 1: demographics, family history and screening scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Step1Data {
    pub patient_id: String,
    /// Patient age in years (0-120).
    pub age: i32,
    pub has_family_history: bool,
    /// "AD", "Non-AD Dementia" or "Unknown" when family history is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_member_diagnosis: Option<String>,
    pub has_subjective_complaints: bool,
    pub has_behavior_changes: bool,
    /// Mini-Mental State Examination score (0-30).
    pub mmse_score: i32,
    /// Montreal Cognitive Assessment score (0-30).
    pub moca_score: i32,
    #[serde(rename = "isIndependentADL")]
    pub is_independent_adl: bool,
    #[serde(rename = "isIndependentIADL")]
    pub is_independent_iadl: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
}

/// Step 2: clinical test scores and the biomarker panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Step2Data {
    pub patient_id: String,
    pub mmse_score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moca_score: Option<i32>,
    /// Functional Activities Questionnaire score (0-30).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_score: Option<i32>,
    /// AD8 Dementia Screening score (0-8).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad8_score: Option<i32>,
    /// Medial Temporal Atrophy score (0-4).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mta_score: Option<i32>,
    pub brain_imaging_type: ImagingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abeta42_score: Option<f64>,
    #[serde(rename = "pTau181Score", skip_serializing_if = "Option::is_none")]
    pub p_tau181_score: Option<f64>,
    #[serde(rename = "tTau", skip_serializing_if = "Option::is_none")]
    pub t_tau: Option<f64>,
    /// Amyloid-beta 42/40 ratio (lower = abnormal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abeta4240_ratio: Option<f64>,
    /// Phosphorylated Tau / Abeta42 ratio (higher = abnormal).
    #[serde(rename = "pTauAbeta42Ratio", skip_serializing_if = "Option::is_none")]
    pub p_tau_abeta42_ratio: Option<f64>,
    /// Adjusted hippocampal volume (lower = atrophy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hippocampal_volume: Option<f64>,
    pub has_rule_out_diseases: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_vitamin_b12_deficiency: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_hypothyroidism: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_uncontrolled_diabetes: Option<bool>,
}

/// Step 3: final diagnosis inputs and recommendation flags.
///
/// The biomarker fields are optional: a missing measurement classifies as
/// `Unknown` on its ATN axis, never as zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Step3Data {
    pub patient_id: String,
    /// Session id from step 1; resolved by patient id when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abeta4240_ratio: Option<f64>,
    #[serde(rename = "pTauAbeta42Ratio", skip_serializing_if = "Option::is_none")]
    pub p_tau_abeta42_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hippocampal_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mta_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mri_findings: Option<String>,
    /// APOE genotype, e.g. "e3e4".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apoe_genotype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mmse_score: Option<i32>,
    pub needs_biomarkers_test: bool,
    pub needs_structural_imaging: bool,
    #[serde(rename = "needsFollowUp6Months")]
    pub needs_follow_up_6_months: bool,
    /// Explicit activity plan; overrides the generated list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_activities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
}

/// Convenience payload running all three steps in one request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompleteDiagnosisData {
    pub step1: Step1Data,
    pub step2: Step2Data,
    pub step3: Step3Data,
}

/// Response returned after steps 1 and 2.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub session_id: String,
    pub patient_id: String,
    /// "STEP1" or "STEP2".
    pub step: String,
    pub success: bool,
    pub message: String,
    /// Step-specific intermediate outputs (patient ref, preliminary
    /// inferences, ...). Kept schemaless on the wire.
    #[schema(value_type = Object)]
    pub intermediate_results: serde_json::Value,
    pub next_step_endpoint: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step3_json() -> &'static str {
        r#"{
            "patientId": "PT001",
            "abeta4240Ratio": 0.008,
            "pTauAbeta42Ratio": 0.12,
            "hippocampalVolume": 2400.5,
            "mtaScore": 2,
            "mmseScore": 18,
            "needsBiomarkersTest": false,
            "needsStructuralImaging": false,
            "needsFollowUp6Months": true
        }"#
    }

    #[test]
    fn step3_parses_camel_case_wire_names() {
        let data: Step3Data = serde_json::from_str(step3_json()).unwrap();
        assert_eq!(data.patient_id, "PT001");
        assert_eq!(data.p_tau_abeta42_ratio, Some(0.12));
        assert!(data.needs_follow_up_6_months);
        assert!(data.session_id.is_none());
        assert!(data.recommended_activities.is_none());
    }

    #[test]
    fn step3_biomarkers_may_be_absent() {
        let data: Step3Data = serde_json::from_str(
            r#"{
                "patientId": "PT002",
                "needsBiomarkersTest": true,
                "needsStructuralImaging": true,
                "needsFollowUp6Months": false
            }"#,
        )
        .unwrap();
        assert!(data.abeta4240_ratio.is_none());
        assert!(data.hippocampal_volume.is_none());
    }

    #[test]
    fn step1_adl_fields_use_explicit_wire_names() {
        let data = Step1Data {
            patient_id: "PT001".into(),
            age: 72,
            has_family_history: true,
            family_member_diagnosis: Some("AD".into()),
            has_subjective_complaints: true,
            has_behavior_changes: false,
            mmse_score: 22,
            moca_score: 20,
            is_independent_adl: true,
            is_independent_iadl: false,
            clinical_notes: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"isIndependentADL\":true"));
        assert!(json.contains("\"isIndependentIADL\":false"));
        assert!(!json.contains("clinicalNotes"));
    }
}
