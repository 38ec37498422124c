//! Recommendation tables: actions, activities, required tests, follow-up
//! schedule and rule-trigger audit records.

use crate::catalog;
use crate::resolver::is_ad_diagnosis;
use adss_types::{DiseaseStage, RuleTrigger};
use chrono::Utc;
use std::collections::BTreeMap;

pub const REFERRAL_RECOMMENDATION: &str = "Neurologist consultation recommended";

/// Medical actions for the given diagnosis and stage.
///
/// A neurologist referral is always first; AD diagnoses and the severe and
/// moderate stages add their own items.
pub fn recommended_actions(diagnosis: &str, stage: DiseaseStage) -> Vec<String> {
    let mut actions = vec!["Neurologist referral".to_string()];

    if is_ad_diagnosis(diagnosis) {
        actions.push("Pharmacological treatment discussion".into());
        actions.push("Caregiver support and education".into());
    }

    match stage {
        DiseaseStage::Severe => {
            actions.push("Advanced care planning".into());
            actions.push("Safety assessment for home environment".into());
            actions.push("Palliative care consultation".into());
        }
        DiseaseStage::Moderate => {
            actions.push("Cognitive rehabilitation therapy".into());
            actions.push("Behavioral management strategies".into());
        }
        DiseaseStage::Mild | DiseaseStage::Unknown => {}
    }

    actions
}

/// Stage-appropriate activity plan. Used as a fallback only; an explicit
/// caller-supplied plan takes precedence.
pub fn recommended_activities(stage: DiseaseStage) -> Vec<String> {
    let items: &[&str] = match stage {
        DiseaseStage::Mild => &[
            "Cognitive training exercises",
            "Regular physical activity",
            "Social engagement activities",
            "Music therapy",
            "Art therapy",
        ],
        DiseaseStage::Moderate => &[
            "Reminiscence therapy",
            "Simplified daily tasks",
            "Structured routines",
            "Sensory stimulation",
            "Adapted physical activities",
        ],
        DiseaseStage::Severe => &[
            "Basic ADL assistance",
            "Comfort care activities",
            "Gentle sensory activities",
            "Familiar music listening",
            "Touch therapy",
        ],
        DiseaseStage::Unknown => &[
            "Regular cognitive assessment",
            "Healthy lifestyle maintenance",
            "Social activities",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Follow-up test battery.
///
/// Biomarker confirmation tests are added only for AD-related diagnoses
/// whose profile has not already confirmed the axis, and only when the
/// caller requested biomarker testing.
pub fn required_tests(
    diagnosis: &str,
    atn_profile: &str,
    needs_biomarkers_test: bool,
    needs_structural_imaging: bool,
) -> Vec<String> {
    let mut tests = vec!["Annual cognitive assessment".to_string()];

    if is_ad_diagnosis(diagnosis) && needs_biomarkers_test {
        if !atn_profile.contains("A+") {
            tests.push("Amyloid PET or CSF biomarkers".into());
        }
        if !atn_profile.contains("T+") {
            tests.push("Tau PET or CSF p-tau".into());
        }
    }

    tests.push("Basic metabolic panel".into());
    tests.push("Thyroid function tests".into());
    tests.push("Vitamin B12 and folate levels".into());

    if needs_structural_imaging {
        tests.push("Brain MRI with hippocampal volumetry".into());
    }

    tests
}

/// Follow-up schedule: the explicit 6-month flag wins, otherwise keyed by
/// stage.
pub fn follow_up_schedule(needs_follow_up_6_months: bool, stage: DiseaseStage) -> String {
    if needs_follow_up_6_months {
        return "6-month follow-up recommended".into();
    }
    match stage {
        DiseaseStage::Severe => "3-month follow-up".into(),
        DiseaseStage::Moderate => "6-month follow-up".into(),
        DiseaseStage::Mild => "12-month follow-up".into(),
        DiseaseStage::Unknown => "Annual follow-up".into(),
    }
}

/// Audit records for every cataloged class present in the reasoning result.
pub fn rule_triggers(inferred_classes: &[String]) -> Vec<RuleTrigger> {
    let now = Utc::now();
    catalog::RULE_CATALOG
        .iter()
        .filter(|spec| inferred_classes.iter().any(|c| c == spec.class))
        .map(|spec| RuleTrigger {
            rule_name: spec.rule_name.to_string(),
            description: spec.description.to_string(),
            parameters: spec
                .parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            triggered_at: now,
        })
        .collect()
}

/// Interpretation string for the biomarker section of the report.
pub fn biomarker_interpretation(
    amyloid: adss_types::AtnStatus,
    tau: adss_types::AtnStatus,
    neurodegen: adss_types::AtnStatus,
) -> String {
    use adss_types::AtnStatus::{Negative, Positive};
    match (amyloid, tau, neurodegen) {
        (Positive, Positive, Positive) => "Typical Alzheimer's Disease biomarker profile".into(),
        (Positive, Negative, _) => "Alzheimer's pathologic change".into(),
        (Negative, _, Positive) => "Suspected non-AD pathology".into(),
        _ => "Atypical biomarker profile - further investigation needed".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adss_types::AtnStatus;

    #[test]
    fn actions_always_start_with_referral() {
        let actions = recommended_actions("Suspected Cognitive Impairment", DiseaseStage::Unknown);
        assert_eq!(actions, vec!["Neurologist referral"]);
    }

    #[test]
    fn severe_ad_gets_full_action_list() {
        let actions = recommended_actions("Alzheimer's Disease Dementia", DiseaseStage::Severe);
        assert!(actions.contains(&"Pharmacological treatment discussion".to_string()));
        assert!(actions.contains(&"Palliative care consultation".to_string()));
        assert_eq!(actions.len(), 6);
    }

    #[test]
    fn moderate_stage_adds_rehabilitation_items() {
        let actions = recommended_actions("Non-AD Dementia", DiseaseStage::Moderate);
        assert!(actions.contains(&"Cognitive rehabilitation therapy".to_string()));
        assert!(!actions.contains(&"Caregiver support and education".to_string()));
    }

    #[test]
    fn activities_table_covers_every_stage() {
        assert_eq!(recommended_activities(DiseaseStage::Mild).len(), 5);
        assert_eq!(recommended_activities(DiseaseStage::Severe).len(), 5);
        assert_eq!(recommended_activities(DiseaseStage::Unknown).len(), 3);
    }

    #[test]
    fn confirmed_axes_suppress_biomarker_tests() {
        let tests = required_tests("Alzheimer's Disease Dementia", "A+T-N+", true, false);
        assert!(!tests.contains(&"Amyloid PET or CSF biomarkers".to_string()));
        assert!(tests.contains(&"Tau PET or CSF p-tau".to_string()));
    }

    #[test]
    fn biomarker_tests_require_the_request_flag() {
        let tests = required_tests("Alzheimer's Disease Dementia", "A-T-N-", false, false);
        assert!(!tests.contains(&"Amyloid PET or CSF biomarkers".to_string()));
        assert!(!tests.contains(&"Tau PET or CSF p-tau".to_string()));
    }

    #[test]
    fn structural_imaging_adds_volumetry() {
        let tests = required_tests("Suspected Cognitive Impairment", "A-T-N-", false, true);
        assert!(tests.contains(&"Brain MRI with hippocampal volumetry".to_string()));
    }

    #[test]
    fn explicit_follow_up_flag_wins() {
        assert_eq!(
            follow_up_schedule(true, DiseaseStage::Severe),
            "6-month follow-up recommended"
        );
        assert_eq!(follow_up_schedule(false, DiseaseStage::Severe), "3-month follow-up");
        assert_eq!(follow_up_schedule(false, DiseaseStage::Unknown), "Annual follow-up");
    }

    #[test]
    fn triggers_emit_only_for_present_classes() {
        let inferred = vec![
            "PersonWithADDementia".to_string(),
            "AmyloidPositive".to_string(),
        ];
        let triggers = rule_triggers(&inferred);
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].rule_name, "PersonWithADDementia_Rule");
        assert_eq!(triggers[1].parameters["marker"], "abeta4240Ratio");
    }

    #[test]
    fn interpretation_covers_documented_profiles() {
        assert_eq!(
            biomarker_interpretation(AtnStatus::Positive, AtnStatus::Positive, AtnStatus::Positive),
            "Typical Alzheimer's Disease biomarker profile"
        );
        assert_eq!(
            biomarker_interpretation(AtnStatus::Positive, AtnStatus::Negative, AtnStatus::Negative),
            "Alzheimer's pathologic change"
        );
        assert_eq!(
            biomarker_interpretation(AtnStatus::Negative, AtnStatus::Negative, AtnStatus::Positive),
            "Suspected non-AD pathology"
        );
        assert_eq!(
            biomarker_interpretation(AtnStatus::Unknown, AtnStatus::Unknown, AtnStatus::Unknown),
            "Atypical biomarker profile - further investigation needed"
        );
    }
}
