//! Diagnosis resolution.
//!
//! Two computation paths exist and both are exposed:
//!
//! * **Class-driven** ([`resolve_from_classes`]): a priority lookup over
//!   the reasoner's inferred classes, with confidence counted from the
//!   biomarker classes. Used when a caller treats the ontology result as
//!   primary.
//! * **Cutoff-driven** ([`resolve_from_cutoffs`]): derived from the local
//!   ATN statuses. Step 3 of the orchestrator uses this path as primary
//!   and keeps the inferred classes as corroborating evidence only.
//!
//! [`resolve_diagnosis`] composes the two: classes first, cutoffs as the
//! fallback when no known diagnosis class is present.

use crate::catalog;
use crate::cutoffs;
use adss_types::{AtnStatus, ConfidenceLevel};

/// Diagnosis label for the cutoff fallback when AD criteria are not met.
pub const SUSPECTED_IMPAIRMENT: &str = "Suspected Cognitive Impairment";

/// Diagnosis label when the full A+T+N+ profile is present.
pub const AD_DEMENTIA: &str = "Alzheimer's Disease Dementia";

/// True when the label denotes an Alzheimer's diagnosis.
pub fn is_ad_diagnosis(diagnosis: &str) -> bool {
    diagnosis.contains("Alzheimer")
}

/// Priority lookup over inferred classes. `None` when no known diagnosis
/// class is present.
pub fn resolve_from_classes(inferred_classes: &[String]) -> Option<(String, ConfidenceLevel)> {
    if inferred_classes.is_empty() {
        return None;
    }
    for (class, label) in catalog::DIAGNOSIS_CLASSES {
        if inferred_classes.iter().any(|c| c == class) {
            return Some(((*label).to_string(), confidence_from_classes(inferred_classes)));
        }
    }
    None
}

/// Confidence derived from how many biomarker classes the reasoner found.
pub fn confidence_from_classes(inferred_classes: &[String]) -> ConfidenceLevel {
    let score = catalog::BIOMARKER_CLASSES
        .iter()
        .filter(|class| inferred_classes.iter().any(|c| c == *class))
        .count();
    match score {
        s if s >= 2 => ConfidenceLevel::High,
        1 => ConfidenceLevel::Medium,
        _ => ConfidenceLevel::Low,
    }
}

/// Cutoff-driven resolution from the local ATN statuses.
pub fn resolve_from_cutoffs(
    amyloid: AtnStatus,
    tau: AtnStatus,
    neurodegen: AtnStatus,
) -> (String, ConfidenceLevel) {
    if cutoffs::meets_ad_criteria(amyloid, tau, neurodegen) {
        (AD_DEMENTIA.to_string(), ConfidenceLevel::High)
    } else {
        (SUSPECTED_IMPAIRMENT.to_string(), ConfidenceLevel::Medium)
    }
}

/// Composed resolution: class-driven first, cutoff fallback otherwise.
pub fn resolve_diagnosis(
    inferred_classes: &[String],
    amyloid: AtnStatus,
    tau: AtnStatus,
    neurodegen: AtnStatus,
) -> (String, ConfidenceLevel) {
    resolve_from_classes(inferred_classes)
        .unwrap_or_else(|| resolve_from_cutoffs(amyloid, tau, neurodegen))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn class_lookup_follows_priority_order() {
        let inferred = classes(&["SubjectiveCognitiveDecline", "PersonWithMCI"]);
        let (diagnosis, _) = resolve_from_classes(&inferred).unwrap();
        assert_eq!(diagnosis, "Mild Cognitive Impairment due to Alzheimer's");
    }

    #[test]
    fn confidence_counts_biomarker_classes() {
        assert_eq!(
            confidence_from_classes(&classes(&["AmyloidPositive", "TauPositive"])),
            ConfidenceLevel::High
        );
        assert_eq!(
            confidence_from_classes(&classes(&["NeurodegenerationPositive"])),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            confidence_from_classes(&classes(&["PersonWithMCI"])),
            ConfidenceLevel::Low
        );
    }

    #[test]
    fn cutoff_path_yields_ad_with_high_confidence() {
        let (diagnosis, confidence) = resolve_from_cutoffs(
            AtnStatus::Positive,
            AtnStatus::Positive,
            AtnStatus::Positive,
        );
        assert_eq!(diagnosis, AD_DEMENTIA);
        assert_eq!(confidence, ConfidenceLevel::High);
    }

    #[test]
    fn cutoff_path_falls_back_to_suspected_impairment() {
        let (diagnosis, confidence) = resolve_from_cutoffs(
            AtnStatus::Positive,
            AtnStatus::Unknown,
            AtnStatus::Negative,
        );
        assert_eq!(diagnosis, SUSPECTED_IMPAIRMENT);
        assert_eq!(confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn unknown_classes_fall_through_to_cutoffs() {
        let (diagnosis, _) = resolve_diagnosis(
            &classes(&["Person", "Thing"]),
            AtnStatus::Positive,
            AtnStatus::Positive,
            AtnStatus::Positive,
        );
        assert_eq!(diagnosis, AD_DEMENTIA);
    }

    #[test]
    fn ad_label_detection() {
        assert!(is_ad_diagnosis(AD_DEMENTIA));
        assert!(is_ad_diagnosis("Preclinical Alzheimer's Disease"));
        assert!(!is_ad_diagnosis(SUSPECTED_IMPAIRMENT));
    }
}
