//! Static catalog mapping semantic classes to engine outputs.
//!
//! The reasoner reports plain class names. Everything the engine derives
//! from them (diagnosis labels, stage overrides, rule-trigger metadata) is
//! driven by the tables below rather than inline branching, so the class
//! vocabulary can evolve in one place.

use adss_types::DiseaseStage;

/// Diagnosis labels keyed by inferred class, in priority order.
/// The first class present in a reasoning result decides the label.
pub const DIAGNOSIS_CLASSES: &[(&str, &str)] = &[
    ("PersonWithADDementia", "Alzheimer's Disease Dementia"),
    ("PersonWithMCI", "Mild Cognitive Impairment due to Alzheimer's"),
    ("AsymptomaticAD", "Preclinical Alzheimer's Disease"),
    ("PersonWithNonADDementia", "Non-AD Dementia"),
    ("SubjectiveCognitiveDecline", "Subjective Cognitive Decline"),
];

/// Mutually exclusive stage classes, in override priority order.
pub const STAGE_CLASSES: &[(&str, DiseaseStage)] = &[
    ("SevereStage", DiseaseStage::Severe),
    ("ModerateStage", DiseaseStage::Moderate),
    ("MildStage", DiseaseStage::Mild),
];

/// Biomarker classes counted towards class-derived confidence.
pub const BIOMARKER_CLASSES: &[&str] = &[
    "AmyloidPositive",
    "TauPositive",
    "NeurodegenerationPositive",
];

/// Metadata emitted as a [`adss_types::RuleTrigger`] when the class fires.
pub struct RuleSpec {
    pub class: &'static str,
    pub rule_name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [(&'static str, &'static str)],
}

pub const RULE_CATALOG: &[RuleSpec] = &[
    RuleSpec {
        class: "PersonWithADDementia",
        rule_name: "PersonWithADDementia_Rule",
        description: "Identifies Alzheimer's Disease Dementia based on biomarker profile and cognitive impairment",
        parameters: &[
            ("amyloid", "positive"),
            ("tau", "positive"),
            ("neurodegeneration", "positive"),
        ],
    },
    RuleSpec {
        class: "PersonWithMCI",
        rule_name: "PersonWithMCI_Rule",
        description: "Identifies Mild Cognitive Impairment with evidence of Alzheimer's pathology",
        parameters: &[("cognitiveImpairment", "present"), ("adlIndependence", "preserved")],
    },
    RuleSpec {
        class: "AsymptomaticAD",
        rule_name: "AsymptomaticAD_Rule",
        description: "Identifies preclinical Alzheimer's disease in cognitively unimpaired patients",
        parameters: &[("amyloid", "positive"), ("cognitiveImpairment", "absent")],
    },
    RuleSpec {
        class: "AmyloidPositive",
        rule_name: "AmyloidPositive_Rule",
        description: "Detects positive amyloid biomarkers based on test thresholds",
        parameters: &[("threshold", "0.01"), ("marker", "abeta4240Ratio")],
    },
    RuleSpec {
        class: "TauPositive",
        rule_name: "TauPositive_Rule",
        description: "Detects positive tau biomarkers based on test thresholds",
        parameters: &[("threshold", "0.09"), ("marker", "pTauAbeta42Ratio")],
    },
    RuleSpec {
        class: "NeurodegenerationPositive",
        rule_name: "NeurodegenerationPositive_Rule",
        description: "Detects hippocampal atrophy from volumetric imaging",
        parameters: &[("threshold", "2500"), ("marker", "hippocampalVolume")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnosis_priority_starts_with_ad_dementia() {
        assert_eq!(DIAGNOSIS_CLASSES[0].0, "PersonWithADDementia");
    }

    #[test]
    fn every_biomarker_class_has_a_rule_entry() {
        for class in BIOMARKER_CLASSES {
            assert!(
                RULE_CATALOG.iter().any(|r| r.class == *class),
                "missing rule spec for {class}"
            );
        }
    }

    #[test]
    fn stage_classes_are_ordered_most_severe_first() {
        assert_eq!(STAGE_CLASSES[0].1, DiseaseStage::Severe);
        assert_eq!(STAGE_CLASSES[2].1, DiseaseStage::Mild);
    }
}
