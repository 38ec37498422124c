//! Deterministic rule base.
//!
//! Mirrors the ontology's SWRL rules over the registered attribute maps:
//! biomarker positivity from the diagnostic cutoffs, stage classes from
//! the MMSE score, and diagnosis classes from their combination. Classes
//! come out in a fixed order so repeated runs are bit-identical.

use adss_core::cutoffs;
use adss_types::DiseaseStage;
use serde_json::Value;

/// Merged attribute view for one patient (demographics plus tests).
pub type AttributeView = serde_json::Map<String, Value>;

fn number(attributes: &AttributeView, key: &str) -> Option<f64> {
    attributes.get(key).and_then(Value::as_f64)
}

fn integer(attributes: &AttributeView, key: &str) -> Option<i32> {
    attributes.get(key).and_then(Value::as_i64).map(|v| v as i32)
}

/// Run the rule base over the merged attributes.
pub fn infer_classes(attributes: &AttributeView) -> Vec<String> {
    let mut classes = vec!["Person".to_string()];

    let amyloid = cutoffs::classify_amyloid(number(attributes, "abeta4240Ratio"));
    let tau = cutoffs::classify_tau(number(attributes, "pTauAbeta42Ratio"));
    let neurodegen = cutoffs::classify_neurodegeneration(number(attributes, "hippocampalVolume"));

    if amyloid.is_positive() {
        classes.push("AmyloidPositive".into());
    }
    if tau.is_positive() {
        classes.push("TauPositive".into());
    }
    if neurodegen.is_positive() {
        classes.push("NeurodegenerationPositive".into());
    }

    let mmse = integer(attributes, "mmseScore");
    let moca = integer(attributes, "mocaScore");
    let impaired =
        cutoffs::has_cognitive_impairment(mmse) || cutoffs::has_cognitive_impairment_moca(moca);
    if impaired {
        classes.push("CognitiveImpairment".into());
    }

    let full_atn = cutoffs::meets_ad_criteria(amyloid, tau, neurodegen);
    if full_atn && impaired {
        classes.push("PersonWithADDementia".into());
    } else if amyloid.is_positive() && impaired {
        classes.push("PersonWithMCI".into());
    } else if amyloid.is_positive() {
        classes.push("AsymptomaticAD".into());
    }

    match adss_core::staging::stage_from_mmse(mmse) {
        DiseaseStage::Unknown => {}
        stage => classes.push(format!("{stage}Stage")),
    }

    classes
}
