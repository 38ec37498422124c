//! Diagnostic cutoff values and the ATN biomarker classifier.
//!
//! Thresholds follow the clinical rule base: Abeta42/40 ratio for amyloid,
//! P-Tau/Abeta42 ratio for tau, adjusted hippocampal volume for
//! neurodegeneration. All comparisons are strict; a value equal to the
//! cutoff classifies as Negative.

use adss_types::{AtnStatus, CutoffSummary};
use std::collections::BTreeMap;

// MMSE score ranges per stage.
pub const MMSE_MILD_MIN: i32 = 21;
pub const MMSE_MILD_MAX: i32 = 24;
pub const MMSE_MODERATE_MIN: i32 = 10;
pub const MMSE_MODERATE_MAX: i32 = 20;
pub const MMSE_SEVERE_MAX: i32 = 9;

// ATN biomarker cutoffs.
pub const ABETA_RATIO_CUTOFF: f64 = 0.01; // < 0.01 = Positive
pub const PTAU_RATIO_CUTOFF: f64 = 0.09; // > 0.09 = Positive
pub const HIPPO_VOLUME_THRESHOLD: f64 = 2500.0; // < 2500 = atrophy (Positive)

// MTA >= 2 suggests medial temporal atrophy.
pub const MTA_SCORE_MODERATE: i32 = 2;

// Screening cutoffs for cognitive impairment.
pub const MMSE_CUTOFF_FOR_DEMENTIA: i32 = 23;
pub const MOCA_CUTOFF_FOR_DEMENTIA: i32 = 25;

/// Classify amyloid status from the Abeta42/40 ratio.
pub fn classify_amyloid(abeta4240_ratio: Option<f64>) -> AtnStatus {
    match abeta4240_ratio {
        None => AtnStatus::Unknown,
        Some(ratio) if ratio < ABETA_RATIO_CUTOFF => AtnStatus::Positive,
        Some(_) => AtnStatus::Negative,
    }
}

/// Classify tau status from the P-Tau/Abeta42 ratio.
pub fn classify_tau(p_tau_abeta42_ratio: Option<f64>) -> AtnStatus {
    match p_tau_abeta42_ratio {
        None => AtnStatus::Unknown,
        Some(ratio) if ratio > PTAU_RATIO_CUTOFF => AtnStatus::Positive,
        Some(_) => AtnStatus::Negative,
    }
}

/// Classify neurodegeneration status from adjusted hippocampal volume.
pub fn classify_neurodegeneration(hippocampal_volume: Option<f64>) -> AtnStatus {
    match hippocampal_volume {
        None => AtnStatus::Unknown,
        Some(volume) if volume < HIPPO_VOLUME_THRESHOLD => AtnStatus::Positive,
        Some(_) => AtnStatus::Negative,
    }
}

/// Render the ATN profile string, e.g. `"A+T+N+"`.
///
/// Any status other than Positive, including Unknown, renders as the
/// negative symbol. Missing data is therefore indistinguishable from a
/// confirmed negative in the rendered profile; callers that need the
/// distinction must look at the per-axis statuses.
pub fn atn_profile(amyloid: AtnStatus, tau: AtnStatus, neurodegen: AtnStatus) -> String {
    let a = if amyloid.is_positive() { "A+" } else { "A-" };
    let t = if tau.is_positive() { "T+" } else { "T-" };
    let n = if neurodegen.is_positive() { "N+" } else { "N-" };
    format!("{a}{t}{n}")
}

/// True iff the full A+T+N+ profile is present.
pub fn meets_ad_criteria(amyloid: AtnStatus, tau: AtnStatus, neurodegen: AtnStatus) -> bool {
    amyloid.is_positive() && tau.is_positive() && neurodegen.is_positive()
}

/// Count positive axes among A/T/N.
pub fn count_positive(amyloid: AtnStatus, tau: AtnStatus, neurodegen: AtnStatus) -> usize {
    [amyloid, tau, neurodegen]
        .iter()
        .filter(|s| s.is_positive())
        .count()
}

/// MMSE-based cognitive impairment screen.
pub fn has_cognitive_impairment(mmse_score: Option<i32>) -> bool {
    matches!(mmse_score, Some(score) if score <= MMSE_CUTOFF_FOR_DEMENTIA)
}

/// MoCA-based cognitive impairment screen.
pub fn has_cognitive_impairment_moca(moca_score: Option<i32>) -> bool {
    matches!(moca_score, Some(score) if score <= MOCA_CUTOFF_FOR_DEMENTIA)
}

/// Summary of the applied cutoffs, attached to the evidence record.
pub fn cutoff_summary() -> CutoffSummary {
    let mut mmse_ranges = BTreeMap::new();
    mmse_ranges.insert("mild".into(), format!("{MMSE_MILD_MIN}-{MMSE_MILD_MAX}"));
    mmse_ranges.insert(
        "moderate".into(),
        format!("{MMSE_MODERATE_MIN}-{MMSE_MODERATE_MAX}"),
    );
    mmse_ranges.insert("severe".into(), format!("<={MMSE_SEVERE_MAX}"));

    let mut biomarker_cutoffs = BTreeMap::new();
    biomarker_cutoffs.insert(
        "abeta4240Ratio".into(),
        format!("< {ABETA_RATIO_CUTOFF} = Positive"),
    );
    biomarker_cutoffs.insert(
        "pTauAbeta42Ratio".into(),
        format!("> {PTAU_RATIO_CUTOFF} = Positive"),
    );
    biomarker_cutoffs.insert(
        "hippocampalVolume".into(),
        format!("< {HIPPO_VOLUME_THRESHOLD} = Atrophy"),
    );

    CutoffSummary {
        mmse_ranges,
        biomarker_cutoffs,
        atn_framework: "A (Amyloid) + T (Tau) + N (Neurodegeneration)".into(),
    }
}
