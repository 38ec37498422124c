//! Disease stage inference.
//!
//! The base stage comes from the MMSE score; a fully positive ATN profile
//! can confirm a severe stage or upgrade a mild one when imaging shows
//! medial temporal atrophy. Stage classes inferred by the semantic
//! reasoner override the local computation when present.

use crate::catalog;
use crate::cutoffs::{self, MTA_SCORE_MODERATE};
use adss_types::{AtnStatus, DiseaseStage};

/// Infer the disease stage from an MMSE score alone.
///
/// Scores of 25-30 are within the unimpaired range and map to `Unknown`,
/// as does a missing or out-of-range score.
pub fn stage_from_mmse(mmse_score: Option<i32>) -> DiseaseStage {
    let Some(score) = mmse_score else {
        return DiseaseStage::Unknown;
    };
    if (cutoffs::MMSE_MILD_MIN..=cutoffs::MMSE_MILD_MAX).contains(&score) {
        DiseaseStage::Mild
    } else if (cutoffs::MMSE_MODERATE_MIN..=cutoffs::MMSE_MODERATE_MAX).contains(&score) {
        DiseaseStage::Moderate
    } else if score <= cutoffs::MMSE_SEVERE_MAX {
        DiseaseStage::Severe
    } else {
        tracing::warn!(mmse = score, "MMSE score out of staged range");
        DiseaseStage::Unknown
    }
}

/// Stage inference combining MMSE, the ATN profile and the MTA score.
///
/// With all three ATN axes positive, a severe MMSE stage is confirmed and a
/// mild one is upgraded to moderate when MTA >= 2. Every other combination
/// returns the MMSE-based stage unchanged.
pub fn comprehensive_stage(
    mmse_score: Option<i32>,
    amyloid: AtnStatus,
    tau: AtnStatus,
    neurodegen: AtnStatus,
    mta_score: Option<i32>,
) -> DiseaseStage {
    let base = stage_from_mmse(mmse_score);

    if cutoffs::count_positive(amyloid, tau, neurodegen) == 3 {
        match base {
            DiseaseStage::Severe => return DiseaseStage::Severe,
            DiseaseStage::Mild if matches!(mta_score, Some(mta) if mta >= MTA_SCORE_MODERATE) => {
                return DiseaseStage::Moderate;
            }
            _ => {}
        }
    }

    base
}

/// Fold the reasoner's stage classes into the locally computed stage.
///
/// The ontology is authoritative: if any of the mutually exclusive stage
/// classes appears in `inferred_classes` it wins, otherwise the local
/// value stands.
pub fn merge_with_inferred(local: DiseaseStage, inferred_classes: &[String]) -> DiseaseStage {
    for (class, stage) in catalog::STAGE_CLASSES {
        if inferred_classes.iter().any(|c| c == class) {
            return *stage;
        }
    }
    local
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mmse_ranges_map_to_stages() {
        assert_eq!(stage_from_mmse(Some(22)), DiseaseStage::Mild);
        assert_eq!(stage_from_mmse(Some(15)), DiseaseStage::Moderate);
        assert_eq!(stage_from_mmse(Some(5)), DiseaseStage::Severe);
        assert_eq!(stage_from_mmse(None), DiseaseStage::Unknown);
        assert_eq!(stage_from_mmse(Some(27)), DiseaseStage::Unknown);
    }

    #[test]
    fn mild_stage_upgrades_on_full_atn_and_mta() {
        let stage = comprehensive_stage(
            Some(22),
            AtnStatus::Positive,
            AtnStatus::Positive,
            AtnStatus::Positive,
            Some(3),
        );
        assert_eq!(stage, DiseaseStage::Moderate);
    }

    #[test]
    fn mild_stage_keeps_without_mta_evidence() {
        let stage = comprehensive_stage(
            Some(22),
            AtnStatus::Positive,
            AtnStatus::Positive,
            AtnStatus::Positive,
            Some(1),
        );
        assert_eq!(stage, DiseaseStage::Mild);
    }

    #[test]
    fn severe_stage_is_confirmed_not_escalated() {
        let stage = comprehensive_stage(
            Some(5),
            AtnStatus::Positive,
            AtnStatus::Positive,
            AtnStatus::Positive,
            Some(4),
        );
        assert_eq!(stage, DiseaseStage::Severe);
    }

    #[test]
    fn partial_atn_never_alters_base_stage() {
        let stage = comprehensive_stage(
            Some(22),
            AtnStatus::Positive,
            AtnStatus::Negative,
            AtnStatus::Positive,
            Some(4),
        );
        assert_eq!(stage, DiseaseStage::Mild);
    }

    #[test]
    fn inferred_stage_class_overrides_local() {
        let inferred = vec!["Person".to_string(), "SevereStage".to_string()];
        assert_eq!(
            merge_with_inferred(DiseaseStage::Mild, &inferred),
            DiseaseStage::Severe
        );
    }

    #[test]
    fn local_stage_stands_without_stage_classes() {
        let inferred = vec!["AmyloidPositive".to_string()];
        assert_eq!(
            merge_with_inferred(DiseaseStage::Moderate, &inferred),
            DiseaseStage::Moderate
        );
    }
}
