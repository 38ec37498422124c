//! Clinical enumerations used throughout the diagnosis workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Ternary biomarker status along one ATN axis.
///
/// `Unknown` is reserved for missing measurements; a present value always
/// classifies as `Positive` or `Negative`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AtnStatus {
    Positive,
    Negative,
    Unknown,
}

impl AtnStatus {
    pub fn is_positive(self) -> bool {
        self == AtnStatus::Positive
    }
}

impl fmt::Display for AtnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AtnStatus::Positive => "Positive",
            AtnStatus::Negative => "Negative",
            AtnStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Disease stage derived from cognitive scores and biomarker evidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DiseaseStage {
    Mild,
    Moderate,
    Severe,
    Unknown,
}

impl fmt::Display for DiseaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiseaseStage::Mild => "Mild",
            DiseaseStage::Moderate => "Moderate",
            DiseaseStage::Severe => "Severe",
            DiseaseStage::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Confidence attached to a resolved diagnosis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Biomarker test / imaging device family used in step 2.
///
/// Each family produces a different subset of the biomarker panel, so the
/// orchestrator forwards only the fields the selected family can measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ImagingType {
    Elecsys,
    Innotest,
    Lumipulse,
    #[serde(rename = "MRIFreesurfer")]
    MriFreesurfer,
    PlasmaSimoa,
}

impl fmt::Display for ImagingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImagingType::Elecsys => "Elecsys",
            ImagingType::Innotest => "Innotest",
            ImagingType::Lumipulse => "Lumipulse",
            ImagingType::MriFreesurfer => "MRIFreesurfer",
            ImagingType::PlasmaSimoa => "PlasmaSimoa",
        };
        f.write_str(s)
    }
}
