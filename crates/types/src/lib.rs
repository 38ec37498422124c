//! # ADSS Types
//!
//! Shared wire and domain types for the ADSS diagnosis workflow.
//!
//! This crate defines the payloads exchanged across the three assessment
//! steps, the final [`DiagnosisResult`], and the clinical enumerations used
//! by the decision engine. It carries no business logic; classification and
//! staging rules live in `adss-core`.

pub mod clinical;
pub mod diagnosis;
pub mod steps;

pub use clinical::{AtnStatus, ConfidenceLevel, DiseaseStage, ImagingType};
pub use diagnosis::{
    AtnClassification, BiomarkerReading, BiomarkerResults, BiomarkerValues, ClearOutcome,
    CutoffSummary, DiagnosisResult, Evidence, NeurodegenerationReading, RuleTrigger,
};
pub use steps::{CompleteDiagnosisData, Step1Data, Step2Data, Step3Data, StepResponse};
