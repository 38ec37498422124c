//! # ADSS Core
//!
//! Decision engine and session orchestration for the staged Alzheimer's
//! assessment workflow:
//! - Deterministic biomarker classification and disease staging
//!   ([`cutoffs`], [`staging`])
//! - Diagnosis resolution merging local rules with semantic inference
//!   ([`resolver`], [`catalog`])
//! - Recommendation tables ([`recommend`])
//! - Concurrent session lifecycle ([`session`])
//! - The step 1-3 workflow state machine ([`orchestrator`])
//!
//! **No transport concerns**: HTTP routing, validation and schema
//! documentation belong in `api-rest`. The semantic reasoner is consumed
//! through the [`reasoner::Reasoner`] trait only.

pub mod catalog;
pub mod config;
pub mod cutoffs;
pub mod error;
pub mod orchestrator;
pub mod reasoner;
pub mod recommend;
pub mod resolver;
pub mod session;
pub mod staging;

pub use config::{CoreConfig, DEFAULT_SESSION_PREFIX};
pub use error::{CoreResult, DiagnosisError};
pub use orchestrator::{DiagnosisService, Step1Outcome, Step2Outcome};
pub use reasoner::{
    Attributes, PatientRegistration, Reasoner, ReasonerError, ReasoningReport, TestRegistration,
};
pub use session::{Session, SessionStore};
