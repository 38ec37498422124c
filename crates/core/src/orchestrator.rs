//! Workflow orchestration for the 3-step assessment.
//!
//! Steps per patient run EMPTY -> STEP1 -> STEP2 -> STEP3 (completed).
//! Each step reads a session snapshot, performs every fallible reasoner
//! call, and only then commits the mutated snapshot, so a failure mid-step
//! leaves the session exactly as it was.

use crate::config::CoreConfig;
use crate::cutoffs;
use crate::error::{CoreResult, DiagnosisError};
use crate::reasoner::{Attributes, Reasoner, ReasoningReport};
use crate::recommend;
use crate::resolver;
use crate::session::{Session, SessionStore};
use crate::staging;
use adss_types::{
    AtnClassification, AtnStatus, BiomarkerReading, BiomarkerResults, BiomarkerValues,
    ClearOutcome, CompleteDiagnosisData, DiagnosisResult, Evidence, ImagingType,
    NeurodegenerationReading, Step1Data, Step2Data, Step3Data,
};
use chrono::Utc;
use std::sync::Arc;

/// Outcome of step 1.
#[derive(Clone, Debug)]
pub struct Step1Outcome {
    pub session_id: String,
    pub patient_id: String,
    pub patient_ref: String,
}

/// Outcome of step 2, carrying the preliminary reasoning snapshot.
#[derive(Clone, Debug)]
pub struct Step2Outcome {
    pub session_id: String,
    pub patient_id: String,
    pub test_id: String,
    pub reasoning: ReasoningReport,
}

/// The diagnosis workflow engine.
pub struct DiagnosisService {
    store: SessionStore,
    reasoner: Arc<dyn Reasoner>,
    cfg: Arc<CoreConfig>,
}

impl DiagnosisService {
    pub fn new(cfg: Arc<CoreConfig>, reasoner: Arc<dyn Reasoner>) -> Self {
        let store = SessionStore::new(cfg.session_prefix());
        Self {
            store,
            reasoner,
            cfg,
        }
    }

    /// Step 1: register the patient with the reasoner and open a session.
    ///
    /// Always mints a new session, even when one already exists for the
    /// patient; the newer session takes over the patient index.
    pub fn process_step1(&self, data: Step1Data) -> CoreResult<Step1Outcome> {
        tracing::info!(patient = %data.patient_id, "processing step 1");

        let mut attributes = Attributes::new();
        attributes.insert("age".into(), data.age.into());
        attributes.insert("hasFamilyHistory".into(), data.has_family_history.into());
        attributes.insert("hasBehaviorChanges".into(), data.has_behavior_changes.into());
        attributes.insert("hasOtherDiseases".into(), false.into());

        let registration = self.reasoner.register_patient(&data.patient_id, &attributes)?;

        let mut session = self.store.create(&data.patient_id);
        session.ontology_patient_ref = Some(registration.patient_ref.clone());
        session.step1_data = Some(data);
        let session = self.store.commit(session)?;

        tracing::info!(
            patient = %session.patient_id,
            session = %session.session_id,
            "step 1 completed"
        );
        Ok(Step1Outcome {
            session_id: session.session_id,
            patient_id: session.patient_id,
            patient_ref: registration.patient_ref,
        })
    }

    /// Step 2: register the test panel and run a preliminary reasoning
    /// pass. Fails when the patient has no session from step 1.
    pub fn process_step2(&self, data: Step2Data) -> CoreResult<Step2Outcome> {
        tracing::info!(patient = %data.patient_id, "processing step 2");

        let session_id = self
            .store
            .session_id_for_patient(&data.patient_id)
            .ok_or_else(|| DiagnosisError::NoSessionForPatient(data.patient_id.clone()))?;
        let mut session = self
            .store
            .get(&session_id)
            .ok_or_else(|| DiagnosisError::SessionNotFound(session_id.clone()))?;

        let attributes = test_attributes(&data);
        let test = self
            .reasoner
            .register_clinical_test(&data.patient_id, &attributes)?;
        let report = self.reasoner.execute_reasoning(&data.patient_id)?;

        session.step2_data = Some(data);
        session.last_reasoning = Some(report.clone());
        let session = self.store.commit(session)?;

        tracing::info!(
            patient = %session.patient_id,
            session = %session.session_id,
            inferred = report.inferred_classes.len(),
            "step 2 completed"
        );
        Ok(Step2Outcome {
            session_id: session.session_id,
            patient_id: session.patient_id,
            test_id: test.test_id,
            reasoning: report,
        })
    }

    /// Step 3: classify biomarkers, infer the stage, resolve the diagnosis
    /// and finalize the session.
    ///
    /// Never fails for a missing session: an unknown or absent session id
    /// auto-creates a usable session for the patient (recovery path).
    pub fn process_step3(&self, data: Step3Data) -> CoreResult<DiagnosisResult> {
        tracing::info!(patient = %data.patient_id, "processing step 3");

        let mut session = self.resolve_or_create_session(&data)?;

        let amyloid = cutoffs::classify_amyloid(data.abeta4240_ratio);
        let tau = cutoffs::classify_tau(data.p_tau_abeta42_ratio);
        let neurodegen = cutoffs::classify_neurodegeneration(data.hippocampal_volume);
        let atn_profile = cutoffs::atn_profile(amyloid, tau, neurodegen);
        tracing::info!(
            patient = %data.patient_id,
            profile = %atn_profile,
            "ATN classification computed"
        );

        // Final reasoning pass happens before any session mutation is
        // committed; its classes corroborate the cutoff-driven decision
        // and can override the stage.
        let report = self.reasoner.execute_reasoning(&data.patient_id)?;

        let local_stage =
            staging::comprehensive_stage(data.mmse_score, amyloid, tau, neurodegen, data.mta_score);
        let disease_stage = staging::merge_with_inferred(local_stage, &report.inferred_classes);
        let (diagnosis, confidence_level) = resolver::resolve_from_cutoffs(amyloid, tau, neurodegen);

        let result = self.build_result(
            &session,
            &data,
            &report,
            amyloid,
            tau,
            neurodegen,
            atn_profile,
            disease_stage,
            diagnosis,
            confidence_level,
        );

        session.step3_data = Some(data);
        session.last_reasoning = Some(report);
        session.completed = true;
        session.result = Some(result.clone());
        self.store.commit(session)?;

        tracing::info!(
            patient = %result.patient_id,
            session = %result.session_id,
            diagnosis = %result.diagnosis,
            stage = %result.disease_stage,
            "step 3 completed"
        );
        Ok(result)
    }

    /// Run all three steps sequentially; returns the step 3 result.
    pub fn complete_diagnosis(&self, data: CompleteDiagnosisData) -> CoreResult<DiagnosisResult> {
        self.process_step1(data.step1)?;
        self.process_step2(data.step2)?;
        self.process_step3(data.step3)
    }

    /// Stored result of a completed session. Reads are idempotent; the
    /// result is returned exactly as stored, with no recomputation.
    pub fn session_result(&self, session_id: &str) -> CoreResult<DiagnosisResult> {
        let session = self
            .store
            .get(session_id)
            .ok_or_else(|| DiagnosisError::SessionNotFound(session_id.to_string()))?;
        if !session.completed {
            return Err(DiagnosisError::NotCompleted(session_id.to_string()));
        }
        session
            .result
            .ok_or_else(|| DiagnosisError::NotCompleted(session_id.to_string()))
    }

    /// Remove the session and purge the patient's reasoner data.
    ///
    /// A missing session yields `cleared: false`, not an error. The purge
    /// runs before removal so a reasoner failure leaves the session intact.
    pub fn clear_session(&self, session_id: &str) -> CoreResult<ClearOutcome> {
        let Some(session) = self.store.get(session_id) else {
            return Ok(ClearOutcome {
                session_id: session_id.to_string(),
                cleared: false,
                patient_id: None,
                message: "Session not found".into(),
                timestamp: Utc::now(),
            });
        };

        self.reasoner.purge_patient_data(&session.patient_id)?;
        self.store.remove(session_id);

        tracing::info!(session = %session_id, patient = %session.patient_id, "session cleared");
        Ok(ClearOutcome {
            session_id: session_id.to_string(),
            cleared: true,
            patient_id: Some(session.patient_id),
            message: "Session cleared successfully".into(),
            timestamp: Utc::now(),
        })
    }

    /// Resolve the step 3 target session: explicit id first, then the
    /// patient index; auto-create when neither resolves.
    fn resolve_or_create_session(&self, data: &Step3Data) -> CoreResult<Session> {
        let requested = data
            .session_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| self.store.session_id_for_patient(&data.patient_id));

        match requested {
            Some(id) => {
                if let Some(session) = self.store.get(&id) {
                    Ok(session)
                } else {
                    tracing::warn!(session = %id, patient = %data.patient_id, "session not found; recreating");
                    self.create_session_with_registration(Some(&id), &data.patient_id)
                }
            }
            None => {
                tracing::warn!(patient = %data.patient_id, "no prior session; auto-creating");
                self.create_session_with_registration(None, &data.patient_id)
            }
        }
    }

    fn create_session_with_registration(
        &self,
        session_id: Option<&str>,
        patient_id: &str,
    ) -> CoreResult<Session> {
        // Registration first: an unreachable reasoner must not mint a session.
        let registration = self
            .reasoner
            .register_patient(patient_id, &Attributes::new())?;
        let mut session = match session_id {
            Some(id) => self.store.create_with_id(id, patient_id),
            None => self.store.create(patient_id),
        };
        session.ontology_patient_ref = Some(registration.patient_ref);
        self.store.commit(session)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_result(
        &self,
        session: &Session,
        data: &Step3Data,
        report: &ReasoningReport,
        amyloid: AtnStatus,
        tau: AtnStatus,
        neurodegen: AtnStatus,
        atn_profile: String,
        disease_stage: adss_types::DiseaseStage,
        diagnosis: String,
        confidence_level: adss_types::ConfidenceLevel,
    ) -> DiagnosisResult {
        let recommended_actions = recommend::recommended_actions(&diagnosis, disease_stage);
        let recommended_activities = data
            .recommended_activities
            .clone()
            .unwrap_or_else(|| recommend::recommended_activities(disease_stage));
        let required_tests = recommend::required_tests(
            &diagnosis,
            &atn_profile,
            data.needs_biomarkers_test,
            data.needs_structural_imaging,
        );
        let follow_up_schedule =
            recommend::follow_up_schedule(data.needs_follow_up_6_months, disease_stage);
        let triggered_rules = recommend::rule_triggers(&report.inferred_classes);

        let evidence = Evidence {
            clinical_data: session.step1_data.clone(),
            test_results: session.step2_data.clone(),
            biomarker_values: BiomarkerValues {
                abeta4240_ratio: data.abeta4240_ratio,
                p_tau_abeta42_ratio: data.p_tau_abeta42_ratio,
                hippocampal_volume: data.hippocampal_volume,
                mta_score: data.mta_score,
            },
            atn_classification: AtnClassification {
                amyloid_status: amyloid,
                tau_status: tau,
                neurodegen_status: neurodegen,
                atn_profile: atn_profile.clone(),
            },
            diagnostic_cutoffs: cutoffs::cutoff_summary(),
        };

        let biomarker_results = BiomarkerResults {
            amyloid: BiomarkerReading {
                value: data.abeta4240_ratio,
                status: amyloid,
            },
            tau: BiomarkerReading {
                value: data.p_tau_abeta42_ratio,
                status: tau,
            },
            neurodegeneration: NeurodegenerationReading {
                volume: data.hippocampal_volume,
                status: neurodegen,
                mta_score: data.mta_score,
            },
            atn_classification: atn_profile.clone(),
            mmse_score: data.mmse_score,
            interpretation: recommend::biomarker_interpretation(amyloid, tau, neurodegen),
        };

        DiagnosisResult {
            patient_id: session.patient_id.clone(),
            session_id: session.session_id.clone(),
            timestamp: Utc::now(),
            diagnosis,
            confidence_level,
            disease_stage,
            atn_profile,
            inferred_classes: report.inferred_classes.clone(),
            recommended_actions,
            recommended_activities,
            required_tests,
            triggered_rules,
            evidence,
            biomarker_results,
            follow_up_schedule,
            referral_recommendation: recommend::REFERRAL_RECOMMENDATION.into(),
            reasoning_time_ms: report.reasoning_time_ms,
            is_consistent: report.is_consistent,
            ontology_version: self.cfg.ontology_version().to_string(),
        }
    }
}

/// Build the attribute map the reasoner receives for a test panel.
///
/// Only the biomarker fields the selected device family actually produces
/// are forwarded.
fn test_attributes(data: &Step2Data) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("mmseScore".into(), data.mmse_score.into());
    insert_opt(&mut attributes, "mocaScore", data.moca_score);
    insert_opt(&mut attributes, "faqScore", data.faq_score);
    insert_opt(&mut attributes, "ad8Score", data.ad8_score);
    insert_opt(&mut attributes, "mtaScore", data.mta_score);
    attributes.insert(
        "brainImagingType".into(),
        data.brain_imaging_type.to_string().into(),
    );

    match data.brain_imaging_type {
        ImagingType::Elecsys => {
            insert_opt(&mut attributes, "abeta4240Ratio", data.abeta4240_ratio);
            insert_opt(&mut attributes, "pTauAbeta42Ratio", data.p_tau_abeta42_ratio);
        }
        ImagingType::Innotest => {
            insert_opt(&mut attributes, "abeta42Score", data.abeta42_score);
            insert_opt(&mut attributes, "tTau", data.t_tau);
        }
        ImagingType::Lumipulse => {
            insert_opt(&mut attributes, "abeta42Score", data.abeta42_score);
            insert_opt(&mut attributes, "pTau181Score", data.p_tau181_score);
        }
        ImagingType::MriFreesurfer => {
            insert_opt(&mut attributes, "hippocampalVolume", data.hippocampal_volume);
        }
        ImagingType::PlasmaSimoa => {
            insert_opt(&mut attributes, "abeta4240Ratio", data.abeta4240_ratio);
        }
    }

    attributes
}

fn insert_opt<T: Into<serde_json::Value>>(attributes: &mut Attributes, key: &str, value: Option<T>) {
    if let Some(value) = value {
        attributes.insert(key.to_string(), value.into());
    }
}
