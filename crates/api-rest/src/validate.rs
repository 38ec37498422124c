//! Request validation at the transport boundary.
//!
//! The core treats its inputs as already well-formed; score ranges and
//! required-field checks live here so a malformed request never reaches
//! the decision engine.

use crate::error::ApiError;
use adss_types::{Step1Data, Step2Data, Step3Data};

const MAX_CLINICAL_NOTES: usize = 2000;

fn require_patient_id(patient_id: &str) -> Result<(), ApiError> {
    if patient_id.trim().is_empty() {
        return Err(ApiError::validation("patientId is required"));
    }
    Ok(())
}

fn check_range(name: &str, value: i32, min: i32, max: i32) -> Result<(), ApiError> {
    if !(min..=max).contains(&value) {
        return Err(ApiError::validation(format!(
            "{name} must be between {min} and {max}"
        )));
    }
    Ok(())
}

fn check_opt_range(name: &str, value: Option<i32>, min: i32, max: i32) -> Result<(), ApiError> {
    match value {
        Some(v) => check_range(name, v, min, max),
        None => Ok(()),
    }
}

fn check_non_negative(name: &str, value: Option<f64>) -> Result<(), ApiError> {
    match value {
        Some(v) if v < 0.0 => Err(ApiError::validation(format!("{name} must be >= 0"))),
        _ => Ok(()),
    }
}

fn check_notes(notes: Option<&str>) -> Result<(), ApiError> {
    match notes {
        Some(n) if n.len() > MAX_CLINICAL_NOTES => Err(ApiError::validation(format!(
            "clinicalNotes cannot exceed {MAX_CLINICAL_NOTES} characters"
        ))),
        _ => Ok(()),
    }
}

pub fn step1(data: &Step1Data) -> Result<(), ApiError> {
    require_patient_id(&data.patient_id)?;
    check_range("age", data.age, 0, 120)?;
    check_range("mmseScore", data.mmse_score, 0, 30)?;
    check_range("mocaScore", data.moca_score, 0, 30)?;
    check_notes(data.clinical_notes.as_deref())
}

pub fn step2(data: &Step2Data) -> Result<(), ApiError> {
    require_patient_id(&data.patient_id)?;
    check_range("mmseScore", data.mmse_score, 0, 30)?;
    check_opt_range("mocaScore", data.moca_score, 0, 30)?;
    check_opt_range("faqScore", data.faq_score, 0, 30)?;
    check_opt_range("ad8Score", data.ad8_score, 0, 8)?;
    check_opt_range("mtaScore", data.mta_score, 0, 4)?;
    check_non_negative("abeta4240Ratio", data.abeta4240_ratio)?;
    check_non_negative("pTauAbeta42Ratio", data.p_tau_abeta42_ratio)?;
    check_non_negative("hippocampalVolume", data.hippocampal_volume)
}

pub fn step3(data: &Step3Data) -> Result<(), ApiError> {
    require_patient_id(&data.patient_id)?;
    check_non_negative("abeta4240Ratio", data.abeta4240_ratio)?;
    check_non_negative("pTauAbeta42Ratio", data.p_tau_abeta42_ratio)?;
    check_non_negative("hippocampalVolume", data.hippocampal_volume)?;
    check_opt_range("mtaScore", data.mta_score, 0, 4)?;
    check_opt_range("mmseScore", data.mmse_score, 0, 30)?;
    check_notes(data.clinical_notes.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adss_types::ImagingType;
    use axum::http::StatusCode;

    fn valid_step2() -> Step2Data {
        Step2Data {
            patient_id: "PT001".into(),
            mmse_score: 22,
            moca_score: Some(20),
            faq_score: None,
            ad8_score: None,
            mta_score: Some(2),
            brain_imaging_type: ImagingType::Elecsys,
            abeta42_score: None,
            p_tau181_score: None,
            t_tau: None,
            abeta4240_ratio: Some(0.05),
            p_tau_abeta42_ratio: Some(0.03),
            hippocampal_volume: None,
            has_rule_out_diseases: true,
            has_vitamin_b12_deficiency: None,
            has_hypothyroidism: None,
            has_uncontrolled_diabetes: None,
        }
    }

    #[test]
    fn valid_panel_passes() {
        assert!(step2(&valid_step2()).is_ok());
    }

    #[test]
    fn out_of_range_mta_is_rejected() {
        let mut data = valid_step2();
        data.mta_score = Some(5);
        let err = step2(&data).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.contains("mtaScore"));
    }

    #[test]
    fn negative_ratio_is_rejected() {
        let mut data = valid_step2();
        data.abeta4240_ratio = Some(-0.1);
        assert!(step2(&data).is_err());
    }

    #[test]
    fn blank_patient_id_is_rejected() {
        let mut data = valid_step2();
        data.patient_id = "  ".into();
        assert!(step2(&data).is_err());
    }
}
