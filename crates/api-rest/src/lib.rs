//! # API REST
//!
//! REST surface for the ADSS diagnosis workflow.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Request validation and error-to-status mapping
//! - OpenAPI/Swagger documentation
//!
//! All decision logic lives in `adss-core`; handlers only validate,
//! delegate and shape responses.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod validate;

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use adss_core::DiagnosisService;
use adss_types::{
    ClearOutcome, CompleteDiagnosisData, DiagnosisResult, Step1Data, Step2Data, Step3Data,
    StepResponse,
};
use error::ApiError;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DiagnosisService>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, process_step1, process_step2, process_step3, complete_diagnosis, session_result, clear_session),
    components(schemas(
        HealthRes,
        error::ErrorBody,
        Step1Data,
        Step2Data,
        Step3Data,
        CompleteDiagnosisData,
        StepResponse,
        DiagnosisResult,
        ClearOutcome,
        adss_types::AtnStatus,
        adss_types::DiseaseStage,
        adss_types::ConfidenceLevel,
        adss_types::ImagingType,
        adss_types::RuleTrigger,
        adss_types::Evidence,
        adss_types::BiomarkerValues,
        adss_types::AtnClassification,
        adss_types::CutoffSummary,
        adss_types::BiomarkerResults,
        adss_types::BiomarkerReading,
        adss_types::NeurodegenerationReading,
    ))
)]
struct ApiDoc;

/// Build the complete application router, including Swagger UI and CORS.
pub fn app(service: Arc<DiagnosisService>) -> Router {
    let state = AppState { service };
    Router::new()
        .route("/health", get(health))
        .route("/v1/diagnosis/step1", post(process_step1))
        .route("/v1/diagnosis/step2", post(process_step2))
        .route("/v1/diagnosis/step3", post(process_step3))
        .route("/v1/diagnosis/complete", post(complete_diagnosis))
        .route("/v1/diagnosis/session/:id", get(session_result))
        .route("/v1/diagnosis/session/:id", delete(clear_session))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "ADSS REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/v1/diagnosis/step1",
    request_body = Step1Data,
    responses(
        (status = 200, description = "Step 1 processed", body = StepResponse),
        (status = 422, description = "Invalid input data", body = error::ErrorBody),
        (status = 502, description = "Reasoning collaborator unavailable", body = error::ErrorBody)
    )
)]
/// Step 1 - initial assessment: demographics, family history and
/// screening scores. Opens a new session for the patient.
#[axum::debug_handler]
async fn process_step1(
    State(state): State<AppState>,
    Json(data): Json<Step1Data>,
) -> Result<Json<StepResponse>, ApiError> {
    validate::step1(&data)?;
    let outcome = state.service.process_step1(data)?;
    Ok(Json(StepResponse {
        session_id: outcome.session_id,
        patient_id: outcome.patient_id,
        step: "STEP1".into(),
        success: true,
        message: "Initial assessment completed successfully".into(),
        intermediate_results: json!({
            "patientCreated": true,
            "patientRef": outcome.patient_ref,
            "nextStep": "clinical_tests",
        }),
        next_step_endpoint: "/v1/diagnosis/step2".into(),
        timestamp: Utc::now(),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/diagnosis/step2",
    request_body = Step2Data,
    responses(
        (status = 200, description = "Step 2 processed", body = StepResponse),
        (status = 404, description = "No session for patient", body = error::ErrorBody),
        (status = 422, description = "Invalid input data", body = error::ErrorBody),
        (status = 502, description = "Reasoning collaborator unavailable", body = error::ErrorBody)
    )
)]
/// Step 2 - clinical tests evaluation: registers the biomarker panel and
/// runs a preliminary reasoning pass.
#[axum::debug_handler]
async fn process_step2(
    State(state): State<AppState>,
    Json(data): Json<Step2Data>,
) -> Result<Json<StepResponse>, ApiError> {
    validate::step2(&data)?;
    let outcome = state.service.process_step2(data)?;
    Ok(Json(StepResponse {
        session_id: outcome.session_id,
        patient_id: outcome.patient_id,
        step: "STEP2".into(),
        success: true,
        message: "Clinical tests evaluation completed".into(),
        intermediate_results: json!({
            "clinicalTestAdded": true,
            "testId": outcome.test_id,
            "reasoningPerformed": true,
            "inferredClasses": outcome.reasoning.inferred_classes,
            "reasoningTimeMs": outcome.reasoning.reasoning_time_ms,
            "nextStep": "final_diagnosis",
        }),
        next_step_endpoint: "/v1/diagnosis/step3".into(),
        timestamp: Utc::now(),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/diagnosis/step3",
    request_body = Step3Data,
    responses(
        (status = 200, description = "Final diagnosis", body = DiagnosisResult),
        (status = 422, description = "Invalid input data", body = error::ErrorBody),
        (status = 502, description = "Reasoning collaborator unavailable", body = error::ErrorBody)
    )
)]
/// Step 3 - final diagnosis and recommendations. Auto-creates a session
/// when none is found, so this endpoint never fails with 404.
#[axum::debug_handler]
async fn process_step3(
    State(state): State<AppState>,
    Json(data): Json<Step3Data>,
) -> Result<Json<DiagnosisResult>, ApiError> {
    validate::step3(&data)?;
    Ok(Json(state.service.process_step3(data)?))
}

#[utoipa::path(
    post,
    path = "/v1/diagnosis/complete",
    request_body = CompleteDiagnosisData,
    responses(
        (status = 200, description = "Final diagnosis", body = DiagnosisResult),
        (status = 422, description = "Invalid input data", body = error::ErrorBody),
        (status = 502, description = "Reasoning collaborator unavailable", body = error::ErrorBody)
    )
)]
/// Run all three steps in one request; returns the step 3 result.
#[axum::debug_handler]
async fn complete_diagnosis(
    State(state): State<AppState>,
    Json(data): Json<CompleteDiagnosisData>,
) -> Result<Json<DiagnosisResult>, ApiError> {
    validate::step1(&data.step1)?;
    validate::step2(&data.step2)?;
    validate::step3(&data.step3)?;
    Ok(Json(state.service.complete_diagnosis(data)?))
}

#[utoipa::path(
    get,
    path = "/v1/diagnosis/session/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Stored diagnosis result", body = DiagnosisResult),
        (status = 404, description = "Session not found", body = error::ErrorBody),
        (status = 409, description = "Diagnosis not completed yet", body = error::ErrorBody)
    )
)]
/// Stored result of a completed session, returned unchanged.
#[axum::debug_handler]
async fn session_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiagnosisResult>, ApiError> {
    Ok(Json(state.service.session_result(&id)?))
}

#[utoipa::path(
    delete,
    path = "/v1/diagnosis/session/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Clear outcome (cleared may be false)", body = ClearOutcome)
    )
)]
/// Remove a session and purge the patient's reasoner data. Clearing an
/// unknown session reports `cleared: false` rather than an error.
#[axum::debug_handler]
async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClearOutcome>, ApiError> {
    Ok(Json(state.service.clear_session(&id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adss_core::CoreConfig;
    use adss_reasoner::MemoryReasoner;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let service = Arc::new(DiagnosisService::new(
            Arc::new(CoreConfig::default()),
            Arc::new(MemoryReasoner::new()),
        ));
        app(service)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn step1_body(patient: &str) -> serde_json::Value {
        json!({
            "patientId": patient,
            "age": 72,
            "hasFamilyHistory": true,
            "hasSubjectiveComplaints": true,
            "hasBehaviorChanges": true,
            "mmseScore": 22,
            "mocaScore": 20,
            "isIndependentADL": true,
            "isIndependentIADL": false
        })
    }

    fn step3_body(patient: &str) -> serde_json::Value {
        json!({
            "patientId": patient,
            "abeta4240Ratio": 0.008,
            "pTauAbeta42Ratio": 0.12,
            "hippocampalVolume": 2400.5,
            "mtaScore": 2,
            "mmseScore": 18,
            "needsBiomarkersTest": false,
            "needsStructuralImaging": false,
            "needsFollowUp6Months": true
        })
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn step2_without_step1_is_not_found() {
        let body = json!({
            "patientId": "PT404",
            "mmseScore": 22,
            "brainImagingType": "Elecsys",
            "hasRuleOutDiseases": true
        });
        let response = test_app()
            .oneshot(post_json("/v1/diagnosis/step2", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_age_is_unprocessable() {
        let mut body = step1_body("PT001");
        body["age"] = json!(130);
        let response = test_app()
            .oneshot(post_json("/v1/diagnosis/step1", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn step1_then_step3_then_result_round_trip() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json("/v1/diagnosis/step1", step1_body("PT001")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let step1 = body_json(response).await;
        assert_eq!(step1["step"], "STEP1");
        assert_eq!(step1["nextStepEndpoint"], "/v1/diagnosis/step2");
        let session_id = step1["sessionId"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json("/v1/diagnosis/step3", step3_body("PT001")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let diagnosis = body_json(response).await;
        assert_eq!(diagnosis["sessionId"], session_id.as_str());
        assert_eq!(diagnosis["diagnosis"], "Alzheimer's Disease Dementia");
        assert_eq!(diagnosis["atnProfile"], "A+T+N+");

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/v1/diagnosis/session/{session_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stored = body_json(response).await;
        assert_eq!(stored, diagnosis);
    }

    #[tokio::test]
    async fn result_before_completion_is_conflict() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(post_json("/v1/diagnosis/step1", step1_body("PT002")))
            .await
            .unwrap();
        let step1 = body_json(response).await;
        let session_id = step1["sessionId"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::get(format!("/v1/diagnosis/session/{session_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn clearing_unknown_session_is_ok_with_cleared_false() {
        let response = test_app()
            .oneshot(
                Request::delete("/v1/diagnosis/session/sess_unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cleared"], false);
    }
}
