use crate::reasoner::ReasonerError;

#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("no active session found for patient {0}; complete step 1 first")]
    NoSessionForPatient(String),
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("diagnosis not completed for session: {0}")]
    NotCompleted(String),
    #[error("session {0} was modified concurrently; retry the step")]
    ConcurrentUpdate(String),
    #[error("reasoning failed: {0}")]
    Reasoning(#[from] ReasonerError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CoreResult<T> = std::result::Result<T, DiagnosisError>;
