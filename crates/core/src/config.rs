//! Core runtime configuration.
//!
//! Resolved once at process startup and passed into the orchestrator, so
//! request handling never reads process-wide environment variables.

use crate::{CoreResult, DiagnosisError};

/// Prefix applied to every minted session id.
pub const DEFAULT_SESSION_PREFIX: &str = "sess_";

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    ontology_version: String,
    session_prefix: String,
}

impl CoreConfig {
    pub fn new(ontology_version: String, session_prefix: String) -> CoreResult<Self> {
        if ontology_version.trim().is_empty() {
            return Err(DiagnosisError::InvalidInput(
                "ontology_version cannot be empty".into(),
            ));
        }
        if session_prefix.trim().is_empty() {
            return Err(DiagnosisError::InvalidInput(
                "session_prefix cannot be empty".into(),
            ));
        }
        Ok(Self {
            ontology_version,
            session_prefix,
        })
    }

    /// Version string stamped into every diagnosis result.
    pub fn ontology_version(&self) -> &str {
        &self.ontology_version
    }

    pub fn session_prefix(&self) -> &str {
        &self.session_prefix
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ontology_version: "1.0".into(),
            session_prefix: DEFAULT_SESSION_PREFIX.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_ontology_version() {
        let err = CoreConfig::new("  ".into(), "sess_".into()).unwrap_err();
        assert!(matches!(err, DiagnosisError::InvalidInput(_)));
    }

    #[test]
    fn default_carries_documented_values() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.ontology_version(), "1.0");
        assert_eq!(cfg.session_prefix(), "sess_");
    }
}
