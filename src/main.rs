use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adss_core::{CoreConfig, DiagnosisService};
use adss_reasoner::MemoryReasoner;

/// Main entry point for the ADSS application.
///
/// Starts the REST server for the three-step diagnosis workflow on
/// port 3000 (configurable via ADSS_REST_ADDR). Swagger UI is served
/// at /swagger-ui on the same listener.
///
/// # Environment Variables
/// - `ADSS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ADSS_ONTOLOGY_VERSION`: ontology version reported in results (default: "1.0")
/// - `ADSS_SESSION_PREFIX`: prefix for minted session ids (default: "sess_")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("adss=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ADSS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let ontology_version =
        std::env::var("ADSS_ONTOLOGY_VERSION").unwrap_or_else(|_| "1.0".into());
    let session_prefix = std::env::var("ADSS_SESSION_PREFIX")
        .unwrap_or_else(|_| adss_core::DEFAULT_SESSION_PREFIX.into());

    tracing::info!("++ Starting ADSS REST on {}", rest_addr);

    let cfg = Arc::new(CoreConfig::new(ontology_version, session_prefix)?);
    let reasoner = Arc::new(MemoryReasoner::new());
    let service = Arc::new(DiagnosisService::new(cfg, reasoner));

    let app = api_rest::app(service);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
