use std::time::Duration;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{data::ledger::RecipientLedger, error::AppError};

/// Timeout for a single request to the community site.
const COMMUNITY_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Initializes the global tracing subscriber.
///
/// Log levels come from `RUST_LOG`, defaulting to `info`. Must be called once, before
/// anything logs.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}

/// Builds the HTTP client used for community API requests.
///
/// Redirects are disabled so the API key header is never forwarded to another host.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - The TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(COMMUNITY_API_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Creates the campaign data directory and sent ledger if they are missing.
///
/// A failure is logged but does not stop startup; the campaign retries the same
/// preparation when it is started.
pub async fn prepare_ledger(ledger: &RecipientLedger) {
    match ledger.ensure_storage_ready().await {
        Ok(()) => tracing::info!("Campaign ledger ready at {}", ledger.sent_path().display()),
        Err(e) => tracing::error!("Failed to prepare campaign ledger: {}", e),
    }
}
