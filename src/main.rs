//! StratIQ backend binary entrypoint.
//! Boots the Axum HTTP server through Shuttle.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable tracing logs in development only (compact, or JSON lines with
/// STRATIQ_LOG_JSON=1). Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV/ENVIRONMENT in {local, development, dev})
///   - STRATIQ_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("STRATIQ_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || ["SHUTTLE_ENV", "ENVIRONMENT"].iter().any(|key| {
            matches!(
                std::env::var(key)
                    .unwrap_or_default()
                    .to_ascii_lowercase()
                    .as_str(),
                "local" | "development" | "dev"
            )
        });

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stratiq=info,warn"));

    let json = std::env::var("STRATIQ_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    // Shuttle may already have installed a subscriber.
    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let router = stratiq::app()?;
    Ok(router.into())
}
