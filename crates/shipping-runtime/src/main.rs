//! # Heritage Shipping Runtime
//!
//! Entry point for the shipping core.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `HS_*` environment variables
//! 2. Initialize logging
//! 3. Validate configuration (production checks are warnings unless
//!    `HS_REQUIRE_PRODUCTION=true`)
//! 4. Open storage, wire ledgers, notifier and gateway
//! 5. Serve until Ctrl+C

use anyhow::{Context, Result};
use shipping_runtime::logging::init_tracing;
use shipping_runtime::{RuntimeConfig, ShippingRuntime};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialize logging")?;

    if let Err(e) = config.validate_for_production() {
        let strict = std::env::var("HS_REQUIRE_PRODUCTION")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if strict {
            error!(error = %e, "[runtime] Refusing to start");
            return Err(e).context("production configuration check failed");
        }
        warn!(error = %e, "[runtime] Configuration is not production ready");
    }

    let runtime = ShippingRuntime::new(config)?;

    info!("Runtime is starting. Press Ctrl+C to stop.");
    runtime
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "[runtime] Failed to listen for Ctrl+C");
            }
        })
        .await
}
