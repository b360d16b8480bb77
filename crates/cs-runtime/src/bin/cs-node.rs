//! # cs-node
//!
//! Replays a JSON call script against a freshly deployed claimable share
//! token and prints one receipt per line, followed by the event log.
//!
//! ```text
//! cs-node <script.json>
//! ```
//!
//! Deployment parameters come from `CS_*` environment variables (see
//! `RuntimeConfig::from_env`). Calls run against the system clock, so
//! script timestamps must be non-decreasing and not in the future. Share
//! amounts are decimal strings.

use anyhow::{bail, Context, Result};
use cs_runtime::{LedgerService, RuntimeConfig, Script};
use cs_telemetry::TelemetryConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    cs_telemetry::init_telemetry(&TelemetryConfig::from_env())?;

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: cs-node <script.json>");
    };

    let config = RuntimeConfig::from_env()?;
    let token_config = config
        .token_config()
        .context("runtime configuration rejected")?;
    let service = LedgerService::deploy(token_config)?;

    let script = Script::load(&path).await?;
    info!(path = %path, calls = script.calls.len(), "Script loaded");

    for (account, amount) in script.balances {
        service.fund(account, amount);
    }

    let mut rejected = 0usize;
    for envelope in script.calls {
        let receipt = service.submit(envelope);
        if !receipt.is_accepted() {
            rejected += 1;
        }
        println!("{}", serde_json::to_string(&receipt)?);
    }

    let events = service.read(|token| token.events().records().to_vec());
    println!("{}", serde_json::to_string_pretty(&events)?);

    info!(
        events = events.len(),
        rejected,
        escrow = %service.read(|token| token.escrow_balance()),
        "Script finished"
    );
    Ok(())
}
