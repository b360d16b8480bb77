//! Prometheus metrics for the claimable share ledger.
//!
//! All metrics follow the naming convention: `cs_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CALL METRICS
    // =========================================================================

    /// Calls executed, by call kind and outcome
    pub static ref CALLS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("cs_runtime_calls_total", "Total calls executed by the runtime"),
        &["call", "outcome"]  // outcome: accepted/rejected
    ).expect("metric creation failed");

    /// Rejected calls, by error kind
    pub static ref CALL_ERRORS: CounterVec = CounterVec::new(
        Opts::new("cs_runtime_call_errors_total", "Total rejected calls by error kind"),
        &["kind"]
    ).expect("metric creation failed");

    // =========================================================================
    // RECOVERY METRICS
    // =========================================================================

    /// Claim lifecycle transitions
    pub static ref CLAIMS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("cs_recovery_claims_total", "Claim lifecycle transitions"),
        &["transition"]  // declared/resolved/deleted/cleared
    ).expect("metric creation failed");

    /// Native value currently escrowed for live claims
    pub static ref COLLATERAL_ESCROWED: Gauge = Gauge::new(
        "cs_recovery_collateral_escrowed_wei",
        "Native value held in escrow for live claims"
    ).expect("metric creation failed");

    /// Live claims
    pub static ref LIVE_CLAIMS: Gauge = Gauge::new(
        "cs_recovery_live_claims",
        "Number of open claims"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CALLS_TOTAL.clone()),
        Box::new(CALL_ERRORS.clone()),
        Box::new(CLAIMS_TOTAL.clone()),
        Box::new(COLLATERAL_ESCROWED.clone()),
        Box::new(LIVE_CLAIMS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record one executed call.
pub fn record_call(call: &str, rejected_kind: Option<&str>) {
    match rejected_kind {
        None => CALLS_TOTAL.with_label_values(&[call, "accepted"]).inc(),
        Some(kind) => {
            CALLS_TOTAL.with_label_values(&[call, "rejected"]).inc();
            CALL_ERRORS.with_label_values(&[kind]).inc();
        }
    }
}

/// Record a claim lifecycle transition.
pub fn record_claim_transition(transition: &str) {
    CLAIMS_TOTAL.with_label_values(&[transition]).inc();
}

/// Publish the escrow gauges.
pub fn set_escrow(collateral_wei: f64, live_claims: usize) {
    COLLATERAL_ESCROWED.set(collateral_wei);
    LIVE_CLAIMS.set(live_claims as f64);
}
