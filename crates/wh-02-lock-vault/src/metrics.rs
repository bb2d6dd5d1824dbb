//! # Vault Metrics
//!
//! Prometheus metrics for lock lifecycle activity.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! wh-02-lock-vault = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `vault_deposits_total` - Counter of accepted deposits
//! - `vault_commitments_total` - Counter of committed unlock parameters
//! - `vault_withdrawals_total` - Counter of completed withdrawals
//! - `vault_rejections_total` - Counter of rejected operations (by operation and reason)
//! - `vault_oracle_failures_total` - Counter of failed price reads
//! - `vault_active_locks` - Gauge of locks holding value

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total deposits accepted
    pub static ref DEPOSITS: IntCounter = register_int_counter!(
        "vault_deposits_total",
        "Total number of deposits accepted"
    )
    .expect("Failed to create DEPOSITS metric");

    /// Total parameter commitments
    pub static ref COMMITMENTS: IntCounter = register_int_counter!(
        "vault_commitments_total",
        "Total number of unlock parameter commitments"
    )
    .expect("Failed to create COMMITMENTS metric");

    /// Total withdrawals completed
    pub static ref WITHDRAWALS: IntCounter = register_int_counter!(
        "vault_withdrawals_total",
        "Total number of withdrawals completed"
    )
    .expect("Failed to create WITHDRAWALS metric");

    /// Rejected operations, labeled by operation and reason
    pub static ref REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "vault_rejections_total",
        "Total number of rejected vault operations",
        &["operation", "reason"]
    )
    .expect("Failed to create REJECTIONS metric");

    /// Failed oracle reads during predicate evaluation
    pub static ref ORACLE_FAILURES: IntCounter = register_int_counter!(
        "vault_oracle_failures_total",
        "Total number of failed oracle reads"
    )
    .expect("Failed to create ORACLE_FAILURES metric");

    /// Locks currently holding value
    pub static ref ACTIVE_LOCKS: IntGauge = register_int_gauge!(
        "vault_active_locks",
        "Number of locks currently holding value"
    )
    .expect("Failed to create ACTIVE_LOCKS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an accepted deposit
#[cfg(feature = "metrics")]
pub fn record_deposit() {
    DEPOSITS.inc();
}

/// Record a parameter commitment
#[cfg(feature = "metrics")]
pub fn record_commitment() {
    COMMITMENTS.inc();
}

/// Record a completed withdrawal
#[cfg(feature = "metrics")]
pub fn record_withdrawal() {
    WITHDRAWALS.inc();
}

/// Record a rejected operation
#[cfg(feature = "metrics")]
pub fn record_rejection(operation: &str, reason: &str) {
    REJECTIONS.with_label_values(&[operation, reason]).inc();
}

/// Record a failed oracle read
#[cfg(feature = "metrics")]
pub fn record_oracle_failure() {
    ORACLE_FAILURES.inc();
}

/// Update active locks gauge
#[cfg(feature = "metrics")]
pub fn set_active_locks(count: usize) {
    ACTIVE_LOCKS.set(count as i64);
}

/// Render every registered metric in the Prometheus text format.
#[cfg(feature = "metrics")]
pub fn render() -> String {
    let mut buffer = Vec::new();
    if TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .is_err()
    {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_deposit() {}

#[cfg(not(feature = "metrics"))]
pub fn record_commitment() {}

#[cfg(not(feature = "metrics"))]
pub fn record_withdrawal() {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_operation: &str, _reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_oracle_failure() {}

#[cfg(not(feature = "metrics"))]
pub fn set_active_locks(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn render() -> String {
    String::new()
}
