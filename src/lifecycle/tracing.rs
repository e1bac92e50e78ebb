//! # Observability & Tracing
//!
//! Structured logging for the relay, configured through `RUST_LOG`.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Pipeline milestones (menu source, batch size, submit outcome)
//! RUST_LOG=info order-relay data/employee_orders.xml
//!
//! # Full payloads: every resolved order line and the outgoing batch
//! RUST_LOG=debug order-relay data/employee_orders.xml
//!
//! # Only the HTTP plumbing
//! RUST_LOG=order_relay::framework=debug order-relay data/employee_orders.xml
//! ```
//!
//! ## What Gets Traced
//!
//! - **Menu resolution**: live vs snapshot source, and why the fallback was taken
//! - **Retries**: every retried request with its delay and reason
//! - **Batch assembly**: order and dish counts, skipped and absent employees
//! - **Submission**: accepted or rejected status
//!
//! With `RUST_LOG=info` a successful run looks like:
//!
//! ```text
//! INFO run_file: Pipeline started path="data/employee_orders.xml"
//! INFO run_file:resolve_menu: Menu resolved dishes=12 source=live
//! INFO run_file:build: Batch built orders=2 dishes=3 skipped=0 absent=0
//! INFO run_file:submit: Sending bulk order orders=2
//! INFO run_file:submit: Bulk order accepted status=201 orders=2
//! ```
//!
//! Logs go to stderr so that stdout only carries the run result.

/// Installs the global subscriber. Calling it again is a no-op.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Span names already say where a line comes from
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
