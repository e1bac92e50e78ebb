//! # Order Relay
//!
//! > **Bulk lunch orders from an employee list to the food provider's API.**
//!
//! This crate reads employee food-order records written as XML, turns every
//! employee into a normalized customer document, resolves dish names to the
//! provider's dish identifiers, and submits the whole batch in one request.
//!
//! ## 🏗️ Pipeline
//!
//! ```text
//! markup ──parse──▶ Node ──build──▶ OrderBatch ──submit──▶ bulk/order
//!                              ▲
//!                  menu ──resolve_menu──▶ MenuIndex
//! ```
//!
//! 1. [`markup::parse`] decodes the document into a generic [`markup::Node`] tree.
//! 2. [`clients::MenuClient::resolve_menu`] fetches the dish catalog, falling
//!    back to a local snapshot when the live endpoint is unusable.
//! 3. [`mapping::OrderBatchBuilder`] maps every `Employee` through
//!    [`mapping::CustomerRecordMapper`], which parses order lines such as
//!    `"3x Pizza Quattro Formaggi"` and resolves each dish.
//! 4. [`clients::OrderClient::submit`] posts the batch and reports acceptance,
//!    rejection (with status) or transport failure.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each layer defines its own error enum (`MarkupParseError`, `RecordError`,
//! `MenuUnavailableError`, `SubmitError`, ...). They compose into
//! [`lifecycle::PipelineError`] through `#[from]`, so a caller can always tell
//! which stage failed and never mistakes a failure for a success.
//!
//! ### 2. One Explicit Record Policy
//! A record with a malformed order line or an unknown dish fails as a whole.
//! What that means for the batch is decided once per run by
//! [`mapping::RecordPolicy`]: abort everything, or skip and report the record.
//!
//! ### 3. Injected Transport
//! There is no global HTTP session. [`framework::HttpTransport`] is constructed
//! explicitly and injected, which is also how tests swap in
//! [`framework::mock::MockTransport`].
//!
//! ### 4. Observability
//! We use `tracing` everywhere with structured fields. See the
//! [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: HTTP plumbing (transport trait, retry policy, mock).
//! - [`clients`]: The provider endpoints (`menu`, `bulk/order`).
//! - [`markup`]: Document decoding.
//! - [`model`]: Order lines, the dish index and the wire documents.
//! - [`mapping`]: Record mapping and batch assembly.
//! - [`lifecycle`]: Configuration, wiring and tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Submit data/employee_orders.xml with info logs
//! RUST_LOG=info cargo run -- data/employee_orders.xml
//!
//! # Print the batch without submitting it
//! cargo run -- --dry-run data/employee_orders.xml
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod mapping;
pub mod markup;
pub mod model;
