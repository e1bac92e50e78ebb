//! HTTP plumbing shared by every provider client.
//!
//! # Main Components
//!
//! - [`HttpTransport`] - Trait the clients send requests through
//! - [`ReqwestTransport`] - Production transport with a per-request timeout
//! - [`RetryPolicy`] - Bounded retries with exponential backoff
//! - [`TransportError`] - Failures where no response was received
//!
//! # Testing
//!
//! See [`mock`] module for an in-memory transport with expectation tracking.

pub mod error;
pub mod mock;
pub mod retry;
pub mod transport;

pub use error::*;
pub use retry::*;
pub use transport::*;
