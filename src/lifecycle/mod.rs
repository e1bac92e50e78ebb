//! # Run Lifecycle & Orchestration
//!
//! Everything around the core transformation that one relay run needs:
//!
//! 1. **Configuration** - [`Config`] with defaults, overridden from the environment
//! 2. **Wiring** - [`OrderPipeline`] builds the transport and clients and injects them
//! 3. **Error reporting** - [`PipelineError`] and its structured [`ErrorReport`]
//! 4. **Observability** - [`setup_tracing`]
//!
//! ## Dependency Injection
//!
//! The HTTP transport is constructed explicitly and passed in. Production code
//! uses [`OrderPipeline::from_config`]; tests hand a
//! [`MockTransport`](crate::framework::mock::MockTransport) to
//! [`OrderPipeline::new`]:
//!
//! ```rust,ignore
//! let mut mock = MockTransport::new();
//! mock.expect_get("menu").return_json(200, &menu);
//! mock.expect_post("bulk/order").return_status(201, "");
//!
//! let pipeline = OrderPipeline::new(&Config::default(), mock.transport());
//! pipeline.run(xml).await?;
//! mock.verify();
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use pipeline::*;
pub use self::tracing::setup_tracing;
