//! Type-safe wrappers around the provider API.

pub mod api_client;
pub mod error;
pub mod menu_client;
pub mod order_client;

pub use api_client::*;
pub use error::*;
pub use menu_client::*;
pub use order_client::*;
