//! Markup decoding: raw document text into a generic [`Node`] tree.
//!
//! The decoder knows nothing about employees or orders. It produces the same
//! nested mapping/sequence shape for any well-formed document, which the
//! [`mapping`](crate::mapping) layer then reads by known keys.

pub mod error;
pub mod node;
pub mod parser;

pub use error::*;
pub use node::*;
pub use parser::*;
