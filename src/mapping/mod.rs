//! Record mapping: decoded employee records into the bulk order batch.
//!
//! - [`CustomerRecordMapper`] turns one record into a customer document.
//! - [`OrderBatchBuilder`] runs the mapper over every record under one
//!   [`RecordPolicy`].

pub mod batch;
pub mod customer;
pub mod error;

pub use batch::*;
pub use customer::*;
pub use error::*;
