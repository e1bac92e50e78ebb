//! Pure data structures: order lines, the dish index and the wire documents.

pub mod document;
pub mod employee;
pub mod error;
pub mod menu;
pub mod order_line;

pub use document::*;
pub use employee::*;
pub use error::*;
pub use menu::*;
pub use order_line::*;
