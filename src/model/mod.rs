//! Pure data structures for the order domain.

pub mod order;
pub mod status;

pub use order::*;
pub use status::*;
