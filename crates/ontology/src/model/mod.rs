//! Value types shared by every record.
//!
//! - [`Timestamp`]: an instant that remembers the offset it was written in
//! - [`QuantitativeValue`]: a magnitude with a unit code, convertible to and
//!   from typed [`Measurement`](crate::units::Measurement)s

pub mod quantity;
pub mod timestamp;

pub use quantity::QuantitativeValue;
pub use timestamp::Timestamp;
