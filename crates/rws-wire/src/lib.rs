#![warn(clippy::pedantic)]

pub mod bits;
pub mod error;
pub mod framing;

pub use bits::Bits;
pub use error::WireError;
pub use framing::{Clamp, FIELD_LENGTH_HEADER, FRACTIONAL_LENGTH_HEADER, LengthHeader};
