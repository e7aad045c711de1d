#![warn(clippy::pedantic)]

pub mod carrier;
pub mod decimal;
pub mod error;
pub mod field;
pub mod fractional;
pub mod report;
pub mod scheme;
pub mod whitespace;

pub use carrier::{DecimalEdit, DecimalView, FloatCell, Grass, GrassEdit, GrassField, GrassView};
pub use decimal::DecimalText;
pub use error::{CodecError, UnknownScheme};
pub use field::FieldCodec;
pub use fractional::FractionalCodec;
pub use report::{DecodedPayload, EncodeReport};
pub use scheme::SchemeKind;
pub use whitespace::{Canonicalize, Interleaved, WhitespaceCodec};
