#![warn(clippy::pedantic)]

pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod scheme;

pub use config::SaveConfig;
pub use discovery::{
    FloatElement, GrassElement, find_floats, find_floats_mut, find_grass, find_grass_mut,
};
pub use document::{XmlCanonicalizer, load, pretty_print};
pub use error::SaveError;
pub use scheme::{
    Capacity, Concealed, DefaultSteganographer, FieldScheme, FractionalScheme, Steganographer,
    WhitespaceScheme,
};
