use std::fmt;
use std::str::FromStr;

use crate::error::UnknownScheme;

/// The three carriers a save file offers for hidden data.
///
/// ```text
/// ┌────────────┬──────────────────────────────┬─────────────────────────┐
/// │ Scheme     │ Carrier                      │ Framing                 │
/// ├────────────┼──────────────────────────────┼─────────────────────────┤
/// │ Field      │ grass thing sub-fields       │ 22-bit bit count        │
/// │ Whitespace │ one glyph per line ending    │ none (end-of-data sniff)│
/// │ Fractional │ thousandths of decimal leaves│ 4 carriers, byte count  │
/// └────────────┴──────────────────────────────┴─────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    #[default]
    Field,
    Whitespace,
    Fractional,
}

impl SchemeKind {
    pub const ALL: [SchemeKind; 3] = [
        SchemeKind::Field,
        SchemeKind::Whitespace,
        SchemeKind::Fractional,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SchemeKind::Field => "grass",
            SchemeKind::Whitespace => "whitespace",
            SchemeKind::Fractional => "fractional",
        }
    }

    /// Whether a decoder can tell payload from padding without guessing.
    pub const fn has_length_header(self) -> bool {
        !matches!(self, SchemeKind::Whitespace)
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemeKind {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grass" | "field" => Ok(SchemeKind::Field),
            "whitespace" | "ws" => Ok(SchemeKind::Whitespace),
            "fractional" | "float" => Ok(SchemeKind::Fractional),
            _ => Err(UnknownScheme(s.to_string())),
        }
    }
}
