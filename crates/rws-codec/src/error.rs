use rws_wire::WireError;

/// Errors that can occur while hiding or recovering a payload.
///
/// Error hierarchy:
///
/// ```text
///   CodecError
///   ├── Overflow                 ← carrier value does not fit its bit field
///   ├── InsufficientCarriers     ← too few carriers to even hold the header
///   ├── MalformedCarrier         ← carrier text missing or not the expected number
///   ├── AmbiguousWhitespaceTail  ← final fragment cannot be classified
///   ├── Canonicalize             ← injected serializer failed
///   └── Wire(WireError)          ← bit-level Overflow / OutOfRange
/// ```
///
/// Running out of carriers *after* the length header has been read is not
/// an error: decoders return a truncated [`DecodedPayload`](crate::DecodedPayload)
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("carrier {index}: {field} value {value} does not fit in {width} bits")]
    Overflow {
        index: usize,
        field: &'static str,
        value: i128,
        width: usize,
    },

    #[error("need at least {needed} carriers, found {available}")]
    InsufficientCarriers { needed: usize, available: usize },

    #[error("carrier {index}: malformed {field} {text:?}: {reason}")]
    MalformedCarrier {
        index: usize,
        field: &'static str,
        text: String,
        reason: &'static str,
    },

    /// The final fragment ends in a glyph but also carries markup, so it is
    /// neither a clean glyph tail nor a clean cover line.
    #[error("final fragment ({len} chars) mixes markup with trailing whitespace")]
    AmbiguousWhitespaceTail { len: usize },

    #[error("canonical serialization failed: {0}")]
    Canonicalize(String),

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl CodecError {
    pub(crate) fn malformed(
        index: usize,
        field: &'static str,
        text: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::MalformedCarrier {
            index,
            field,
            text: text.into(),
            reason,
        }
    }
}

/// A scheme name that is not one of `grass`, `whitespace`, `fractional`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scheme {0:?}, expected grass|whitespace|fractional")]
pub struct UnknownScheme(pub String);
