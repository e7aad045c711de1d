use rws_codec::CodecError;

/// Errors raised while working on a save document.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Variant      │ Cause                                                │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ Parse        │ Save text is not well-formed XML                     │
/// │ Emit         │ The XML writer failed while pretty printing          │
/// │ NotUtf8      │ Pretty-printed output was not valid UTF-8            │
/// │ MissingPath  │ The configured things path does not exist            │
/// │ Codec        │ The selected codec rejected the carriers             │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save is not well-formed XML: {0}")]
    Parse(#[from] xmltree::ParseError),

    #[error("failed to write XML: {0}")]
    Emit(#[from] xmltree::Error),

    #[error("serialized XML is not UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("save has no element at {path:?}")]
    MissingPath { path: String },

    #[error(transparent)]
    Codec(#[from] CodecError),
}
