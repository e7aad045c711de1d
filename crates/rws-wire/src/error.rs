/// Errors raised by bit-level reads and writes.
///
/// Every variant carries the offsets and widths involved so a failing
/// carrier can be traced back to the exact bit position in the stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A value does not fit in the field width it was written into.
    #[error("value {value} does not fit in {width} bits")]
    Overflow { value: u64, width: usize },

    /// A read ran past the end of the bit sequence.
    #[error("read of {width} bits at offset {offset} exceeds sequence of {len} bits")]
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// Field widths are limited to what a `u64` can hold.
    #[error("field width {width} exceeds the 64-bit limit")]
    WidthTooLarge { width: usize },
}
