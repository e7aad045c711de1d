use rws_wire::Bits;
use tracing::{debug, warn};

use crate::error::CodecError;
use crate::report::{DecodedPayload, EncodeReport};
use crate::scheme::SchemeKind;

/// Line terminator of an encoded document.
pub const LINE_BREAK: &str = "\r\n";

/// Glyph for a `0` bit.
pub const ZERO_GLYPH: char = ' ';

/// Glyph for a `1` bit.
pub const ONE_GLYPH: char = '\t';

/// Re-serializes markup into a canonical, one-element-per-line layout.
///
/// The whitespace codec needs every line break to sit where the decoder
/// will look for it, so the cover is always pushed through the same
/// pretty printer before glyphs are attached.
pub trait Canonicalize {
    /// # Errors
    ///
    /// Returns [`CodecError::Canonicalize`] if `markup` cannot be parsed.
    fn canonicalize(&self, markup: &str) -> Result<String, CodecError>;
}

impl<F> Canonicalize for F
where
    F: Fn(&str) -> Result<String, CodecError>,
{
    fn canonicalize(&self, markup: &str) -> Result<String, CodecError> {
        self(markup)
    }
}

/// Result of interleaving a payload into a cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interleaved {
    pub text: String,
    pub report: EncodeReport,
}

/// Hides a payload in the whitespace at the end of each line.
///
/// Every byte becomes eight glyphs (space = 0, tab = 1), and glyph `i` is
/// appended to canonical line `i` just before its line break:
///
/// ```text
///   <savegame>␠\r\n          bit 0 = 0
///     <meta>⇥\r\n            bit 1 = 1
///       <gameVersion>…⇥\r\n  bit 2 = 1
///       …
///   </savegame>\r\n          no glyph: payload ended
/// ```
///
/// Glyphs left over once the lines run out are appended after the final
/// line break as a bare tail.
///
/// There is no length field. The decoder collects glyphs until it meets a
/// line without one, then sniffs the final fragment for a glyph tail. A
/// cover line that naturally ends in a space or tab is indistinguishable
/// from payload, so this scheme is lossy at that edge.
pub struct WhitespaceCodec;

impl WhitespaceCodec {
    /// Payload bits the canonical lines can hold without spilling.
    pub fn capacity_bits(lines: &[String]) -> usize {
        lines.len()
    }

    /// Canonicalize a raw cover document into glyph-carrying lines.
    ///
    /// # Errors
    ///
    /// Propagates any failure of `canon`.
    pub fn cover_lines(cover: &str, canon: &impl Canonicalize) -> Result<Vec<String>, CodecError> {
        let tokens = extract_tags(&strip_layout(cover));
        canonical_lines(&tokens, canon)
    }

    /// Hide `payload` in a raw cover document.
    ///
    /// # Errors
    ///
    /// Propagates any failure of `canon`.
    pub fn encode(
        cover: &str,
        payload: &[u8],
        canon: &impl Canonicalize,
    ) -> Result<Interleaved, CodecError> {
        let lines = Self::cover_lines(cover, canon)?;
        Ok(Self::encode_lines(&lines, payload))
    }

    /// Hide `payload` in lines that are already canonical.
    pub fn encode_lines(lines: &[String], payload: &[u8]) -> Interleaved {
        let glyphs = bytes_to_glyphs(payload);
        let glyph_count = glyphs.chars().count();
        let text = intersperse(lines, &glyphs);

        let carriers_used = glyph_count.min(lines.len());
        let spilled_bits = glyph_count - carriers_used;
        if spilled_bits > 0 {
            warn!(
                lines = lines.len(),
                spilled_bits, "payload exceeds line count; glyphs appended as bare tail"
            );
        }
        debug!(glyphs = glyph_count, lines = lines.len(), "whitespace encode complete");

        Interleaved {
            text,
            report: EncodeReport {
                scheme: SchemeKind::Whitespace,
                requested_bits: glyph_count,
                stored_bits: glyph_count,
                capacity_bits: lines.len(),
                carriers_used,
                spilled_bits,
            },
        }
    }

    /// Recover the glyphs of an encoded document as bytes.
    ///
    /// Without a length field the declared and recovered sizes are both the
    /// glyph count, so the result is never marked truncated.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::AmbiguousWhitespaceTail`] if the final fragment
    /// ends in a glyph but also contains markup.
    pub fn decode(encoded: &str) -> Result<DecodedPayload, CodecError> {
        let glyphs = extract_glyphs(encoded)?;
        let count = glyphs.chars().count();
        debug!(glyphs = count, "whitespace decode complete");

        Ok(DecodedPayload {
            bytes: glyphs_to_bytes(&glyphs),
            declared_bits: count,
            recovered_bits: count,
            carriers_used: count,
        })
    }
}

/// Drop line breaks and tabs, the layout whitespace of a save file.
///
/// Spaces are kept: they separate attributes inside tags.
pub fn strip_layout(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Split stripped markup wherever one tag immediately follows another.
///
/// Text between `>` and the next `<` stays attached to its tags, so
/// `<gameVersion>1.4.3901 rev261</gameVersion>` remains one token.
/// Concatenating the tokens gives back the input.
pub fn extract_tags(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = text.split("><").collect();
    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let open = if i > 0 { "<" } else { "" };
            let close = if i < last { ">" } else { "" };
            format!("{open}{part}{close}")
        })
        .collect()
}

/// Join the tokens and pretty print them, one canonical line per entry.
///
/// # Errors
///
/// Propagates any failure of `canon`.
pub fn canonical_lines(
    tokens: &[String],
    canon: &impl Canonicalize,
) -> Result<Vec<String>, CodecError> {
    let text = canon.canonicalize(&tokens.concat())?;
    Ok(text.lines().map(str::to_owned).collect())
}

pub fn bytes_to_glyphs(bytes: &[u8]) -> String {
    Bits::from_bytes(bytes)
        .iter()
        .map(|bit| if bit { ONE_GLYPH } else { ZERO_GLYPH })
        .collect()
}

/// Map glyphs back to bits. Characters other than tab count as `0`;
/// [`extract_glyphs`] never yields any.
pub fn glyphs_to_bits(glyphs: &str) -> Bits {
    glyphs.chars().map(|c| c == ONE_GLYPH).collect()
}

/// Pack glyphs into bytes, zero-padding a partial final byte.
pub fn glyphs_to_bytes(glyphs: &str) -> Vec<u8> {
    glyphs_to_bits(glyphs).to_bytes()
}

pub fn is_glyph(c: char) -> bool {
    c == ZERO_GLYPH || c == ONE_GLYPH
}

/// Attach one glyph to the end of each line.
///
/// ```text
///   lines > glyphs:  line+glyph CRLF … line CRLF line CRLF
///   lines ≤ glyphs:  line+glyph CRLF … line+glyph CRLF glyph glyph …
/// ```
pub fn intersperse(lines: &[String], glyphs: &str) -> String {
    let glyphs: Vec<char> = glyphs.chars().collect();
    let paired = lines.len().min(glyphs.len());

    let mut out = String::new();
    for (line, &glyph) in lines.iter().zip(&glyphs) {
        out.push_str(line);
        out.push(glyph);
        out.push_str(LINE_BREAK);
    }

    if lines.len() > glyphs.len() {
        out.push_str(&lines[paired..].join(LINE_BREAK));
        out.push_str(LINE_BREAK);
    } else {
        out.extend(&glyphs[paired..]);
    }
    out
}

/// Collect the glyph sequence from an encoded document.
///
/// Every line but the last contributes its final character while that
/// character is a glyph; the first line without one ends the scan. If no
/// line ended the scan, the final fragment is classified:
///
/// ```text
/// ┌─────────────────────────────┬─────────────────────────────────────┐
/// │ Final fragment              │ Treatment                           │
/// ├─────────────────────────────┼─────────────────────────────────────┤
/// │ empty                       │ nothing more                        │
/// │ only spaces and tabs        │ every character is a glyph          │
/// │ markup, ends in non-glyph   │ cover text, discarded               │
/// │ markup, ends in a glyph     │ AmbiguousWhitespaceTail             │
/// └─────────────────────────────┴─────────────────────────────────────┘
/// ```
///
/// # Errors
///
/// Returns [`CodecError::AmbiguousWhitespaceTail`] for the last row above.
pub fn extract_glyphs(encoded: &str) -> Result<String, CodecError> {
    let fragments: Vec<&str> = encoded.split(LINE_BREAK).collect();
    let Some((tail, lines)) = fragments.split_last() else {
        return Ok(String::new());
    };

    let mut glyphs = String::new();
    for line in lines {
        match line.chars().last() {
            Some(c) if is_glyph(c) => glyphs.push(c),
            _ => return Ok(glyphs),
        }
    }

    if tail.chars().all(is_glyph) {
        glyphs.push_str(tail);
    } else if tail.chars().last().is_some_and(is_glyph) {
        return Err(CodecError::AmbiguousWhitespaceTail {
            len: tail.chars().count(),
        });
    }
    Ok(glyphs)
}
