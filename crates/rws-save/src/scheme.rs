use rws_codec::{
    DecodedPayload, EncodeReport, FieldCodec, FractionalCodec, SchemeKind, WhitespaceCodec,
};
use tracing::debug;

use crate::config::SaveConfig;
use crate::discovery::{find_floats, find_floats_mut, find_grass, find_grass_mut};
use crate::document::{XmlCanonicalizer, load, pretty_print};
use crate::error::SaveError;

/// A save document with a payload hidden in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Concealed {
    pub document: String,
    pub report: EncodeReport,
}

/// How much a save can hold under one scheme.
///
/// For the whitespace scheme `carriers` counts canonical lines; glyphs past
/// that spill into a bare tail, which still decodes but is not counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capacity {
    pub scheme: SchemeKind,
    pub carriers: usize,
    pub payload_bits: usize,
}

/// Hides payloads in save text and recovers them.
///
/// Every operation takes the whole save as text and is a pure function of
/// its inputs: conceal returns a new document rather than editing a file.
///
/// ```text
///   save text ──▶ load ──▶ discover carriers ──▶ codec ──▶ pretty print
///                 │                              │
///            SaveConfig                    EncodeReport
/// ```
pub trait Steganographer {
    /// # Errors
    ///
    /// Returns [`SaveError`] if the save cannot be parsed or the codec
    /// rejects its carriers.
    fn conceal(
        &self,
        save: &str,
        payload: &[u8],
        config: &SaveConfig,
    ) -> Result<Concealed, SaveError>;

    /// # Errors
    ///
    /// Returns [`SaveError`] if the save cannot be parsed or the codec
    /// rejects its carriers.
    fn reveal(&self, save: &str, config: &SaveConfig) -> Result<DecodedPayload, SaveError>;

    /// # Errors
    ///
    /// Returns [`SaveError`] if the save cannot be parsed or carriers cannot
    /// be located.
    fn capacity(&self, save: &str, config: &SaveConfig) -> Result<Capacity, SaveError>;
}

/// Grass sub-field scheme.
pub struct FieldScheme;

/// Trailing-whitespace scheme.
pub struct WhitespaceScheme;

/// Decimal-fraction scheme.
pub struct FractionalScheme;

/// Dispatches to the scheme named by [`SaveConfig::scheme`].
pub struct DefaultSteganographer;

impl Steganographer for FieldScheme {
    fn conceal(
        &self,
        save: &str,
        payload: &[u8],
        config: &SaveConfig,
    ) -> Result<Concealed, SaveError> {
        let mut root = load(save)?;
        let report = {
            let mut carriers = find_grass_mut(&mut root, config)?;
            debug!(carriers = carriers.len(), "grass carriers found");
            FieldCodec::encode(&mut carriers, payload)?
        };
        Ok(Concealed {
            document: pretty_print(&root, config)?,
            report,
        })
    }

    fn reveal(&self, save: &str, config: &SaveConfig) -> Result<DecodedPayload, SaveError> {
        let root = load(save)?;
        let carriers = find_grass(&root, config)?;
        debug!(carriers = carriers.len(), "grass carriers found");
        Ok(FieldCodec::decode(&carriers)?)
    }

    fn capacity(&self, save: &str, config: &SaveConfig) -> Result<Capacity, SaveError> {
        let root = load(save)?;
        let carriers = find_grass(&root, config)?;
        Ok(Capacity {
            scheme: SchemeKind::Field,
            carriers: carriers.len(),
            payload_bits: FieldCodec::capacity_bits(&carriers),
        })
    }
}

impl Steganographer for WhitespaceScheme {
    fn conceal(
        &self,
        save: &str,
        payload: &[u8],
        config: &SaveConfig,
    ) -> Result<Concealed, SaveError> {
        let encoded = WhitespaceCodec::encode(save, payload, &XmlCanonicalizer::new(config))?;
        Ok(Concealed {
            document: encoded.text,
            report: encoded.report,
        })
    }

    fn reveal(&self, save: &str, _config: &SaveConfig) -> Result<DecodedPayload, SaveError> {
        Ok(WhitespaceCodec::decode(save)?)
    }

    fn capacity(&self, save: &str, config: &SaveConfig) -> Result<Capacity, SaveError> {
        let lines = WhitespaceCodec::cover_lines(save, &XmlCanonicalizer::new(config))?;
        Ok(Capacity {
            scheme: SchemeKind::Whitespace,
            carriers: lines.len(),
            payload_bits: WhitespaceCodec::capacity_bits(&lines),
        })
    }
}

impl Steganographer for FractionalScheme {
    fn conceal(
        &self,
        save: &str,
        payload: &[u8],
        config: &SaveConfig,
    ) -> Result<Concealed, SaveError> {
        let mut root = load(save)?;
        let report = {
            let mut carriers = find_floats_mut(&mut root);
            debug!(carriers = carriers.len(), "decimal carriers found");
            FractionalCodec::encode(&mut carriers, payload)?
        };
        Ok(Concealed {
            document: pretty_print(&root, config)?,
            report,
        })
    }

    fn reveal(&self, save: &str, _config: &SaveConfig) -> Result<DecodedPayload, SaveError> {
        let root = load(save)?;
        let carriers = find_floats(&root);
        debug!(carriers = carriers.len(), "decimal carriers found");
        Ok(FractionalCodec::decode(&carriers)?)
    }

    fn capacity(&self, save: &str, _config: &SaveConfig) -> Result<Capacity, SaveError> {
        let root = load(save)?;
        let carriers = find_floats(&root);
        Ok(Capacity {
            scheme: SchemeKind::Fractional,
            carriers: carriers.len(),
            payload_bits: FractionalCodec::capacity_bytes(&carriers) * 8,
        })
    }
}

impl DefaultSteganographer {
    /// The scheme implementation behind a [`SchemeKind`].
    pub fn delegate(scheme: SchemeKind) -> &'static dyn Steganographer {
        match scheme {
            SchemeKind::Field => &FieldScheme,
            SchemeKind::Whitespace => &WhitespaceScheme,
            SchemeKind::Fractional => &FractionalScheme,
        }
    }
}

impl Steganographer for DefaultSteganographer {
    fn conceal(
        &self,
        save: &str,
        payload: &[u8],
        config: &SaveConfig,
    ) -> Result<Concealed, SaveError> {
        Self::delegate(config.scheme).conceal(save, payload, config)
    }

    fn reveal(&self, save: &str, config: &SaveConfig) -> Result<DecodedPayload, SaveError> {
        Self::delegate(config.scheme).reveal(save, config)
    }

    fn capacity(&self, save: &str, config: &SaveConfig) -> Result<Capacity, SaveError> {
        Self::delegate(config.scheme).capacity(save, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAVE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<savegame>
	<game>
		<maps>
			<li>
				<things>
					<thing Class="Plant"><def>PlantGrass</def><id>PlantGrass1</id><health>80</health><growth>0.51234567</growth><age>1000</age></thing>
					<thing Class="Plant"><def>PlantTallGrass</def><id>PlantTallGrass2</id><health>81</health><growth>0.61234567</growth><age>2000</age></thing>
				</things>
			</li>
		</maps>
		<vals><a>1.5</a><b>2.5</b><c>3.5</c><d>4.5</d><e>5.5</e><f>6.5</f></vals>
	</game>
</savegame>
"#;

    #[test]
    fn every_scheme_roundtrips_through_the_facade() {
        for scheme in SchemeKind::ALL {
            let config = SaveConfig::with_scheme(scheme);
            let concealed = DefaultSteganographer.conceal(SAVE, b"ok", &config).unwrap();
            assert_eq!(concealed.report.scheme, scheme);
            let revealed = DefaultSteganographer.reveal(&concealed.document, &config).unwrap();
            assert_eq!(revealed.bytes, b"ok", "{scheme}");
        }
    }

    #[test]
    fn capacities() {
        let config = SaveConfig::default();
        let grass = FieldScheme.capacity(SAVE, &config).unwrap();
        assert_eq!(grass.carriers, 2);
        assert_eq!(grass.payload_bits, 118);

        let floats = FractionalScheme.capacity(SAVE, &config).unwrap();
        // Both growth values count as decimal leaves too.
        assert_eq!(floats.carriers, 8);
        assert_eq!(floats.payload_bits, 32);
    }

    #[test]
    fn fractional_scheme_uses_exponent_leaves() {
        let config = SaveConfig::with_scheme(SchemeKind::Fractional);
        let save = "<r><a>1.5</a><b>-.5</b><c>1.5E-05</c><d>2.5</d><e>3.5</e><f>4.5</f></r>";
        assert_eq!(FractionalScheme.capacity(save, &config).unwrap().carriers, 6);

        let concealed = DefaultSteganographer.conceal(save, &[0xAB], &config).unwrap();
        assert!(concealed.document.contains("<c>0.000</c>"));
        assert!(concealed.document.contains("<b>-1.000</b>"));
        let revealed = DefaultSteganographer.reveal(&concealed.document, &config).unwrap();
        assert_eq!(revealed.bytes, [0xAB]);
    }

    #[test]
    fn codec_errors_surface_as_save_errors() {
        let config = SaveConfig::with_scheme(SchemeKind::Fractional);
        let save = "<savegame><x>1.5</x></savegame>";
        assert!(matches!(
            DefaultSteganographer.conceal(save, b"x", &config),
            Err(SaveError::Codec(_))
        ));
    }
}
