use super::settings::TokenizerSettings;
use super::Tokenizer;
use crate::binary::BinaryTokenizer;
use crate::json::JsonTokenizer;
use mime::Mime;
use std::str::FromStr;
use thiserror::Error;

/// An error that occurs when a content type doesn't map to any supported wire format.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("Content type `{0}` is not supported.")]
pub struct UnsupportedFormatError(pub String);

/// Wire formats with a [`Tokenizer`] implementation.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum DataFormat {
    /// JSON text, see [`JsonTokenizer`].
    Json,
    /// Tagged binary framing, see [`BinaryTokenizer`].
    Binary,
}

impl DataFormat {
    /// Subtype of the `application/*` content type of the tagged binary format.
    pub const BINARY_SUBTYPE: &'static str = "x-tagged-data";

    /// Picks the format for a content type. Parameters such as `charset` are ignored.
    pub fn from_mime(mime: &Mime) -> Option<Self> {
        if mime.type_() != mime::APPLICATION {
            return None;
        }

        if mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON) {
            Some(DataFormat::Json)
        } else if mime.subtype() == Self::BINARY_SUBTYPE {
            Some(DataFormat::Binary)
        } else {
            None
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DataFormat::Json => "application/json",
            DataFormat::Binary => "application/x-tagged-data",
        }
    }

    /// Creates a tokenizer for the format. Drivers that use it depend only on the
    /// [`Tokenizer`] trait.
    pub fn tokenizer<'i>(self, settings: &TokenizerSettings) -> Box<dyn Tokenizer<'i> + 'i> {
        match self {
            DataFormat::Json => Box::new(JsonTokenizer::new(settings)),
            DataFormat::Binary => Box::new(BinaryTokenizer::new(settings)),
        }
    }
}

impl FromStr for DataFormat {
    type Err = UnsupportedFormatError;

    fn from_str(content_type: &str) -> Result<Self, Self::Err> {
        content_type
            .parse::<Mime>()
            .ok()
            .as_ref()
            .and_then(DataFormat::from_mime)
            .ok_or_else(|| UnsupportedFormatError(content_type.to_owned()))
    }
}
