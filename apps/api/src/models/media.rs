//! Inline media references — a file's media type and base64 payload carried
//! together as one `data:<media-type>;base64,<payload>` string.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    #[error("expected a 'data:' URI")]
    MissingScheme,

    #[error("expected ';base64,' after the media type")]
    NotBase64,

    #[error("media type is missing")]
    MissingMediaType,

    #[error("payload is not valid base64")]
    InvalidPayload,
}

/// A file passed to the generative backend by value.
///
/// `data` is always valid standard-alphabet base64; both constructors check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMedia {
    media_type: String,
    data: String,
}

impl InlineMedia {
    /// Encodes raw file bytes.
    pub fn from_bytes(media_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            media_type: normalize_media_type(&media_type.into()),
            data: STANDARD.encode(bytes),
        }
    }

    /// Parses `data:<media-type>[;params];base64,<payload>`.
    pub fn parse_data_uri(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::NotBase64)?;
        let header = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::NotBase64)?;

        let media_type = normalize_media_type(header);
        if media_type.is_empty() {
            return Err(DataUriError::MissingMediaType);
        }

        STANDARD
            .decode(payload)
            .map_err(|_| DataUriError::InvalidPayload)?;

        Ok(Self {
            media_type,
            data: payload.to_string(),
        })
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The base64 payload, without the `data:` header.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Size of the file before base64 expansion.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|&b| b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }

    pub fn decode(&self) -> Vec<u8> {
        // `data` is validated at construction.
        STANDARD.decode(&self.data).unwrap_or_default()
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

impl fmt::Display for InlineMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_data_uri())
    }
}

impl Serialize for InlineMedia {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> Deserialize<'de> for InlineMedia {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        InlineMedia::parse_data_uri(&raw).map_err(serde::de::Error::custom)
    }
}

/// Drops parameters such as `;charset=utf-8` and lower-cases the essence.
fn normalize_media_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
