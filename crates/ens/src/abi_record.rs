//! ENSIP-4 ABI record encoding.

use crate::CodecError;
use alloy_primitives::Bytes;
use flate2::{Compression, write::ZlibEncoder};
use serde_json::Value;
use std::{fmt, io::Write, str::FromStr};

/// Content type of an ABI record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AbiEncoding {
    /// UTF-8 JSON.
    #[default]
    Json,
    /// zlib-compressed JSON.
    Zlib,
    /// CBOR.
    Cbor,
    /// A URI pointing at the ABI.
    Uri,
}

impl AbiEncoding {
    /// Returns the ENSIP-4 content type bit.
    pub const fn content_type(self) -> u64 {
        match self {
            Self::Json => 1,
            Self::Zlib => 2,
            Self::Cbor => 4,
            Self::Uri => 8,
        }
    }
}

impl FromStr for AbiEncoding {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "zlib" => Ok(Self::Zlib),
            "cbor" => Ok(Self::Cbor),
            "uri" => Ok(Self::Uri),
            other => Err(CodecError::InvalidAbi(format!(
                "unknown encoding `{other}`, expected one of json, zlib, cbor, uri"
            ))),
        }
    }
}

impl fmt::Display for AbiEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Zlib => "zlib",
            Self::Cbor => "cbor",
            Self::Uri => "uri",
        })
    }
}

/// An ABI ready to be passed to `setABI`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAbi {
    /// ENSIP-4 content type.
    pub content_type: u64,
    /// Encoded payload, empty to clear the record.
    pub data: Bytes,
}

impl EncodedAbi {
    /// Encodes `abi` with `encoding`. `None` produces an empty payload which clears the record.
    pub fn encode(encoding: AbiEncoding, abi: Option<&Value>) -> Result<Self, CodecError> {
        let data = match abi {
            None => Vec::new(),
            Some(abi) => match encoding {
                AbiEncoding::Json => serde_json::to_vec(abi).map_err(invalid)?,
                AbiEncoding::Zlib => {
                    let json = serde_json::to_vec(abi).map_err(invalid)?;
                    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                    encoder.write_all(&json).map_err(invalid)?;
                    encoder.finish().map_err(invalid)?
                }
                AbiEncoding::Cbor => {
                    let mut out = Vec::new();
                    ciborium::into_writer(abi, &mut out).map_err(invalid)?;
                    out
                }
                AbiEncoding::Uri => match abi {
                    Value::String(uri) => uri.as_bytes().to_vec(),
                    _ => return Err(CodecError::InvalidAbi("uri encoding expects a string".into())),
                },
            },
        };
        Ok(Self { content_type: encoding.content_type(), data: data.into() })
    }

    /// Returns `true` if this clears the record.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn invalid(err: impl fmt::Display) -> CodecError {
    CodecError::InvalidAbi(err.to_string())
}
