//! ENSIP-7 content hash codec.
//!
//! A content hash is `varint(codec) ‖ payload`, where the codec is a multicodec namespace code.

use crate::CodecError;
use alloy_primitives::hex;
use data_encoding::{BASE32_NOPAD, BASE64URL_NOPAD};
use std::fmt;

const IPFS: u64 = 0xe3;
const SWARM: u64 = 0xe4;
const IPNS: u64 = 0xe5;
const ONION: u64 = 0x01bc;
const ONION3: u64 = 0x01bd;
const SKYNET: u64 = 0xb19910;
const ARWEAVE: u64 = 0xb29910;

const CID_V1: u8 = 0x01;
const DAG_PB: u64 = 0x70;
const LIBP2P_KEY: u64 = 0x72;
const SWARM_MANIFEST: u64 = 0xfa;
const SHA2_256: u8 = 0x12;
const KECCAK_256: u8 = 0x1b;

/// A decoded content hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentHash {
    /// Protocol name, e.g. `ipfs`.
    pub protocol_type: String,
    /// Protocol specific hash, e.g. a CID for `ipfs`.
    pub decoded: String,
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol_type, self.decoded)
    }
}

/// Decodes the raw bytes of a content hash record.
pub fn decode(data: &[u8]) -> Result<ContentHash, CodecError> {
    let invalid = || CodecError::InvalidContentHash(hex::encode_prefixed(data));
    let (codec, payload) = read_varint(data).ok_or_else(invalid)?;
    let (protocol_type, decoded) = match codec {
        IPFS => ("ipfs", decode_cid(payload).ok_or_else(invalid)?),
        IPNS => ("ipns", decode_cid(payload).ok_or_else(invalid)?),
        SWARM => ("bzz", decode_swarm(payload).ok_or_else(invalid)?),
        ONION => ("onion", String::from_utf8(payload.to_vec()).map_err(|_| invalid())?),
        ONION3 => ("onion3", String::from_utf8(payload.to_vec()).map_err(|_| invalid())?),
        SKYNET => ("sia", BASE64URL_NOPAD.encode(payload)),
        ARWEAVE => ("arweave", BASE64URL_NOPAD.encode(payload)),
        codec => return Err(CodecError::UnsupportedProtocol(format!("{codec:#x}"))),
    };
    Ok(ContentHash { protocol_type: protocol_type.to_string(), decoded })
}

/// Encodes `<protocol>://<hash>` or raw `0x` hex into content hash record bytes.
pub fn encode(value: &str) -> Result<Vec<u8>, CodecError> {
    let value = value.trim();
    let invalid = || CodecError::InvalidContentHash(value.to_string());

    if value.starts_with("0x") {
        let bytes = hex::decode(value).map_err(|_| invalid())?;
        decode(&bytes)?;
        return Ok(bytes);
    }

    let (protocol, hash) = value.split_once("://").ok_or_else(invalid)?;
    let (codec, payload) = match protocol.to_ascii_lowercase().as_str() {
        "ipfs" => (IPFS, encode_cid(hash, DAG_PB).ok_or_else(invalid)?),
        "ipns" => (IPNS, encode_cid(hash, LIBP2P_KEY).ok_or_else(invalid)?),
        "bzz" => (SWARM, encode_swarm(hash).ok_or_else(invalid)?),
        "onion" if hash.len() == 16 => (ONION, hash.as_bytes().to_vec()),
        "onion3" if hash.len() == 56 => (ONION3, hash.as_bytes().to_vec()),
        "sia" => (SKYNET, BASE64URL_NOPAD.decode(hash.as_bytes()).map_err(|_| invalid())?),
        "ar" | "arweave" => {
            (ARWEAVE, BASE64URL_NOPAD.decode(hash.as_bytes()).map_err(|_| invalid())?)
        }
        "onion" | "onion3" => return Err(invalid()),
        other => return Err(CodecError::UnsupportedProtocol(other.to_string())),
    };

    let mut out = Vec::with_capacity(payload.len() + 4);
    write_varint(codec, &mut out);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// CIDv1 with dag-pb and sha2-256 renders as a base58 CIDv0, anything else as base32 CIDv1.
fn decode_cid(cid: &[u8]) -> Option<String> {
    let (&version, rest) = cid.split_first()?;
    if version != CID_V1 {
        return None;
    }
    let (codec, multihash) = read_varint(rest)?;
    if codec == DAG_PB && multihash.len() == 34 && multihash[..2] == [SHA2_256, 32] {
        return Some(bs58::encode(multihash).into_string());
    }
    Some(format!("b{}", BASE32_NOPAD.encode(cid).to_ascii_lowercase()))
}

fn encode_cid(hash: &str, v0_codec: u64) -> Option<Vec<u8>> {
    if hash.starts_with("Qm") {
        let multihash = bs58::decode(hash).into_vec().ok()?;
        if multihash.len() != 34 || multihash[..2] != [SHA2_256, 32] {
            return None;
        }
        let mut cid = vec![CID_V1];
        write_varint(v0_codec, &mut cid);
        cid.extend_from_slice(&multihash);
        return Some(cid);
    }
    let cid = hash
        .strip_prefix('b')
        .and_then(|rest| BASE32_NOPAD.decode(rest.to_ascii_uppercase().as_bytes()).ok())?;
    (cid.first() == Some(&CID_V1)).then_some(cid)
}

fn decode_swarm(payload: &[u8]) -> Option<String> {
    let (&version, rest) = payload.split_first()?;
    if version != CID_V1 {
        return None;
    }
    let (codec, multihash) = read_varint(rest)?;
    match multihash {
        [KECCAK_256, 32, hash @ ..] if codec == SWARM_MANIFEST && hash.len() == 32 => {
            Some(hex::encode(hash))
        }
        _ => None,
    }
}

fn encode_swarm(hash: &str) -> Option<Vec<u8>> {
    let hash = hex::decode(hash).ok()?;
    if hash.len() != 32 {
        return None;
    }
    let mut out = vec![CID_V1];
    write_varint(SWARM_MANIFEST, &mut out);
    out.extend_from_slice(&[KECCAK_256, 32]);
    out.extend_from_slice(&hash);
    Some(out)
}

/// Reads an unsigned LEB128 varint, returning it and the remaining bytes.
fn read_varint(data: &[u8]) -> Option<(u64, &[u8])> {
    let mut value = 0u64;
    for (i, byte) in data.iter().enumerate().take(9) {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, &data[i + 1..]));
        }
    }
    None
}

fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}
