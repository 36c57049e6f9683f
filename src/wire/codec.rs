//! Identifier codec
//!
//! Reads and writes identifiers in their fixed wire layout, plus a framed
//! GUID list format (count header followed by 16 byte entries).

use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

use crate::guid::{EntityId, Guid, GuidPrefix, ENTITY_ID_SIZE, GUID_PREFIX_SIZE, GUID_SIZE};

/// Maximum number of GUIDs in one list frame
pub const MAX_GUID_LIST_LEN: usize = 64 * 1024;

/// List header size: count(4)
const LIST_HEADER_SIZE: usize = 4;

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("GUID list too large: {0} entries (max: {1})")]
    ListTooLarge(usize, usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// A value with a fixed-width wire encoding
pub trait WireEncode {
    /// Number of bytes written by `encode`
    const WIRE_SIZE: usize;

    fn encode<B: BufMut>(&self, buf: &mut B);
}

/// A value decodable from its fixed-width wire encoding
pub trait WireDecode: Sized {
    /// Decode one value, consuming nothing if the buffer is too short.
    fn decode<B: Buf>(buf: &mut B) -> CodecResult<Self>;
}

fn ensure_remaining<B: Buf>(buf: &B, expected: usize) -> CodecResult<()> {
    if buf.remaining() < expected {
        tracing::debug!(expected, actual = buf.remaining(), "short identifier read");
        return Err(CodecError::InvalidLength {
            expected,
            actual: buf.remaining(),
        });
    }
    Ok(())
}

impl WireEncode for GuidPrefix {
    const WIRE_SIZE: usize = GUID_PREFIX_SIZE;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(self.as_bytes());
    }
}

impl WireDecode for GuidPrefix {
    fn decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        ensure_remaining(buf, GUID_PREFIX_SIZE)?;
        let mut bytes = [0u8; GUID_PREFIX_SIZE];
        buf.copy_to_slice(&mut bytes);
        Ok(GuidPrefix::new(bytes))
    }
}

impl WireEncode for EntityId {
    const WIRE_SIZE: usize = ENTITY_ID_SIZE;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(self.as_bytes());
    }
}

impl WireDecode for EntityId {
    fn decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        ensure_remaining(buf, ENTITY_ID_SIZE)?;
        let mut bytes = [0u8; ENTITY_ID_SIZE];
        buf.copy_to_slice(&mut bytes);
        Ok(EntityId::from(bytes))
    }
}

impl WireEncode for Guid {
    const WIRE_SIZE: usize = GUID_SIZE;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.prefix().encode(buf);
        self.entity_id().encode(buf);
    }
}

impl WireDecode for Guid {
    fn decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        // Check the full width up front so a short GUID leaves the buffer untouched
        ensure_remaining(buf, GUID_SIZE)?;
        let prefix = GuidPrefix::decode(buf)?;
        let entity_id = EntityId::decode(buf)?;
        Ok(Guid::new(prefix, entity_id))
    }
}

/// Serialize with bincode; identifiers encode to exactly their wire bytes.
pub fn to_bincode<T: serde::Serialize>(value: &T) -> CodecResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

pub fn from_bincode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    Ok(bincode::deserialize(bytes)?)
}

/// Encodes GUID lists into the framed wire format
#[derive(Debug, Default)]
pub struct GuidListEncoder;

impl GuidListEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a list of GUIDs into a buffer
    pub fn encode(&self, guids: &[Guid], buf: &mut BytesMut) -> CodecResult<()> {
        if guids.len() > MAX_GUID_LIST_LEN {
            return Err(CodecError::ListTooLarge(guids.len(), MAX_GUID_LIST_LEN));
        }

        buf.reserve(LIST_HEADER_SIZE + guids.len() * GUID_SIZE);
        buf.put_u32(guids.len() as u32);
        for guid in guids {
            guid.encode(buf);
        }
        Ok(())
    }
}

/// Incrementally decodes GUID list frames
#[derive(Debug, Default)]
pub struct GuidListDecoder {
    state: DecodeState,
}

#[derive(Debug, Default)]
enum DecodeState {
    #[default]
    Header,
    Entries {
        remaining: usize,
        guids: Vec<Guid>,
    },
}

impl GuidListDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::Header,
        }
    }

    /// Attempt to decode a complete list from the buffer
    /// Returns Ok(None) if more data is needed
    ///
    /// A header announcing more than `MAX_GUID_LIST_LEN` entries is consumed
    /// before `ListTooLarge` is returned, so the next call resumes at the
    /// following bytes. The entries of the rejected list are not skipped.
    pub fn decode(&mut self, buf: &mut BytesMut) -> CodecResult<Option<Vec<Guid>>> {
        loop {
            match &mut self.state {
                DecodeState::Header => {
                    if buf.len() < LIST_HEADER_SIZE {
                        return Ok(None);
                    }

                    let count = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
                    buf.advance(LIST_HEADER_SIZE);

                    if count > MAX_GUID_LIST_LEN {
                        return Err(CodecError::ListTooLarge(count, MAX_GUID_LIST_LEN));
                    }

                    // Reserve only for entries already buffered, not the announced count
                    let buffered = count.min(buf.len() / GUID_SIZE);
                    self.state = DecodeState::Entries {
                        remaining: count,
                        guids: Vec::with_capacity(buffered),
                    };
                }
                DecodeState::Entries { remaining, guids } => {
                    while *remaining > 0 && buf.len() >= GUID_SIZE {
                        guids.push(Guid::decode(buf)?);
                        *remaining -= 1;
                    }

                    if *remaining > 0 {
                        return Ok(None);
                    }

                    let guids = std::mem::take(guids);
                    self.state = DecodeState::Header;
                    return Ok(Some(guids));
                }
            }
        }
    }
}
