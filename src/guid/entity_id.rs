//! Entity id
//!
//! The last 4 bytes of a GUID. Holds a 32-bit number in network byte order;
//! the final byte doubles as the RTPS entity kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{fixed_bytes, parse_hex, GuidError, GuidResult, ENTITY_ID_SIZE};
use crate::wire::{host_to_network_u32, network_to_host_u32};

/// Distinguishes entities that belong to the same participant
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId([u8; ENTITY_ID_SIZE]);

impl EntityId {
    /// ENTITYID_UNKNOWN, all bytes zero
    pub const UNKNOWN: EntityId = EntityId([0; ENTITY_ID_SIZE]);

    pub const PARTICIPANT: EntityId = EntityId::from_number(0x0000_01C1);
    pub const SEDP_BUILTIN_TOPIC_WRITER: EntityId = EntityId::from_number(0x0000_02C2);
    pub const SEDP_BUILTIN_TOPIC_READER: EntityId = EntityId::from_number(0x0000_02C7);
    pub const SEDP_BUILTIN_PUBLICATIONS_WRITER: EntityId = EntityId::from_number(0x0000_03C2);
    pub const SEDP_BUILTIN_PUBLICATIONS_READER: EntityId = EntityId::from_number(0x0000_03C7);
    pub const SEDP_BUILTIN_SUBSCRIPTIONS_WRITER: EntityId = EntityId::from_number(0x0000_04C2);
    pub const SEDP_BUILTIN_SUBSCRIPTIONS_READER: EntityId = EntityId::from_number(0x0000_04C7);
    pub const SPDP_BUILTIN_PARTICIPANT_WRITER: EntityId = EntityId::from_number(0x0001_00C2);
    pub const SPDP_BUILTIN_PARTICIPANT_READER: EntityId = EntityId::from_number(0x0001_00C7);
    pub const P2P_BUILTIN_PARTICIPANT_MESSAGE_WRITER: EntityId = EntityId::from_number(0x0002_00C2);
    pub const P2P_BUILTIN_PARTICIPANT_MESSAGE_READER: EntityId = EntityId::from_number(0x0002_00C7);

    /// Encode `id` in network byte order, on every host.
    pub const fn from_number(id: u32) -> Self {
        Self(host_to_network_u32(id))
    }

    /// Build an entity id from the first 4 bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> GuidResult<Self> {
        fixed_bytes(bytes).map(Self)
    }

    /// Replace the whole value from a number and return the new value.
    pub fn assign_number(&mut self, id: u32) -> Self {
        *self = Self::from_number(id);
        *self
    }

    pub const fn to_number(self) -> u32 {
        network_to_host_u32(self.0)
    }

    pub const fn as_bytes(&self) -> &[u8; ENTITY_ID_SIZE] {
        &self.0
    }

    pub const fn to_bytes(self) -> [u8; ENTITY_ID_SIZE] {
        self.0
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// First three bytes, unique within the participant for a given kind
    pub const fn entity_key(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Raw entity kind octet (last wire byte)
    pub const fn entity_kind(&self) -> u8 {
        self.0[3]
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::from_octet(self.entity_kind())
    }

    pub fn is_builtin(&self) -> bool {
        self.entity_kind() & KIND_ORIGIN_MASK == KIND_BUILTIN
    }

    pub fn is_vendor_specific(&self) -> bool {
        self.entity_kind() & KIND_ORIGIN_MASK == KIND_VENDOR
    }

    pub fn is_writer(&self) -> bool {
        matches!(self.kind(), EntityKind::WriterWithKey | EntityKind::WriterNoKey)
    }

    pub fn is_reader(&self) -> bool {
        matches!(self.kind(), EntityKind::ReaderWithKey | EntityKind::ReaderNoKey)
    }
}

const KIND_ORIGIN_MASK: u8 = 0xC0;
const KIND_BUILTIN: u8 = 0xC0;
const KIND_VENDOR: u8 = 0x40;

/// Entity kind, decoded from the low six bits of the kind octet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Unknown,
    Participant,
    WriterWithKey,
    WriterNoKey,
    ReaderNoKey,
    ReaderWithKey,
    WriterGroup,
    ReaderGroup,
    /// Any kind value not assigned by the RTPS standard
    Other(u8),
}

impl EntityKind {
    pub fn from_octet(octet: u8) -> Self {
        match octet & !KIND_ORIGIN_MASK {
            0x00 => EntityKind::Unknown,
            0x01 => EntityKind::Participant,
            0x02 => EntityKind::WriterWithKey,
            0x03 => EntityKind::WriterNoKey,
            0x04 => EntityKind::ReaderNoKey,
            0x07 => EntityKind::ReaderWithKey,
            0x08 => EntityKind::WriterGroup,
            0x09 => EntityKind::ReaderGroup,
            _ => EntityKind::Other(octet),
        }
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self::from_number(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.to_number()
    }
}

impl From<[u8; ENTITY_ID_SIZE]> for EntityId {
    fn from(bytes: [u8; ENTITY_ID_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<EntityId> for [u8; ENTITY_ID_SIZE] {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl TryFrom<&[u8]> for EntityId {
    type Error = GuidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for EntityId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self)
    }
}

impl FromStr for EntityId {
    type Err = GuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Self)
    }
}
