//! rtps-guid - Entity identifiers for RTPS publish/subscribe stacks
//!
//! Every entity in a domain (participant, reader, writer, topic) is named by a
//! 16 byte GUID: a 12 byte participant prefix followed by a 4 byte entity id.

pub mod config;
pub mod generator;
pub mod guid;
pub mod wire;

pub use guid::{
    EntityId, EntityKind, Guid, GuidError, GuidPrefix, GuidResult, ENTITY_ID_SIZE,
    GUID_PREFIX_SIZE, GUID_SIZE,
};
pub use wire::{CodecError, WireDecode, WireEncode};
