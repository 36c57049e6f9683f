//! Full entity GUID
//!
//! Composition of a participant prefix and an entity id. Ordering is
//! lexicographic over the 16 wire bytes (prefix first), so a `Guid` can key
//! both hashed and sorted maps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    fixed_bytes, parse_hex, EntityId, GuidError, GuidPrefix, GuidResult, ENTITY_ID_SIZE,
    GUID_PREFIX_SIZE, GUID_SIZE,
};

/// Globally unique identifier of an RTPS entity
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Guid {
    prefix: GuidPrefix,
    entity_id: EntityId,
}

impl Guid {
    /// GUID_UNKNOWN, all 16 bytes zero
    pub const UNKNOWN: Guid = Guid {
        prefix: GuidPrefix::UNKNOWN,
        entity_id: EntityId::UNKNOWN,
    };

    pub const fn new(prefix: GuidPrefix, entity_id: EntityId) -> Self {
        Self { prefix, entity_id }
    }

    pub const fn from_prefix_and_number(prefix: GuidPrefix, id: u32) -> Self {
        Self::new(prefix, EntityId::from_number(id))
    }

    pub const fn prefix(&self) -> GuidPrefix {
        self.prefix
    }

    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// GUID of the participant entity owning `prefix`
    pub const fn participant(prefix: GuidPrefix) -> Self {
        Self::new(prefix, EntityId::PARTICIPANT)
    }

    /// GUID of another entity under the same participant
    pub const fn with_entity_id(self, entity_id: EntityId) -> Self {
        Self::new(self.prefix, entity_id)
    }

    /// Build a GUID from the first 16 bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> GuidResult<Self> {
        let bytes: [u8; GUID_SIZE] = fixed_bytes(bytes)?;
        Ok(Self::from(bytes))
    }

    /// Wire form: prefix bytes followed by entity id bytes
    pub fn to_bytes(self) -> [u8; GUID_SIZE] {
        let mut bytes = [0u8; GUID_SIZE];
        bytes[..GUID_PREFIX_SIZE].copy_from_slice(self.prefix.as_bytes());
        bytes[GUID_PREFIX_SIZE..].copy_from_slice(self.entity_id.as_bytes());
        bytes
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl From<[u8; GUID_SIZE]> for Guid {
    fn from(bytes: [u8; GUID_SIZE]) -> Self {
        let mut prefix = [0u8; GUID_PREFIX_SIZE];
        let mut entity_id = [0u8; ENTITY_ID_SIZE];
        prefix.copy_from_slice(&bytes[..GUID_PREFIX_SIZE]);
        entity_id.copy_from_slice(&bytes[GUID_PREFIX_SIZE..]);
        Self::new(GuidPrefix::new(prefix), EntityId::from(entity_id))
    }
}

impl From<Guid> for [u8; GUID_SIZE] {
    fn from(guid: Guid) -> Self {
        guid.to_bytes()
    }
}

impl TryFrom<&[u8]> for Guid {
    type Error = GuidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.prefix, self.entity_id)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self)
    }
}

impl FromStr for Guid {
    type Err = GuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex::<GUID_SIZE>(s).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};

    fn sequential_prefix() -> GuidPrefix {
        GuidPrefix::new([
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,
        ])
    }

    #[test]
    fn test_default_is_unknown() {
        let guid = Guid::default();
        assert!(guid.is_unknown());
        assert_eq!(guid, Guid::UNKNOWN);
        assert_eq!(guid.to_bytes(), [0u8; 16]);
    }

    #[test]
    fn test_non_zero_parts_are_not_unknown() {
        assert!(!Guid::from_prefix_and_number(GuidPrefix::UNKNOWN, 1).is_unknown());
        assert!(!Guid::new(sequential_prefix(), EntityId::UNKNOWN).is_unknown());
    }

    #[test]
    fn test_construction_paths_agree() {
        let prefix = GuidPrefix::new([0x10; 12]);
        let a = Guid::from_prefix_and_number(prefix, 42);
        let b = Guid::from_prefix_and_number(prefix, 42);
        let c = Guid::new(prefix, EntityId::from_number(42));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.entity_id().to_bytes(), [0, 0, 0, 42]);
    }

    #[test]
    fn test_wire_layout() {
        let guid = Guid::from_prefix_and_number(sequential_prefix(), 1);
        assert_eq!(
            guid.to_bytes(),
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_bytes_roundtrip_cases() {
        let cases = [
            Guid::UNKNOWN,
            Guid::from_prefix_and_number(sequential_prefix(), 1),
            Guid::from_prefix_and_number(GuidPrefix::new([0xFF; 12]), u32::MAX),
        ];
        for guid in cases {
            let decoded = Guid::from_bytes(&guid.to_bytes()).unwrap();
            assert_eq!(decoded, guid);
        }
    }

    #[test]
    fn test_last_byte_difference_is_unequal() {
        let a = Guid::from_prefix_and_number(sequential_prefix(), 0x0000_0102);
        let b = Guid::from_prefix_and_number(sequential_prefix(), 0x0000_0103);
        assert_ne!(a, b);
        assert_ne!(
            Guid::from_bytes(&a.to_bytes()).unwrap(),
            Guid::from_bytes(&b.to_bytes()).unwrap()
        );
    }

    #[test]
    fn test_short_buffer_fails() {
        let err = Guid::from_bytes(&[0u8; 15]).unwrap_err();
        assert_eq!(
            err,
            GuidError::InvalidLength {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_equality_is_transitive() {
        let a = Guid::from_prefix_and_number(sequential_prefix(), 9);
        let b = Guid::from_bytes(&a.to_bytes()).unwrap();
        let c = b;
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, c);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Guid::from_prefix_and_number(sequential_prefix(), 5);
        let mut copy = original;
        assert_eq!(copy, original);

        copy = copy.with_entity_id(EntityId::from_number(6));
        assert_eq!(original.entity_id().to_number(), 5);
        assert_eq!(copy.entity_id().to_number(), 6);
        assert_eq!(copy.prefix(), original.prefix());
        assert_ne!(copy, original);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let low_prefix = GuidPrefix::new([0x00; 12]);
        let high_prefix = GuidPrefix::new([0x01; 12]);

        let a = Guid::from_prefix_and_number(low_prefix, u32::MAX);
        let b = Guid::from_prefix_and_number(high_prefix, 0);
        let c = Guid::from_prefix_and_number(high_prefix, 1);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.cmp(&b), a.to_bytes().cmp(&b.to_bytes()));

        let set: BTreeSet<Guid> = [c, a, b].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut entities = HashMap::new();
        let writer = Guid::from_prefix_and_number(sequential_prefix(), 0x0000_0103);
        entities.insert(writer, "writer");
        let lookup = Guid::from_bytes(&writer.to_bytes()).unwrap();
        assert_eq!(entities.get(&lookup), Some(&"writer"));
    }

    #[test]
    fn test_participant_and_sub_entities() {
        let participant = Guid::participant(sequential_prefix());
        assert_eq!(participant.entity_id(), EntityId::PARTICIPANT);

        let reader = participant.with_entity_id(EntityId::SPDP_BUILTIN_PARTICIPANT_READER);
        assert_eq!(reader.prefix(), participant.prefix());
        assert!(reader.entity_id().is_reader());
    }

    #[test]
    fn test_display_and_parse() {
        let guid = Guid::participant(sequential_prefix());
        let text = guid.to_string();
        assert_eq!(text, "01020304.05060708.090a0b0c|000001c1");
        assert_eq!(text.parse::<Guid>().unwrap(), guid);
        assert!("01020304".parse::<Guid>().is_err());
    }
}
