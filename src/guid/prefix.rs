//! Participant prefix
//!
//! The first 12 bytes of every GUID, shared by all entities of one participant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{fixed_bytes, parse_hex, GuidError, GuidResult, GUID_PREFIX_SIZE};

/// Opaque 12 byte prefix identifying a domain participant
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GuidPrefix([u8; GUID_PREFIX_SIZE]);

impl GuidPrefix {
    /// GUIDPREFIX_UNKNOWN, all bytes zero
    pub const UNKNOWN: GuidPrefix = GuidPrefix([0; GUID_PREFIX_SIZE]);

    pub const fn new(bytes: [u8; GUID_PREFIX_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a prefix from the first 12 bytes of `bytes`.
    ///
    /// Any byte pattern is accepted; only the length is checked.
    pub fn from_bytes(bytes: &[u8]) -> GuidResult<Self> {
        fixed_bytes(bytes).map(Self)
    }

    pub const fn as_bytes(&self) -> &[u8; GUID_PREFIX_SIZE] {
        &self.0
    }

    pub const fn to_bytes(self) -> [u8; GUID_PREFIX_SIZE] {
        self.0
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl From<[u8; GUID_PREFIX_SIZE]> for GuidPrefix {
    fn from(bytes: [u8; GUID_PREFIX_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<GuidPrefix> for [u8; GUID_PREFIX_SIZE] {
    fn from(prefix: GuidPrefix) -> Self {
        prefix.0
    }
}

impl TryFrom<&[u8]> for GuidPrefix {
    type Error = GuidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for GuidPrefix {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for GuidPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.0.chunks(4).enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&hex::encode(group))?;
        }
        Ok(())
    }
}

impl fmt::Debug for GuidPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GuidPrefix({})", self)
    }
}

impl FromStr for GuidPrefix {
    type Err = GuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Self)
    }
}
