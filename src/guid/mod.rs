//! GUID module - Entity identifiers for the RTPS domain
//!
//! A GUID names every addressable entity in a domain:
//! - 12 byte participant prefix (opaque)
//! - 4 byte entity id (32-bit number, network byte order)
//!
//! The two parts are concatenated on the wire with no padding or length prefix.

mod entity_id;
mod identifier;
mod prefix;

pub use entity_id::*;
pub use identifier::*;
pub use prefix::*;

use thiserror::Error;

/// Size of a participant prefix on the wire
pub const GUID_PREFIX_SIZE: usize = 12;

/// Size of an entity id on the wire
pub const ENTITY_ID_SIZE: usize = 4;

/// Size of a full GUID on the wire
pub const GUID_SIZE: usize = GUID_PREFIX_SIZE + ENTITY_ID_SIZE;

/// Identifier construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuidError {
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

pub type GuidResult<T> = Result<T, GuidError>;

/// Copy the first `N` bytes of `bytes` into a fixed array.
///
/// Fails without reading anything when fewer than `N` bytes are available.
pub(crate) fn fixed_bytes<const N: usize>(bytes: &[u8]) -> GuidResult<[u8; N]> {
    match bytes.get(..N) {
        Some(head) => {
            let mut value = [0u8; N];
            value.copy_from_slice(head);
            Ok(value)
        }
        None => Err(GuidError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        }),
    }
}

/// Parse a hex string of exactly `N` bytes.
///
/// Group separators (`.`, `|`, `:`, `-`) and whitespace are ignored.
pub(crate) fn parse_hex<const N: usize>(s: &str) -> GuidResult<[u8; N]> {
    let digits: String = s
        .chars()
        .filter(|c| !matches!(c, '.' | '|' | ':' | '-') && !c.is_whitespace())
        .collect();

    let bytes = hex::decode(&digits).map_err(|e| GuidError::InvalidFormat(e.to_string()))?;
    if bytes.len() != N {
        return Err(GuidError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    fixed_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_bytes_short_input() {
        let err = fixed_bytes::<12>(&[0u8; 11]).unwrap_err();
        assert_eq!(
            err,
            GuidError::InvalidLength {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_fixed_bytes_takes_prefix_of_longer_input() {
        let bytes: Vec<u8> = (1..=6).collect();
        assert_eq!(fixed_bytes::<4>(&bytes).unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_hex_ignores_separators() {
        let parsed = parse_hex::<4>("00:00-01.c1").unwrap();
        assert_eq!(parsed, [0x00, 0x00, 0x01, 0xC1]);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(matches!(
            parse_hex::<4>("zzzzzzzz"),
            Err(GuidError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_hex::<4>("000001"),
            Err(GuidError::InvalidLength {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = GuidError::InvalidLength {
            expected: 16,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Invalid length: expected 16 bytes, got 3");
    }
}
