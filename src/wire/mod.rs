//! Wire module - Byte layout of identifiers on the network
//!
//! All multi-byte numbers are written in network byte order (big-endian)
//! regardless of the host architecture:
//! - GuidPrefix: 12 raw bytes
//! - EntityId: 4 bytes, 32-bit number, most significant byte first
//! - Guid: prefix followed by entity id, 16 bytes, no padding

mod codec;

pub use codec::*;

/// Convert a host-order number to its network byte order encoding.
pub const fn host_to_network_u32(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Read a network byte order encoding back into a host-order number.
pub const fn network_to_host_u32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}
