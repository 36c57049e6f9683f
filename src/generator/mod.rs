//! Participant prefix allocation
//!
//! Prefixes are laid out as:
//! - 2 bytes vendor id
//! - 4 bytes host id (FNV-1a of the host name)
//! - 4 bytes process id
//! - 2 bytes instance counter
//!
//! All fields are big-endian so the same inputs give the same prefix on every host.

use std::sync::atomic::{AtomicU16, Ordering};

use crate::guid::{Guid, GuidPrefix, GUID_PREFIX_SIZE};

/// Vendor id written into generated prefixes unless configured otherwise
pub const DEFAULT_VENDOR_ID: u16 = 0x01FF;

fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 2_166_136_261;
    for byte in bytes {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

/// Derive a host id from the local host name.
///
/// Falls back to random bytes when the host name cannot be read.
pub fn local_host_id() -> u32 {
    match hostname::get() {
        Ok(name) => fnv1a_32(name.to_string_lossy().as_bytes()),
        Err(e) => {
            tracing::warn!("Could not read host name ({}), using a random host id", e);
            let random = uuid::Uuid::new_v4();
            let bytes = random.as_bytes();
            u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
        }
    }
}

/// Allocates unique participant prefixes for one process
#[derive(Debug)]
pub struct PrefixGenerator {
    vendor_id: u16,
    host_id: u32,
    process_id: u32,
    next_instance: AtomicU16,
}

impl PrefixGenerator {
    /// Generator for the local host and current process
    pub fn new(vendor_id: u16) -> Self {
        Self::with_host_id(vendor_id, local_host_id())
    }

    pub fn with_host_id(vendor_id: u16, host_id: u32) -> Self {
        Self {
            vendor_id,
            host_id,
            process_id: std::process::id(),
            next_instance: AtomicU16::new(0),
        }
    }

    pub fn with_process_id(mut self, process_id: u32) -> Self {
        self.process_id = process_id;
        self
    }

    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    pub fn host_id(&self) -> u32 {
        self.host_id
    }

    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Allocate the next prefix. Wraps after 65536 allocations.
    pub fn next_prefix(&self) -> GuidPrefix {
        let instance = self.next_instance.fetch_add(1, Ordering::Relaxed);
        let prefix = compose_prefix(self.vendor_id, self.host_id, self.process_id, instance);
        tracing::debug!(%prefix, instance, "Allocated participant prefix");
        prefix
    }

    /// Allocate a prefix and return the GUID of its participant entity
    pub fn next_participant(&self) -> Guid {
        Guid::participant(self.next_prefix())
    }
}

impl Default for PrefixGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_VENDOR_ID)
    }
}

/// Assemble a prefix from its fields
pub fn compose_prefix(vendor_id: u16, host_id: u32, process_id: u32, instance: u16) -> GuidPrefix {
    let mut bytes = [0u8; GUID_PREFIX_SIZE];
    bytes[0..2].copy_from_slice(&vendor_id.to_be_bytes());
    bytes[2..6].copy_from_slice(&host_id.to_be_bytes());
    bytes[6..10].copy_from_slice(&process_id.to_be_bytes());
    bytes[10..12].copy_from_slice(&instance.to_be_bytes());
    GuidPrefix::new(bytes)
}
