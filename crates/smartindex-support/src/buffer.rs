//! # Length-Prefixed Buffers for Host/Guest String Passing
//!
//! Results of host calls arrive in module linear memory as a byte run with a
//! 4-byte little-endian length word stored immediately before it; the handle
//! the host returns addresses the payload, not the length word:
//!
//! ```text
//! [length_byte_0..3][payload_byte_0, payload_byte_1, ...]
//!                    ^ handle
//! ```
//!
//! Every buffer handed to the host is owned by a [`BufferArena`] and looked
//! up by handle when it is read back, so a read can always validate the
//! length the host declared against the allocation it actually belongs to.
//! A declared length larger than the allocation is an error, never an
//! out-of-bounds read.
//!
//! Payload text is UTF-8.

use thiserror::Error;

/// Size of the length word preceding every payload.
pub const LENGTH_PREFIX: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("unknown buffer handle {0}")]
    UnknownHandle(i32),
    #[error("declared length {declared} exceeds allocated capacity {capacity}")]
    LengthOutOfBounds { declared: usize, capacity: usize },
    #[error("buffer payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Convert a byte run to the prefixed layout used for the outgoing
/// direction. The returned vector holds the length word followed by the
/// payload; the pointer handed to the host must skip the first
/// [`LENGTH_PREFIX`] bytes.
pub fn to_length_prefixed<T: AsRef<[u8]>>(v: T) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(LENGTH_PREFIX + v.as_ref().len());
    buffer.extend_from_slice(&(v.as_ref().len() as u32).to_le_bytes());
    buffer.extend_from_slice(v.as_ref());
    buffer
}

/// One host-writable allocation: a fixed-capacity payload region with its
/// length word stored immediately before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBuffer {
    bytes: Vec<u8>,
}

impl HostBuffer {
    /// Reserve a buffer able to hold `capacity` payload bytes. The length
    /// word starts at zero; the host overwrites it with the actual payload
    /// length before the module reads the buffer back.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; LENGTH_PREFIX + capacity],
        }
    }

    /// Build an already-filled buffer, laid out the way the host leaves it.
    pub fn from_payload(payload: &[u8]) -> Self {
        Self {
            bytes: to_length_prefixed(payload),
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len() - LENGTH_PREFIX
    }

    /// Length the host claims to have written.
    pub fn declared_len(&self) -> usize {
        u32::from_le_bytes(self.bytes[..LENGTH_PREFIX].try_into().unwrap()) as usize
    }

    /// Address of the payload region. The length word lives at this address
    /// minus [`LENGTH_PREFIX`]; the host fills both through this pointer.
    pub fn payload_ptr(&mut self) -> *mut u8 {
        unsafe { self.bytes.as_mut_ptr().add(LENGTH_PREFIX) }
    }

    /// Overwrite the length word and payload in one step, the way the host
    /// does through raw memory.
    pub fn write_payload(&mut self, payload: &[u8]) -> Result<(), BufferError> {
        if payload.len() > self.capacity() {
            return Err(BufferError::LengthOutOfBounds {
                declared: payload.len(),
                capacity: self.capacity(),
            });
        }
        self.bytes[..LENGTH_PREFIX].copy_from_slice(&(payload.len() as u32).to_le_bytes());
        self.bytes[LENGTH_PREFIX..LENGTH_PREFIX + payload.len()].copy_from_slice(payload);
        Ok(())
    }

    /// Payload as declared by the host, bounds-checked against the
    /// allocation before anything is decoded.
    pub fn payload(&self) -> Result<&[u8], BufferError> {
        let declared = self.declared_len();
        if declared > self.capacity() {
            return Err(BufferError::LengthOutOfBounds {
                declared,
                capacity: self.capacity(),
            });
        }
        Ok(&self.bytes[LENGTH_PREFIX..LENGTH_PREFIX + declared])
    }

    pub fn into_string(self) -> Result<String, BufferError> {
        let payload = self.payload()?.to_vec();
        Ok(String::from_utf8(payload)?)
    }
}

/// Registry of buffers handed to the host, keyed by the handle the host will
/// pass back. Responses are consumed exactly once.
#[derive(Debug, Default)]
pub struct BufferArena {
    buffers: std::collections::HashMap<i32, HostBuffer>,
}

impl BufferArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a buffer under the handle the host will later return.
    pub fn insert(&mut self, handle: i32, buffer: HostBuffer) {
        self.buffers.insert(handle, buffer);
    }

    pub fn get_mut(&mut self, handle: i32) -> Option<&mut HostBuffer> {
        self.buffers.get_mut(&handle)
    }

    /// Remove and return the buffer at `handle`. A handle the arena never
    /// issued is an error, not a wild read.
    pub fn take(&mut self, handle: i32) -> Result<HostBuffer, BufferError> {
        self.buffers
            .remove(&handle)
            .ok_or(BufferError::UnknownHandle(handle))
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
