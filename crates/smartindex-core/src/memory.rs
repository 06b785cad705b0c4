//! Response arena: owned buffers the host fills with call results.
//!
//! The host obtains result memory by calling the module's `allocate` export,
//! writes the payload and its length word, and returns the payload address
//! from the originating call. The arena keeps ownership of every allocation
//! it hands out, so reading a response back always validates the declared
//! length against the buffer it actually belongs to. Each response is
//! consumed exactly once.

use smartindex_support::buffer::{BufferArena, BufferError, HostBuffer};
use std::cell::RefCell;

thread_local! {
    static RESPONSES: RefCell<BufferArena> = RefCell::new(BufferArena::new());
}

/// Reserve a response buffer of `len` payload bytes and return the handle
/// (payload address) the host will write through.
pub fn allocate_response(len: usize) -> i32 {
    RESPONSES.with(|arena| {
        let mut buffer = HostBuffer::with_capacity(len);
        let handle = buffer.payload_ptr() as usize as i32;
        arena.borrow_mut().insert(handle, buffer);
        handle
    })
}

/// Read back and release the response at `handle`.
pub fn take_response(handle: i32) -> Result<String, BufferError> {
    RESPONSES.with(|arena| arena.borrow_mut().take(handle))?.into_string()
}

/// Number of responses allocated but not yet read back.
pub fn pending_responses() -> usize {
    RESPONSES.with(|arena| arena.borrow().len())
}

/// Module export the host calls to reserve result memory.
#[cfg(target_arch = "wasm32")]
#[no_mangle]
pub extern "C" fn allocate(len: i32) -> i32 {
    allocate_response(len as usize)
}
