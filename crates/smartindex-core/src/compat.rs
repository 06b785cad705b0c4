use crate::wasm::WasmHost;
use smartindex_support::host::HostEnv;
use std::panic;

pub fn panic_hook(info: &panic::PanicHookInfo) {
    WasmHost.log(&info.to_string());
}

/// Route panic messages to the host console.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(panic_hook));
}
