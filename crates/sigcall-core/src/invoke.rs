//! Resolve-once invocation of a signature-scanned function.
//!
//! Everything here is safe code except [`chat_fn_at`], the single narrow
//! boundary where a scanned address becomes a callable function pointer.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::memory::resolve_module;
use crate::pattern::{parse_pattern, scan_region};

/// Resolve-once cache for a scanned function address.
///
/// Only a successful resolution is stored. Failures stay unresolved so a
/// later invocation retries the scan, e.g. after the target module finishes
/// loading. Single writer today; the mutex keeps a future multi-trigger
/// design from racing duplicate scans.
pub struct SignatureCache {
    addr: Mutex<Option<u64>>,
}

impl SignatureCache {
    pub const fn new() -> Self {
        Self {
            addr: Mutex::new(None),
        }
    }

    /// Return the cached address, running `resolve` on a miss.
    pub fn get_or_resolve(&self, resolve: impl FnOnce() -> Option<u64>) -> Option<u64> {
        let mut slot = self.addr.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = resolve();
        }
        *slot
    }
}

impl Default for SignatureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a function address by scanning `module` for `pattern`.
///
/// Every failure mode is non-fatal: a bad pattern, an unmapped module and
/// a scan miss all log and return `None`, leaving the caller free to skip
/// the invocation and retry later.
pub fn resolve_function(module: &str, pattern: &str) -> Option<u64> {
    let compiled = match parse_pattern(pattern) {
        Ok(compiled) => compiled,
        Err(e) => {
            warn!("Rejecting signature: {}", e);
            return None;
        }
    };

    let region = resolve_module(module);
    if region.is_empty() {
        debug!("Module {} is not mapped", module);
        return None;
    }

    match scan_region(region, &compiled) {
        Some(addr) => {
            debug!("Signature matched at {:#x} in {}", addr, module);
            Some(addr)
        }
        None => {
            warn!("Signature not found in {}: {}", module, pattern);
            None
        }
    }
}

/// Calling convention of the target chat routine.
pub type ChatFn = unsafe extern "C" fn(*const c_char, c_int);

/// Reinterpret a scanned address as the chat routine.
///
/// # Safety
///
/// `addr` must point at a function with exactly the [`ChatFn`] ABI inside
/// a module that is still mapped. Nothing here can verify either; the
/// signature text is the correctness precondition, checked out of band.
pub unsafe fn chat_fn_at(addr: u64) -> ChatFn {
    unsafe { std::mem::transmute::<usize, ChatFn>(addr as usize) }
}

/// Resolve the chat routine (through `cache`) and call it with `message`.
///
/// An unresolved signature skips the call for this invocation only.
pub fn send_chat(cache: &SignatureCache, module: &str, pattern: &str, message: &CStr) {
    let Some(addr) = cache.get_or_resolve(|| resolve_function(module, pattern)) else {
        warn!("Chat routine unresolved, skipping send");
        return;
    };

    debug!("Calling chat routine at {:#x}", addr);
    unsafe { chat_fn_at(addr)(message.as_ptr(), 0) };
}
