//! Compiled-in defaults for the Sober/Roblox target.
//!
//! Everything here can be overridden at the CLI boundary; the payload uses
//! these values as-is.

use std::time::Duration;

/// Module whose executable segments are scanned inside the target.
pub const TARGET_MODULE: &str = "libroblox.so";

/// Substring matched against `/proc/<pid>/exe` to locate the target process.
pub const TARGET_PROCESS: &str = "sober";

/// External injector binary, resolved relative to the running executable.
pub const INJECTOR_BIN: &str = "injector";

/// Payload library handed to the injector, resolved the same way.
pub const PAYLOAD_FILE: &str = "libsigcall_payload.so";

/// Signature of the in-game chat send routine (verified out of band with
/// reverse engineering tooling; a wrong pattern degrades to a skipped call).
pub const CHAT_SIGNATURE: &str = "48 89 5C 24 ? 55 48 8D 6C 24 ? 48 81 EC";

/// Readiness polling for the target module after the payload loads.
pub const READY_POLL_ATTEMPTS: u32 = 30;
pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(500);
