//! Payload library loaded into the target by the external injector.
//!
//! A constructor registered in `.init_array` runs as soon as the dynamic
//! loader maps this library. It only spawns one detached worker and
//! returns, so the host process never stalls on load. The worker waits
//! for the target module to appear in the memory map, then resolves and
//! calls the chat routine through the signature invoker.

use std::thread;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sigcall_core::{SignatureCache, config, send_chat, wait_for_module};

/// Resolved chat-routine address, scanned at most once per process.
static CHAT_CACHE: SignatureCache = SignatureCache::new();

#[unsafe(link_section = ".init_array")]
#[used]
static PAYLOAD_INIT: extern "C" fn() = payload_init;

extern "C" fn payload_init() {
    // The handle is dropped on purpose: the worker is fire-and-forget and
    // must never be joined from the loader path.
    thread::spawn(bootstrap_worker);
}

/// Loaded -> WaitingForTargetReady -> Invoking -> Idle.
fn bootstrap_worker() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sigcall=info")),
        )
        .try_init();

    info!("Payload loaded, waiting for {}", config::TARGET_MODULE);

    let Some(region) = wait_for_module(
        config::TARGET_MODULE,
        config::READY_POLL_ATTEMPTS,
        config::READY_POLL_INTERVAL,
    ) else {
        warn!(
            "{} never appeared, payload going idle",
            config::TARGET_MODULE
        );
        return;
    };
    info!(
        "{} mapped at {:#x}-{:#x}",
        config::TARGET_MODULE, region.start, region.end
    );

    send_chat(
        &CHAT_CACHE,
        config::TARGET_MODULE,
        config::CHAT_SIGNATURE,
        c"sigcall: initialization complete",
    );
    info!("Bootstrap finished");
}
