//! # sigcall-core
//!
//! Core library for the sigcall out-of-process function invoker.
//!
//! This crate provides:
//! - Executable-region resolution from the process memory map
//! - Masked byte-signature compilation and scanning
//! - A resolve-once invoker for calling a matched function address
//! - Host-side attach orchestration around the external injector
//!
//! The host binary (`sigcall-cli`) and the injected library
//! (`sigcall-payload`) are both thin drivers over this crate.

pub mod attach;
pub mod config;
pub mod error;
pub mod invoke;
pub mod memory;
pub mod pattern;
pub mod process;
pub mod script;

pub use attach::{AttachStatus, Attacher, CommandInjector, InjectorSpawn, exe_dir};
pub use error::{Error, Result};
pub use invoke::{ChatFn, SignatureCache, resolve_function, send_chat};
pub use memory::{ModuleRegion, parse_maps, resolve_module, wait_for_module};
pub use pattern::{
    SignatureEntry, SignatureSet, builtin_signatures, find_pattern, format_pattern,
    load_signatures, parse_pattern, save_signatures, scan_region,
};
pub use process::{ProcScanner, ProcessProvider};
pub use script::ScriptBuffer;
