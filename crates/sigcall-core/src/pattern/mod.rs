//! Masked byte-signature compilation and scanning.

mod parse;
mod scan;
mod set;

pub use parse::{format_pattern, parse_pattern};
pub use scan::{find_pattern, scan_region};
pub use set::{SignatureEntry, SignatureSet, builtin_signatures, load_signatures, save_signatures};
