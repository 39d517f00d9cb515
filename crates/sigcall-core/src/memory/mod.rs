//! Executable-region resolution via the process's own memory map.
//!
//! The kernel describes every mapping of the current process in
//! `/proc/self/maps`, one line per segment. A module built as a shared
//! library usually maps several segments; only the executable ones matter
//! for signature scanning, and they collapse into a single bounding region.

mod maps;

pub use maps::{MAPS_PATH, parse_maps, resolve_module, wait_for_module};

/// Half-open byte range `[start, end)` of one module's executable mapping.
///
/// The all-zero region is the "not found" sentinel; a real mapping never
/// starts at address zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleRegion {
    pub start: u64,
    pub end: u64,
}

impl ModuleRegion {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn is_empty(&self) -> bool {
        self.start == 0
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_region_sentinel() {
        assert!(ModuleRegion::EMPTY.is_empty());
        assert_eq!(ModuleRegion::EMPTY.len(), 0);
        assert_eq!(ModuleRegion::default(), ModuleRegion::EMPTY);

        let region = ModuleRegion {
            start: 0x2000,
            end: 0x2300,
        };
        assert!(!region.is_empty());
        assert_eq!(region.len(), 0x300);
    }
}
