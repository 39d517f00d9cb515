use std::fs;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use super::ModuleRegion;

pub const MAPS_PATH: &str = "/proc/self/maps";

/// Find the executable bounding region of `module` in a maps listing.
///
/// A line qualifies when its permission field marks the segment readable,
/// executable and non-writable, and its pathname contains `module` as a
/// substring. The first qualifying line fixes the start bound; every later
/// qualifying line pushes the end bound, so a module split across several
/// executable segments resolves to one region covering all of them.
pub fn parse_maps(maps: &str, module: &str) -> ModuleRegion {
    let mut region = ModuleRegion::EMPTY;

    for line in maps.lines() {
        let mut fields = line.split_whitespace();
        let (Some(range), Some(perms)) = (fields.next(), fields.next()) else {
            continue;
        };
        if !perms.starts_with("r-x") {
            continue;
        }
        let Some(path) = fields.next_back() else {
            continue;
        };
        if !path.contains(module) {
            continue;
        }
        let Some((start, end)) = parse_range(range) else {
            continue;
        };

        if region.start == 0 {
            region.start = start;
        }
        region.end = end;
    }

    region
}

fn parse_range(range: &str) -> Option<(u64, u64)> {
    let (start, end) = range.split_once('-')?;
    let start = u64::from_str_radix(start, 16).ok()?;
    let end = u64::from_str_radix(end, 16).ok()?;
    (start <= end).then_some((start, end))
}

/// Resolve `module` in the current process's own map.
///
/// An unreadable maps file reports "not mapped" instead of an error; the
/// caller is expected to retry or skip, never to crash the host.
pub fn resolve_module(module: &str) -> ModuleRegion {
    match fs::read_to_string(MAPS_PATH) {
        Ok(maps) => parse_maps(&maps, module),
        Err(e) => {
            debug!("Failed to read {}: {}", MAPS_PATH, e);
            ModuleRegion::EMPTY
        }
    }
}

/// Poll [`resolve_module`] until `module` appears or `attempts` run out.
///
/// Replaces a blind post-injection sleep: the target is considered ready as
/// soon as its main module shows up in the map.
pub fn wait_for_module(module: &str, attempts: u32, interval: Duration) -> Option<ModuleRegion> {
    for attempt in 1..=attempts {
        let region = resolve_module(module);
        if !region.is_empty() {
            debug!(
                "Module {} mapped at {:#x}-{:#x} (attempt {}/{})",
                module, region.start, region.end, attempt, attempts
            );
            return Some(region);
        }
        trace!(
            "Module {} not mapped yet (attempt {}/{})",
            module, attempt, attempts
        );
        if attempt < attempts {
            thread::sleep(interval);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYNTHETIC_MAPS: &str = "\
00001000-00002000 rw-p 00000000 fd:01 100 /usr/lib/libroblox.so
00002000-00002100 r-xp 00001000 fd:01 100 /usr/lib/libroblox.so
00002100-00002200 r--p 00002000 fd:01 100 /usr/lib/libroblox.so
00002200-00002300 r-xp 00002100 fd:01 100 /usr/lib/libroblox.so
00003000-00004000 r-xp 00000000 fd:01 101 /usr/lib/libother.so
00005000-00006000 rwxp 00000000 00:00 0
";

    #[test]
    fn test_multi_segment_union() {
        let region = parse_maps(SYNTHETIC_MAPS, "libroblox.so");
        assert_eq!(
            region,
            ModuleRegion {
                start: 0x2000,
                end: 0x2300
            }
        );
    }

    #[test]
    fn test_non_executable_segments_ignored() {
        // Only the rw-p and r--p lines mention this start address; neither
        // may contribute to the region.
        let region = parse_maps(SYNTHETIC_MAPS, "libroblox.so");
        assert_ne!(region.start, 0x1000);
        assert_ne!(region.end, 0x2200);
    }

    #[test]
    fn test_writable_executable_segment_ignored() {
        let maps = "00005000-00006000 rwxp 00000000 fd:01 100 /usr/lib/libroblox.so\n";
        assert!(parse_maps(maps, "libroblox.so").is_empty());
    }

    #[test]
    fn test_unknown_module_not_found() {
        assert!(parse_maps(SYNTHETIC_MAPS, "libmissing.so").is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let maps = "\
garbage
00002000 r-xp 00001000 fd:01 100 /usr/lib/libroblox.so
zzzz-yyyy r-xp 00001000 fd:01 100 /usr/lib/libroblox.so
00002000-00002100 r-xp 00001000 fd:01 100 /usr/lib/libroblox.so
";
        let region = parse_maps(maps, "libroblox.so");
        assert_eq!(
            region,
            ModuleRegion {
                start: 0x2000,
                end: 0x2100
            }
        );
    }

    #[test]
    fn test_resolve_module_against_live_maps() {
        // The vDSO is mapped r-xp into every Linux process.
        let region = resolve_module("[vdso]");
        assert!(!region.is_empty());
        assert!(region.start < region.end);
    }

    #[test]
    fn test_wait_for_module_bounded() {
        let start = std::time::Instant::now();
        let result = wait_for_module("libdoesnotexist.so", 3, Duration::from_millis(1));
        assert!(result.is_none());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
