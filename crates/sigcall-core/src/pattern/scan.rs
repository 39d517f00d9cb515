use memchr::memchr_iter;

use crate::memory::ModuleRegion;

/// Find the lowest offset in `haystack` matching the masked pattern.
///
/// The first non-wildcard byte anchors a `memchr` skip loop; candidates
/// are visited in ascending order, so the first match always wins.
pub fn find_pattern(haystack: &[u8], pattern: &[Option<u8>]) -> Option<usize> {
    if pattern.is_empty() || haystack.len() < pattern.len() {
        return None;
    }
    let last_start = haystack.len() - pattern.len();

    let Some(anchor) = pattern.iter().position(|b| b.is_some()) else {
        // All-wildcard patterns match anywhere the length fits.
        return Some(0);
    };
    let needle = pattern[anchor].unwrap_or_default();

    // A candidate start i has the anchor byte at i + anchor, so scanning
    // the shifted window yields candidate starts directly.
    let window = &haystack[anchor..=anchor + last_start];
    memchr_iter(needle, window).find(|&i| matches_at(haystack, i, pattern))
}

fn matches_at(haystack: &[u8], at: usize, pattern: &[Option<u8>]) -> bool {
    pattern
        .iter()
        .zip(&haystack[at..])
        .all(|(p, b)| p.is_none_or(|v| v == *b))
}

/// Scan a resolved region of this process's own address space.
///
/// Returns the absolute address of the first match, or `None` for an
/// empty region or a miss.
pub fn scan_region(region: ModuleRegion, pattern: &[Option<u8>]) -> Option<u64> {
    if region.is_empty() || region.len() == 0 {
        return None;
    }

    // Sound only while the module backing the region stays mapped; the
    // region was computed from this process's live map moments ago.
    let bytes = unsafe { std::slice::from_raw_parts(region.start as *const u8, region.len()) };
    find_pattern(bytes, pattern).map(|offset| region.start + offset as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse_pattern;

    /// Deterministic filler restricted to 0x00..=0x7F so planted bytes in
    /// the 0x80+ range can never collide with the background.
    fn low_bytes(len: usize, mut seed: u32) -> Vec<u8> {
        (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
                ((seed >> 24) & 0x7F) as u8
            })
            .collect()
    }

    #[test]
    fn test_masked_match_at_planted_offset() {
        let mut haystack = low_bytes(4096, 42);
        let planted: [u8; 6] = [0xD0, 0x11, 0xD2, 0x22, 0xD4, 0xD5];
        let offset = 1337;
        haystack[offset..offset + planted.len()].copy_from_slice(&planted);

        // Positions 1 and 3 differ from the pattern and are wildcarded.
        let pattern = vec![
            Some(0xD0),
            None,
            Some(0xD2),
            None,
            Some(0xD4),
            Some(0xD5),
        ];
        assert_eq!(find_pattern(&haystack, &pattern), Some(offset));
    }

    #[test]
    fn test_no_match_returns_none() {
        let haystack = low_bytes(4096, 7);
        let pattern = vec![Some(0x90), Some(0x91), Some(0x92)];
        assert_eq!(find_pattern(&haystack, &pattern), None);
    }

    #[test]
    fn test_first_match_wins() {
        let mut haystack = low_bytes(256, 3);
        haystack[10] = 0xEE;
        haystack[200] = 0xEE;
        let pattern = vec![Some(0xEE)];
        assert_eq!(find_pattern(&haystack, &pattern), Some(10));
    }

    #[test]
    fn test_leading_wildcard_shifts_anchor() {
        let haystack = [0x01, 0x02, 0x03, 0xAA, 0x05];
        let pattern = parse_pattern("? AA").unwrap();
        assert_eq!(find_pattern(&haystack, &pattern), Some(2));
    }

    #[test]
    fn test_all_wildcards_match_start() {
        let haystack = [1u8, 2, 3, 4];
        let pattern = vec![None, None];
        assert_eq!(find_pattern(&haystack, &pattern), Some(0));
        assert_eq!(find_pattern(&haystack[..1], &pattern), None);
    }

    #[test]
    fn test_haystack_shorter_than_pattern() {
        let pattern = vec![Some(0xAA), Some(0xBB)];
        assert_eq!(find_pattern(&[0xAA], &pattern), None);
        assert_eq!(find_pattern(&[], &pattern), None);
    }

    #[test]
    fn test_match_at_last_valid_offset() {
        let haystack = [0x00, 0x00, 0xAA, 0xBB];
        let pattern = parse_pattern("AA BB").unwrap();
        assert_eq!(find_pattern(&haystack, &pattern), Some(2));
    }

    #[test]
    fn test_scan_region_returns_absolute_address() {
        // A 16-byte buffer stands in for a mapped module; the region's
        // bounds are the buffer's real addresses in this process.
        let mut buffer = vec![0u8; 16];
        buffer[5] = 0xAA;
        buffer[6] = 0xBB;
        buffer[7] = 0xCC;

        let start = buffer.as_ptr() as u64;
        let region = ModuleRegion {
            start,
            end: start + buffer.len() as u64,
        };
        let pattern = parse_pattern("AA BB CC").unwrap();
        assert_eq!(scan_region(region, &pattern), Some(start + 5));
    }

    #[test]
    fn test_scan_region_empty() {
        let pattern = parse_pattern("AA").unwrap();
        assert_eq!(scan_region(ModuleRegion::EMPTY, &pattern), None);
    }
}
