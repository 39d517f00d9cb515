//! Target-process discovery over `/proc`.

use std::fs;

use tracing::trace;

/// Maps a process-name substring to a pid.
///
/// The attach orchestrator only depends on this trait, so tests can swap
/// in a fixed answer instead of walking the real process table.
pub trait ProcessProvider {
    fn find_pid(&self, target: &str) -> Option<u32>;
}

/// Walks `/proc`, matching `target` against each process's exe symlink.
///
/// Processes whose exe link cannot be read (typically other users' pids)
/// are skipped, not errors.
pub struct ProcScanner;

impl ProcessProvider for ProcScanner {
    fn find_pid(&self, target: &str) -> Option<u32> {
        let entries = fs::read_dir("/proc").ok()?;

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(pid) = name.to_str().and_then(|s| s.parse::<u32>().ok()) else {
                continue;
            };
            let Ok(exe) = fs::read_link(entry.path().join("exe")) else {
                continue;
            };
            if exe.to_string_lossy().contains(target) {
                trace!("Matched pid {} ({})", pid, exe.display());
                return Some(pid);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_own_process() {
        let exe = std::env::current_exe().unwrap();
        let name = exe.file_name().unwrap().to_str().unwrap();

        let pid = ProcScanner.find_pid(name);
        assert!(pid.is_some(), "own test binary not found by name");
    }

    #[test]
    fn test_unknown_process_not_found() {
        assert_eq!(ProcScanner.find_pid("no-such-process-zz9-plural"), None);
    }
}
