use anyhow::{Result, bail};

use sigcall_core::{Error, builtin_signatures, parse_pattern, resolve_module, scan_region};

/// Self-scan diagnostic: resolves a module mapped into this process and
/// scans it, printing the match address. Useful for verifying a signature
/// against a locally loaded copy of the target library.
pub fn run(module: &str, pattern: Option<&str>, signature: &str) -> Result<()> {
    let builtin = builtin_signatures();
    let pattern_text = match pattern {
        Some(text) => text.to_string(),
        None => match builtin.entry(signature) {
            Some(entry) => entry.pattern.clone(),
            None => bail!("unknown builtin signature '{}'", signature),
        },
    };
    let compiled = parse_pattern(&pattern_text)?;

    let region = resolve_module(module);
    if region.is_empty() {
        return Err(Error::ModuleNotFound(module.to_string()).into());
    }
    println!(
        "{}: {:#x}-{:#x} ({} bytes executable)",
        module,
        region.start,
        region.end,
        region.len()
    );

    match scan_region(region, &compiled) {
        Some(addr) => {
            println!("match at {:#x} (module +{:#x})", addr, addr - region.start);
            Ok(())
        }
        None => Err(Error::SignatureNotFound {
            module: module.to_string(),
            pattern: pattern_text,
        }
        .into()),
    }
}
