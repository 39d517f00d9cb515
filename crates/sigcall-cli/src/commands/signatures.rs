use std::path::Path;

use anyhow::{Context, Result};

use sigcall_core::{builtin_signatures, save_signatures};

pub fn run(out: &Path) -> Result<()> {
    let set = builtin_signatures();
    save_signatures(out, &set).with_context(|| format!("cannot write {}", out.display()))?;
    println!("Wrote {} signatures to {}", set.entries.len(), out.display());
    Ok(())
}
