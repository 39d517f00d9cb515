use std::path::Path;

use anyhow::{Context, Result};

use sigcall_core::ScriptBuffer;

pub fn run(file: &Path, save: Option<&Path>) -> Result<()> {
    let mut buffer = ScriptBuffer::new();
    buffer
        .open(file)
        .with_context(|| format!("cannot open {}", file.display()))?;
    buffer.execute();

    if let Some(path) = save {
        buffer
            .save(path)
            .with_context(|| format!("cannot save {}", path.display()))?;
    }
    Ok(())
}
