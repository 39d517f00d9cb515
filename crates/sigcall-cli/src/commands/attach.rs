use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

use sigcall_core::{AttachStatus, Attacher, CommandInjector, ProcScanner, config, exe_dir};

pub fn run(target: &str, injector: Option<PathBuf>, payload: Option<PathBuf>) -> Result<()> {
    let dir = exe_dir().context("cannot resolve executable directory")?;
    let injector = injector.unwrap_or_else(|| dir.join(config::INJECTOR_BIN));
    let payload = payload.unwrap_or_else(|| dir.join(config::PAYLOAD_FILE));

    info!(
        "Attaching to '{}' via {} with {}",
        target,
        injector.display(),
        payload.display()
    );

    let attacher = Arc::new(Attacher::new(
        ProcScanner,
        CommandInjector::new(injector),
        payload,
    ));
    let Some(rx) = attacher.attach_async(target) else {
        anyhow::bail!("an attach is already in flight");
    };

    // One-shot channel; blocking here is this command's event loop.
    let status = rx.recv().context("attach worker exited without a status")?;
    match &status {
        AttachStatus::Attached => println!("{}", status.green()),
        AttachStatus::NotFound => println!("{}", status.yellow()),
        _ => println!("{}", status.red()),
    }
    if let AttachStatus::Failed { stderr, .. } = &status {
        if !stderr.is_empty() {
            eprintln!("{}", stderr.trim_end());
        }
    }
    Ok(())
}
