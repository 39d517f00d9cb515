//! Host-side attach orchestration.
//!
//! One attach attempt finds the target pid, hands it to the external
//! injector together with the payload path, and maps the child's outcome
//! onto an [`AttachStatus`]. The blocking work runs on a detached worker;
//! the caller consumes exactly one status from a one-shot channel.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tracing::{debug, info};

use crate::config;
use crate::error::{Error, Result};
use crate::process::ProcessProvider;

/// Outcome of one attach attempt, delivered exactly once per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachStatus {
    /// Injector ran and exited zero.
    Attached,
    /// No running process matched the target substring; the injector was
    /// never spawned.
    NotFound,
    /// Injector ran but reported failure.
    Failed { code: Option<i32>, stderr: String },
    /// The spawn mechanism itself failed (missing binary, permissions).
    SystemError(String),
}

impl std::fmt::Display for AttachStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachStatus::Attached => write!(f, "Attached!"),
            AttachStatus::NotFound => write!(f, "Target process not found"),
            AttachStatus::Failed {
                code: Some(code), ..
            } => write!(f, "Injection failed (exit code {})", code),
            AttachStatus::Failed { code: None, .. } => {
                write!(f, "Injection failed (injector killed by signal)")
            }
            AttachStatus::SystemError(e) => write!(f, "Could not launch injector: {}", e),
        }
    }
}

/// Spawns the external injector and waits for it, capturing its output.
pub trait InjectorSpawn {
    fn spawn(&self, pid: u32, payload: &Path) -> std::io::Result<Output>;
}

/// Runs the real injector binary: `injector <pid> <payload>`.
pub struct CommandInjector {
    program: PathBuf,
}

impl CommandInjector {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl InjectorSpawn for CommandInjector {
    fn spawn(&self, pid: u32, payload: &Path) -> std::io::Result<Output> {
        Command::new(&self.program)
            .arg(pid.to_string())
            .arg(payload)
            .output()
    }
}

/// Directory of the currently running executable.
///
/// Companion files (injector, payload) live next to the host binary, so
/// they resolve correctly no matter the working directory.
pub fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

pub struct Attacher<P, I> {
    provider: P,
    injector: I,
    payload: PathBuf,
    in_flight: AtomicBool,
}

impl<P: ProcessProvider, I: InjectorSpawn> Attacher<P, I> {
    pub fn new(provider: P, injector: I, payload: PathBuf) -> Self {
        Self {
            provider,
            injector,
            payload,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one blocking attach attempt.
    pub fn attach(&self, target: &str) -> AttachStatus {
        match self.run_attach(target) {
            Ok(()) => AttachStatus::Attached,
            Err(Error::ProcessNotFound(_)) => AttachStatus::NotFound,
            Err(Error::InjectorFailed { code, stderr }) => AttachStatus::Failed { code, stderr },
            Err(Error::Spawn(e)) => AttachStatus::SystemError(e.to_string()),
            Err(e) => AttachStatus::SystemError(e.to_string()),
        }
    }

    fn run_attach(&self, target: &str) -> Result<()> {
        let pid = self
            .provider
            .find_pid(target)
            .ok_or_else(|| Error::ProcessNotFound(target.to_string()))?;
        info!("Found target pid {}, spawning injector", pid);

        let output = self
            .injector
            .spawn(pid, &self.payload)
            .map_err(Error::Spawn)?;

        if !output.stdout.is_empty() {
            debug!(
                "Injector stdout: {}",
                String::from_utf8_lossy(&output.stdout).trim_end()
            );
        }
        if !output.stderr.is_empty() {
            debug!(
                "Injector stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::InjectorFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

impl<P, I> Attacher<P, I>
where
    P: ProcessProvider + Send + Sync + 'static,
    I: InjectorSpawn + Send + Sync + 'static,
{
    /// Run an attach attempt on a detached worker.
    ///
    /// The single status arrives on the returned one-shot channel; the
    /// worker is never joined. Returns `None` while a previous attempt is
    /// still in flight.
    pub fn attach_async(self: &Arc<Self>, target: &str) -> Option<Receiver<AttachStatus>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Attach already in flight, ignoring request");
            return None;
        }

        let (tx, rx) = mpsc::channel();
        let this = Arc::clone(self);
        let target = target.to_string();
        thread::spawn(move || {
            let status = this.attach(&target);
            this.in_flight.store(false, Ordering::SeqCst);
            // A dropped receiver just discards the status.
            let _ = tx.send(status);
        });
        Some(rx)
    }
}

impl Attacher<crate::process::ProcScanner, CommandInjector> {
    /// Production attacher with the injector and payload expected next to
    /// the running binary.
    pub fn from_exe_dir() -> Result<Self> {
        let dir = exe_dir()?;
        Ok(Self::new(
            crate::process::ProcScanner,
            CommandInjector::new(dir.join(config::INJECTOR_BIN)),
            dir.join(config::PAYLOAD_FILE),
        ))
    }
}
