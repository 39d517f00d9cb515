use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sigcall")]
#[command(about = "Signature-scan function invoker for the Sober client")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inject the payload into the running target process
    Attach {
        /// Substring matched against candidate process executables
        #[arg(short, long, default_value = sigcall_core::config::TARGET_PROCESS)]
        target: String,

        /// Path to the external injector (default: next to this binary)
        #[arg(long)]
        injector: Option<PathBuf>,

        /// Path to the payload library (default: next to this binary)
        #[arg(long)]
        payload: Option<PathBuf>,
    },
    /// Load a script file and run the execute command on it
    Exec {
        file: PathBuf,

        /// Save a copy of the script after executing
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Compile a signature and scan this process's own mapping of a module
    Scan {
        #[arg(short, long, default_value = sigcall_core::config::TARGET_MODULE)]
        module: String,

        /// Signature text; overrides --signature
        #[arg(short, long)]
        pattern: Option<String>,

        /// Builtin signature name used when --pattern is absent
        #[arg(short, long, default_value = "sendChat")]
        signature: String,
    },
    /// Write the builtin signature set to a JSON file
    Signatures { out: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sigcall=info".parse()?))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Attach {
            target,
            injector,
            payload,
        } => commands::attach::run(&target, injector, payload),
        Command::Exec { file, save } => commands::exec::run(&file, save.as_deref()),
        Command::Scan {
            module,
            pattern,
            signature,
        } => commands::scan::run(&module, pattern.as_deref(), &signature),
        Command::Signatures { out } => commands::signatures::run(&out),
    }
}
