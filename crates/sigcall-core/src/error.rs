use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid signature pattern: {0}")]
    InvalidPattern(String),

    #[error("Module not mapped: {0}")]
    ModuleNotFound(String),

    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Signature not found in {module}: {pattern}")]
    SignatureNotFound { module: String, pattern: String },

    #[error("Injector exited with code {code:?}: {stderr}")]
    InjectorFailed { code: Option<i32>, stderr: String },

    #[error("Failed to spawn injector: {0}")]
    Spawn(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
