use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config;
use crate::error::Result;

/// One named signature: the module to scan and the pattern text to find.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub name: String,
    pub module: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureSet {
    pub version: String,
    pub entries: Vec<SignatureEntry>,
}

impl SignatureSet {
    pub fn entry(&self, name: &str) -> Option<&SignatureEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

/// Signatures compiled into the binary, used when no file is supplied.
pub fn builtin_signatures() -> SignatureSet {
    SignatureSet {
        version: "builtin".to_string(),
        entries: vec![SignatureEntry {
            name: "sendChat".to_string(),
            module: config::TARGET_MODULE.to_string(),
            pattern: config::CHAT_SIGNATURE.to_string(),
        }],
    }
}

pub fn load_signatures<P: AsRef<Path>>(path: P) -> Result<SignatureSet> {
    let content = fs::read_to_string(&path)?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

pub fn save_signatures<P: AsRef<Path>>(path: P, signatures: &SignatureSet) -> Result<()> {
    let content = serde_json::to_string_pretty(signatures)?;
    fs::write(path, content)?;
    Ok(())
}
