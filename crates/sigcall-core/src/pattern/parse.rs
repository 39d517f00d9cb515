use crate::error::{Error, Result};

/// Compile a textual signature into a masked byte pattern.
///
/// Tokens are whitespace-separated; `?` and `??` both compile to a single
/// wildcard (`None`), anything else must parse as a base-16 byte. The
/// compiled length equals the token count, never the character count.
///
/// Malformed tokens are rejected outright rather than parsed best-effort:
/// a signature with garbage in it would otherwise scan for the wrong bytes
/// and silently resolve nothing.
pub fn parse_pattern(pattern: &str) -> Result<Vec<Option<u8>>> {
    let mut bytes = Vec::new();
    for token in pattern.split_whitespace() {
        if token == "??" || token == "?" {
            bytes.push(None);
            continue;
        }

        let value = u8::from_str_radix(token, 16).map_err(|e| {
            Error::InvalidPattern(format!("invalid token '{}': {}", token, e))
        })?;
        bytes.push(Some(value));
    }

    if bytes.is_empty() {
        return Err(Error::InvalidPattern("pattern is empty".to_string()));
    }

    Ok(bytes)
}

/// Render a compiled pattern back into canonical signature text.
pub fn format_pattern(bytes: &[Option<u8>]) -> String {
    bytes
        .iter()
        .map(|b| match b {
            Some(value) => format!("{:02X}", value),
            None => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
