use stargraph_core::{Error, Result};
use std::path::Path;

/// Value for the `Authorization` header, read from a token file.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    header: String,
}

impl Credential {
    /// Build a credential from a raw token line.
    ///
    /// A value that already names its scheme (`bearer …`, `token …`) is used
    /// verbatim; a bare token is sent as `bearer <token>`.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(Error::InvalidConfig("token is empty".to_string()));
        }

        let scheme = line
            .split_whitespace()
            .next()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let has_scheme = line.contains(char::is_whitespace) && (scheme == "bearer" || scheme == "token");

        let header = if has_scheme {
            line.to_string()
        } else {
            format!("bearer {}", line)
        };
        Ok(Self { header })
    }

    /// Read the first line of `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read token file {}: {}", path.display(), e))
        })?;
        Self::parse(content.lines().next().unwrap_or_default())
    }

    pub fn header_value(&self) -> &str {
        &self.header
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential").field("header", &"<redacted>").finish()
    }
}
