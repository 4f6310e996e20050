//! Identity and relay pools.

use std::path::Path;
use std::sync::Arc;

use crate::errors::AsinflowError;

/// Desktop browser identities used when no custom pool is supplied.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
];

/// Read-only collection of client identity strings.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    identities: Arc<[String]>,
}

impl IdentityPool {
    /// Creates a pool from the given identities.
    ///
    /// Blank entries are dropped; an empty result is rejected since every
    /// attempt must present some identity.
    pub fn new<I, S>(identities: I) -> Result<Self, AsinflowError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identities: Vec<String> = identities
            .into_iter()
            .map(Into::into)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if identities.is_empty() {
            return Err(AsinflowError::config(
                "identity_pool",
                "at least one identity is required",
            ));
        }

        Ok(Self {
            identities: identities.into(),
        })
    }

    /// Returns the identities.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.identities
    }

    /// Returns the number of identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns true if there are no identities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self {
            identities: DEFAULT_USER_AGENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Read-only collection of `host:port` relay endpoints.
///
/// An empty pool means every attempt connects directly.
#[derive(Debug, Clone)]
pub struct RelayPool {
    relays: Arc<[String]>,
}

impl Default for RelayPool {
    fn default() -> Self {
        Self {
            relays: Arc::from(Vec::new()),
        }
    }
}

impl RelayPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a pool from explicit endpoints.
    #[must_use]
    pub fn new<I, S>(relays: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let relays: Vec<String> = relays
            .into_iter()
            .map(Into::into)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            relays: relays.into(),
        }
    }

    /// Parses one relay per line, skipping blanks and `#` comments.
    #[must_use]
    pub fn from_list_str(list: &str) -> Self {
        Self::new(
            list.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Loads a relay list file.
    ///
    /// A missing file is not an error: the pool comes back empty and
    /// attempts fall back to direct connections.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AsinflowError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let pool = Self::from_list_str(&contents);
                tracing::info!(path = %path.display(), relays = pool.len(), "Loaded relay list");
                Ok(pool)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Relay list not found, using direct connections");
                Ok(Self::empty())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the relays.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.relays
    }

    /// Returns the number of relays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relays.len()
    }

    /// Returns true if there are no relays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_identity_pool() {
        let pool = IdentityPool::default();
        assert_eq!(pool.len(), DEFAULT_USER_AGENTS.len());
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_identity_pool_rejects_blank() {
        assert!(IdentityPool::new(["  ", ""]).is_err());
        let pool = IdentityPool::new([" agent-a ", "", "agent-b"]).expect("non-empty");
        assert_eq!(pool.as_slice(), ["agent-a".to_string(), "agent-b".to_string()]);
    }

    #[test]
    fn test_relay_list_parsing() {
        let pool = RelayPool::from_list_str("10.0.0.1:8080\n\n  # backup\n 10.0.0.2:3128 \n");
        assert_eq!(
            pool.as_slice(),
            ["10.0.0.1:8080".to_string(), "10.0.0.2:3128".to_string()]
        );
    }

    #[test]
    fn test_relay_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = RelayPool::load(dir.path().join("proxies.txt")).expect("missing file tolerated");
        assert!(pool.is_empty());
    }

    #[test]
    fn test_relay_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "192.168.1.10:8000").expect("write");
        writeln!(file, "192.168.1.11:8000").expect("write");

        let pool = RelayPool::load(file.path()).expect("readable");
        assert_eq!(pool.len(), 2);
    }
}
