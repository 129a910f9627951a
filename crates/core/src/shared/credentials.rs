use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{PEXELS_API_KEY_ENV, PEXELS_CREDENTIALS_KEY};

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("credentials file not found at {path} and {env} is not set")]
    Missing { path: PathBuf, env: &'static str },
    #[error("failed to read credentials file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed credentials file {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("credentials file {path} has no non-empty \"{key}\" entry")]
    MissingKey { path: PathBuf, key: &'static str },
}

/// API keys for external services, loaded once at startup and passed
/// explicitly to the clients that need them.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeys {
    pexels: String,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("pexels", &"<redacted>")
            .finish()
    }
}

impl ApiKeys {
    pub fn new(pexels: impl Into<String>) -> Self {
        Self {
            pexels: pexels.into(),
        }
    }

    pub fn pexels(&self) -> &str {
        &self.pexels
    }

    /// Loads keys from a JSON file shaped like `{"pexels": "<key>"}`.
    ///
    /// When the file does not exist, falls back to the `PEXELS_API_KEY`
    /// environment variable.
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        if !path.exists() {
            return match std::env::var(PEXELS_API_KEY_ENV) {
                Ok(key) if !key.trim().is_empty() => {
                    log::debug!("Using {PEXELS_API_KEY_ENV} from environment");
                    Ok(Self::new(key.trim()))
                }
                _ => Err(CredentialsError::Missing {
                    path: path.to_path_buf(),
                    env: PEXELS_API_KEY_ENV,
                }),
            };
        }

        let json = fs::read_to_string(path).map_err(|e| CredentialsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&json, path)
    }

    fn parse(json: &str, path: &Path) -> Result<Self, CredentialsError> {
        let entries: HashMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| CredentialsError::Malformed {
                path: path.to_path_buf(),
                source: e,
            })?;

        entries
            .get(PEXELS_CREDENTIALS_KEY)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Self::new)
            .ok_or(CredentialsError::MissingKey {
                path: path.to_path_buf(),
                key: PEXELS_CREDENTIALS_KEY,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_reads_pexels_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("api_keys.json");
        fs::write(&path, r#"{"pexels": "abc123", "other": "x"}"#).unwrap();

        let keys = ApiKeys::load(&path).unwrap();
        assert_eq!(keys.pexels(), "abc123");
    }

    #[test]
    fn test_malformed_json_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("api_keys.json");
        fs::write(&path, "{not json").unwrap();

        let err = ApiKeys::load(&path).unwrap_err();
        assert!(matches!(err, CredentialsError::Malformed { .. }));
    }

    #[test]
    fn test_missing_key_entry_is_error() {
        let err = ApiKeys::parse(r#"{"unsplash": "k"}"#, Path::new("keys.json")).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingKey { .. }));
    }

    #[test]
    fn test_blank_key_is_error() {
        let err = ApiKeys::parse(r#"{"pexels": "   "}"#, Path::new("keys.json")).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingKey { .. }));
    }

    #[test]
    fn test_non_string_key_is_error() {
        let err = ApiKeys::parse(r#"{"pexels": 42}"#, Path::new("keys.json")).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingKey { .. }));
    }

    #[test]
    fn test_absent_file_falls_back_to_environment() {
        // Only this test touches the variable.
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no_such_keys.json");

        std::env::set_var(PEXELS_API_KEY_ENV, " env-key ");
        assert_eq!(ApiKeys::load(&path).unwrap().pexels(), "env-key");

        std::env::set_var(PEXELS_API_KEY_ENV, "   ");
        let blank = ApiKeys::load(&path).unwrap_err();
        assert!(matches!(blank, CredentialsError::Missing { .. }));

        std::env::remove_var(PEXELS_API_KEY_ENV);
        let unset = ApiKeys::load(&path).unwrap_err();
        assert!(matches!(
            unset,
            CredentialsError::Missing { env: "PEXELS_API_KEY", .. }
        ));
        assert!(unset.to_string().contains("no_such_keys.json"));
    }

    #[test]
    fn test_malformed_message_leaves_cause_to_source() {
        let err = ApiKeys::parse("{not json", Path::new("keys.json")).unwrap_err();
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert_eq!(err.to_string(), "malformed credentials file keys.json");
        assert!(!err.to_string().contains(&cause));
    }

    #[test]
    fn test_debug_redacts_key() {
        let keys = ApiKeys::new("secret");
        assert!(!format!("{keys:?}").contains("secret"));
    }
}
