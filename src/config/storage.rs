//! # Storage Configuration
//!
//! Which storage account and container to query, how to authenticate, and
//! which package suffix counts as an artifact.
//!
//! | Variable | Default |
//! |---|---|
//! | `AZURE_ACCOUNT` | `laow` |
//! | `AZURE_CONTAINER` | `birdid-apk` |
//! | `AZURE_SAS_TOKEN` | unset (anonymous access) |
//! | `AZURE_BLOB_ENDPOINT` | unset (`https://{account}.blob.core.windows.net`) |
//! | `ARTIFACT_EXTENSION` | `.apk` |

use super::{non_empty, ConfigError};
use crate::constants::{DEFAULT_ARTIFACT_EXTENSION, DEFAULT_AZURE_ACCOUNT, DEFAULT_AZURE_CONTAINER};
use zeroize::Zeroizing;

/// Storage settings for one resolver instance
#[derive(Clone)]
pub struct StorageConfig {
    /// Storage account name
    pub account: String,
    /// Container holding the uploaded packages
    pub container: String,
    /// Shared access signature query string; `None` means anonymous access
    pub sas_token: Option<Zeroizing<String>>,
    /// Account base URL override (Azurite, mock server, sovereign clouds)
    pub endpoint: Option<String>,
    /// Name suffix identifying installable packages
    pub extension: String,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("account", &self.account)
            .field("container", &self.container)
            .field("sas_token", &self.sas_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("extension", &self.extension)
            .finish()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            account: non_empty(&lookup, "AZURE_ACCOUNT")
                .unwrap_or_else(|| DEFAULT_AZURE_ACCOUNT.to_string()),
            container: non_empty(&lookup, "AZURE_CONTAINER")
                .unwrap_or_else(|| DEFAULT_AZURE_CONTAINER.to_string()),
            sas_token: non_empty(&lookup, "AZURE_SAS_TOKEN").map(Zeroizing::new),
            endpoint: non_empty(&lookup, "AZURE_BLOB_ENDPOINT"),
            extension: non_empty(&lookup, "ARTIFACT_EXTENSION")
                .unwrap_or_else(|| DEFAULT_ARTIFACT_EXTENSION.to_string()),
        }
    }

    /// Account base URL that listing and download URLs are built from
    ///
    /// Never contains the SAS token.
    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => paths::account_url(&self.account),
        }
    }

    /// Whether listing requests carry a SAS credential
    pub fn is_authenticated(&self) -> bool {
        self.sas_token.is_some()
    }

    /// Check names against the Azure naming rules
    ///
    /// # Errors
    ///
    /// Returns the first rule that is violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.endpoint {
            Some(endpoint) => {
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    return Err(ConfigError::InvalidEndpoint(endpoint.clone()));
                }
            }
            // The account name only ends up in the host when no endpoint is given
            None => {
                if !is_valid_account_name(&self.account) {
                    return Err(ConfigError::InvalidAccount(self.account.clone()));
                }
            }
        }
        if !is_valid_container_name(&self.container) {
            return Err(ConfigError::InvalidContainer(self.container.clone()));
        }
        if self.extension.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        Ok(())
    }
}

fn is_valid_account_name(name: &str) -> bool {
    (3..=24).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn is_valid_container_name(name: &str) -> bool {
    if name == "$root" || name == "$web" {
        return true;
    }
    (3..=63).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> StorageConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorageConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.account, "laow");
        assert_eq!(config.container, "birdid-apk");
        assert_eq!(config.extension, ".apk");
        assert!(config.sas_token.is_none());
        assert!(!config.is_authenticated());
        assert_eq!(config.base_url(), "https://laow.blob.core.windows.net");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("AZURE_ACCOUNT", ""),
            ("AZURE_CONTAINER", "  "),
            ("AZURE_SAS_TOKEN", ""),
        ]);
        assert_eq!(config.account, "laow");
        assert_eq!(config.container, "birdid-apk");
        assert!(config.sas_token.is_none());
    }

    #[test]
    fn test_sas_token_and_endpoint() {
        let config = config_from(&[
            ("AZURE_SAS_TOKEN", "sv=2022-11-02&sp=rl&sig=abc"),
            ("AZURE_BLOB_ENDPOINT", "http://127.0.0.1:10000/devstoreaccount1/"),
        ]);
        assert!(config.is_authenticated());
        assert_eq!(config.base_url(), "http://127.0.0.1:10000/devstoreaccount1");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_debug_redacts_sas_token() {
        let config = config_from(&[("AZURE_SAS_TOKEN", "sig=very-secret")]);
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_invalid_account() {
        let config = config_from(&[("AZURE_ACCOUNT", "My_Account")]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidAccount("My_Account".to_string()))
        );
    }

    #[test]
    fn test_account_not_checked_with_endpoint() {
        let config = config_from(&[
            ("AZURE_ACCOUNT", "devstoreaccount1_x"),
            ("AZURE_BLOB_ENDPOINT", "http://localhost:10000/devstoreaccount1"),
        ]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = config_from(&[("AZURE_BLOB_ENDPOINT", "localhost:10000")]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_empty_extension_rejected() {
        // Environment loading never yields an empty extension, but the fields are public
        let config = StorageConfig {
            extension: String::new(),
            ..StorageConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyExtension));
    }

    #[test]
    fn test_container_names() {
        for valid in ["birdid-apk", "abc", "a1-b2-c3", "$web"] {
            assert!(is_valid_container_name(valid), "{valid} should be valid");
        }
        for invalid in ["ab", "-apk", "apk-", "bird--id", "BirdId", "bird_id"] {
            assert!(!is_valid_container_name(invalid), "{invalid} should be invalid");
        }
    }
}
