use std::fmt;
use std::fs;

use anyhow::Context;

use crate::config::Config;
use crate::error::GatewayError;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    /// Key used for all upstream data calls and static images.
    Backend,
    /// Key used when building interactive embed URLs.
    Embed,
}

impl CredentialScope {
    pub fn name(self) -> &'static str {
        match self {
            CredentialScope::Backend => "backend",
            CredentialScope::Embed => "embed",
        }
    }
}

/// Process-wide holder of the upstream API keys. Loaded once at startup,
/// read-only afterwards. The secrets never appear in logs or responses;
/// the Debug impl is redacted on purpose.
pub struct CredentialVault {
    backend_key: String,
    embed_key: Option<String>,
}

impl CredentialVault {
    /// Loads the vault from configuration. A secret file takes precedence
    /// over the plain environment value. Missing backend credential is
    /// startup-fatal.
    pub fn load(config: &Config) -> anyhow::Result<Self> {
        let backend_key = if config.maps_api_key_file.is_empty() {
            config.maps_api_key.trim().to_string()
        } else {
            fs::read_to_string(&config.maps_api_key_file)
                .with_context(|| {
                    format!("Failed to read API key file {}", config.maps_api_key_file)
                })?
                .trim()
                .to_string()
        };

        if backend_key.is_empty() {
            return Err(GatewayError::MissingCredential(CredentialScope::Backend.name()))
                .context("Set MAPS_API_KEY or MAPS_API_KEY_FILE before starting the gateway");
        }

        let embed_key = Some(config.maps_embed_key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            backend_key,
            embed_key,
        })
    }

    /// Returns the credential for the given scope. The embed scope falls
    /// back to the backend key when no dedicated embed key is configured.
    pub fn get(&self, scope: CredentialScope) -> Result<&str, GatewayError> {
        match scope {
            CredentialScope::Backend => Ok(&self.backend_key),
            CredentialScope::Embed => {
                Ok(self.embed_key.as_deref().unwrap_or(&self.backend_key))
            }
        }
    }
}

impl fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialVault")
            .field("backend_key", &"<redacted>")
            .field("embed_key", &self.embed_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> CredentialVault {
        CredentialVault {
            backend_key: "backend-secret".to_string(),
            embed_key: Some("embed-secret".to_string()),
        }
    }

    #[test]
    fn scopes_resolve_to_their_keys() {
        let vault = vault();
        assert_eq!(vault.get(CredentialScope::Backend).unwrap(), "backend-secret");
        assert_eq!(vault.get(CredentialScope::Embed).unwrap(), "embed-secret");
    }

    #[test]
    fn embed_scope_falls_back_to_backend_key() {
        let vault = CredentialVault {
            backend_key: "backend-secret".to_string(),
            embed_key: None,
        };
        assert_eq!(vault.get(CredentialScope::Embed).unwrap(), "backend-secret");
    }

    #[test]
    fn debug_output_is_redacted() {
        let rendered = format!("{:?}", vault());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
