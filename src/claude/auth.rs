//! API key lookup: environment first, then the system keyring

use keyring::Entry;

use super::error::ClaudeError;

/// Environment variable checked before the keyring
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

const SERVICE_NAME: &str = "solo-leveling";
const API_KEY_ENTRY: &str = "anthropic-api-key";

/// Manages the Claude API key
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Key from `ANTHROPIC_API_KEY`, falling back to the keyring
    pub fn resolve() -> Result<String, ClaudeError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Self::get_api_key(),
        }
    }

    /// Get the API key from system keyring
    pub fn get_api_key() -> Result<String, ClaudeError> {
        let entry = Self::entry()?;
        entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => ClaudeError::ApiKeyNotFound,
            _ => ClaudeError::KeyringError(e.to_string()),
        })
    }

    /// Store the API key in system keyring
    pub fn set_api_key(key: &str) -> Result<(), ClaudeError> {
        if !Self::validate_key_format(key) {
            return Err(ClaudeError::InvalidApiKey);
        }
        Self::entry()?.set_password(key).map_err(|e| ClaudeError::KeyringError(e.to_string()))
    }

    /// Delete the stored API key
    pub fn delete_api_key() -> Result<(), ClaudeError> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ClaudeError::KeyringError(e.to_string())),
        }
    }

    fn entry() -> Result<Entry, ClaudeError> {
        Entry::new(SERVICE_NAME, API_KEY_ENTRY).map_err(|e| ClaudeError::KeyringError(e.to_string()))
    }

    /// Anthropic keys start with "sk-ant-"
    fn validate_key_format(key: &str) -> bool {
        key.starts_with("sk-ant-") && key.len() > 20
    }

    /// Mask a key for display, keeping the first 8 and last 4 characters
    pub fn mask_key(key: &str) -> String {
        if key.len() <= 12 {
            return "*".repeat(key.len());
        }
        format!("{}...{}", &key[..8], &key[key.len() - 4..])
    }
}
