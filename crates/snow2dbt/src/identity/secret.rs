//! Where standard-auth passwords come from.

use super::error::IdentityError;
use snow2dbt_catalog::Secret;

pub trait SecretProvider {
    fn prompt(&self, prompt: &str) -> Result<Secret, IdentityError>;
}

/// Non-echoing prompt on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSecretProvider;

impl SecretProvider for TerminalSecretProvider {
    fn prompt(&self, prompt: &str) -> Result<Secret, IdentityError> {
        rpassword::prompt_password(prompt)
            .map(Secret::new)
            .map_err(IdentityError::SecretPrompt)
    }
}

/// Always answers with the same secret.
#[derive(Debug, Clone)]
pub struct FixedSecret(pub Secret);

impl FixedSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Secret::new(value))
    }
}

impl SecretProvider for FixedSecret {
    fn prompt(&self, _prompt: &str) -> Result<Secret, IdentityError> {
        Ok(self.0.clone())
    }
}
