/// Credential check for admin-gated operations.
///
/// Kept as a trait so clients (HTTP, CLI, tests) can swap the comparison
/// strategy without touching the operations themselves.
pub trait AdminAuth: Send + Sync {
    /// Returns true when the presented credential grants admin access.
    fn verify(&self, credential: Option<&str>) -> bool;
}

/// Shared-secret implementation backed by the configured admin password.
pub struct SecretAuth {
    secret: String,
}

impl SecretAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl AdminAuth for SecretAuth {
    fn verify(&self, credential: Option<&str>) -> bool {
        credential == Some(self.secret.as_str())
    }
}
