use std::env;
use std::fmt;

pub const USERNAME_ENV: &str = "DOCKPLAN_REGISTRY_USERNAME";
pub const TOKEN_ENV: &str = "DOCKPLAN_REGISTRY_TOKEN";

/// Registry login handed straight from the credential store to an executor.
///
/// Never part of a job or a plan. `Debug` and `Display` redact the token.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryCredentials {
    username: String,
    token: String,
}

impl RegistryCredentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// No login; pushes rely on whatever the daemon is already logged in to
    pub fn anonymous() -> Self {
        Self::new("", "")
    }

    /// Reads `DOCKPLAN_REGISTRY_USERNAME` and `DOCKPLAN_REGISTRY_TOKEN`.
    /// Returns `None` unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let username = env::var(USERNAME_ENV).ok().filter(|v| !v.is_empty())?;
        let token = env::var(TOKEN_ENV).ok().filter(|v| !v.is_empty())?;
        Some(Self::new(username, token))
    }

    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.token.is_empty()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for RegistryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            f.write_str("anonymous")
        } else {
            write!(f, "{} (token redacted)", self.username)
        }
    }
}
