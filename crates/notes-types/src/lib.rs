pub mod notes;
pub mod theme;
pub use notes::*;
pub use theme::Theme;

use std::fmt;

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the light/dark preference.
pub const THEME_KEY: &str = "theme";

/// Opaque bearer credential issued by the backend on login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AuthToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
