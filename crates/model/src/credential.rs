use std::fmt::{self, Debug, Formatter};

/// An API key authorizing calls to the model provider.
///
/// The key is never printed by `Debug`, so requests and configurations
/// holding it can be logged freely.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential from the raw key.
    #[inline]
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Returns `true` if no key has been provided.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw key.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Credential {
    #[inline]
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for Credential {
    #[inline]
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}
