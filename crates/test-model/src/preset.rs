use serde::{Deserialize, Serialize};

/// How the fake model answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PresetReply {
    /// A successful reply carrying the text.
    Text(String),
    /// A successful reply whose payload has no text.
    Empty,
    /// The provider rejects the request with the message.
    Rejected(String),
    /// The request fails before reaching the provider.
    Unreachable(String),
}

impl PresetReply {
    /// Creates a successful reply carrying `text`.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }

    /// Creates a rejection carrying `message`.
    #[inline]
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self::Rejected(message.into())
    }
}
