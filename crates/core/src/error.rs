use std::error::Error as StdError;
use std::fmt::{self, Display};

use askbar_model::{ErrorKind, ModelProviderError};

/// The error type for [`crate::ConversationClient`].
///
/// Every error ends only the call that returned it, the client stays
/// usable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// No credential was set, nothing was sent.
    MissingCredential,
    /// The provider answered with a failure.
    Provider {
        /// Message from the provider, or the HTTP status text.
        message: String,
    },
    /// The request failed below the provider (network, decoding, etc.).
    Transport {
        /// Description of the underlying failure.
        message: String,
    },
}

impl Error {
    pub(crate) fn from_provider(err: &dyn ModelProviderError) -> Self {
        let message = err.message().to_owned();
        match err.kind() {
            ErrorKind::Provider => Self::Provider { message },
            ErrorKind::Transport => Self::Transport { message },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingCredential => write!(f, "API key is required"),
            Error::Provider { message } => write!(f, "API error: {message}"),
            Error::Transport { message } => {
                write!(f, "failed to reach the provider: {message}")
            }
        }
    }
}

impl StdError for Error {}
