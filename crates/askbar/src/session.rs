use askbar_core::config::GenerationOptions;
use askbar_core::conversation::Turn;
use askbar_core::model::ModelProvider;
use askbar_core::{ConversationClient, ConversationClientBuilder, Error};

use crate::store::{CredentialStore, MemoryStore, StoreError};

/// The model turn every conversation starts with.
pub const GREETING: &str = "Hello! I'm an AI assistant. Ask me anything, \
                            and I'll do my best to help you.";

/// Shown in place of a reply when a message could not be answered.
pub const FAILURE_NOTICE: &str = "Sorry, I encountered an error. Please \
                                  check your API key or try again later.";

/// The outcome of [`Session::submit`].
#[derive(Debug)]
pub enum Submission {
    /// The input was blank, nothing happened.
    Ignored,
    /// No API key is set, nothing was sent.
    CredentialRequired,
    /// The model replied.
    Replied(String),
    /// The message was sent but not answered. The user turn stays in the
    /// history, `notice` is what to show in place of a reply.
    Failed {
        /// A static message suitable for the user.
        notice: &'static str,
        /// What went wrong.
        error: Error,
    },
}

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    client_builder: ConversationClientBuilder,
    store: Box<dyn CredentialStore>,
    credential: Option<String>,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let client_builder =
            ConversationClientBuilder::with_model_provider(provider)
                .with_greeting(GREETING);
        Self {
            client_builder,
            store: Box::new(MemoryStore::default()),
            credential: None,
        }
    }

    /// Sets where the API key is loaded from and saved to.
    #[inline]
    pub fn with_store(mut self, store: impl CredentialStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Uses `credential` instead of the stored key, without saving it.
    #[inline]
    pub fn with_credential<S: Into<String>>(mut self, credential: S) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Sets the model to talk to.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.client_builder = self.client_builder.with_model(model);
        self
    }

    /// Sets the generation options.
    #[inline]
    pub fn with_generation_options(mut self, options: GenerationOptions) -> Self {
        self.client_builder = self.client_builder.with_generation_options(options);
        self
    }

    /// Builds a new session, reading the stored key once.
    pub fn build(self) -> Result<Session, StoreError> {
        let Self {
            client_builder,
            store,
            credential,
        } = self;

        let credential = match credential {
            Some(credential) => Some(credential),
            None => store.load()?,
        };
        let client_builder = match credential {
            Some(credential) => client_builder.with_credential(credential),
            None => client_builder,
        };

        Ok(Session {
            client: client_builder.build(),
            store,
        })
    }
}

/// A chat session, like a window that displays messages and has an input
/// box.
///
/// The session holds a fully configured [`ConversationClient`] and the
/// store its API key comes from.
pub struct Session {
    client: ConversationClient,
    store: Box<dyn CredentialStore>,
}

impl Session {
    /// Submits the text typed by the user.
    pub async fn submit(&self, input: &str) -> Submission {
        if input.trim().is_empty() {
            return Submission::Ignored;
        }
        if !self.client.credential_is_set() {
            return Submission::CredentialRequired;
        }

        match self.client.send_message(input).await {
            Ok(reply) => Submission::Replied(reply),
            Err(Error::MissingCredential) => Submission::CredentialRequired,
            Err(error) => {
                warn!("message was not answered: {error}");
                Submission::Failed {
                    notice: FAILURE_NOTICE,
                    error,
                }
            }
        }
    }

    /// Saves a new API key and starts using it.
    pub fn save_credential(&self, credential: &str) -> Result<(), StoreError> {
        self.store.save(credential)?;
        self.client.set_credential(credential);
        Ok(())
    }

    /// Returns `true` if an API key is set.
    #[inline]
    pub fn has_credential(&self) -> bool {
        self.client.credential_is_set()
    }

    /// Starts over with a fresh conversation.
    #[inline]
    pub fn new_thread(&self) {
        self.client.clear_history();
    }

    /// Returns the conversation so far, greeting included.
    #[inline]
    pub fn history(&self) -> Vec<Turn> {
        self.client.history()
    }

    /// Returns the underlying conversation client.
    #[inline]
    pub fn client(&self) -> &ConversationClient {
        &self.client
    }
}
