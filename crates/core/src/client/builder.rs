use std::sync::Mutex;

use askbar_model::{Credential, ModelProvider};

use super::{ConversationClient, State};
use crate::config::{Defaulting, GenerationOptions};
use crate::conversation::Conversation;
use crate::model_client::ModelClient;

/// The model used when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// [`ConversationClient`] builder.
pub struct ConversationClientBuilder {
    model_client: ModelClient,
    credential: Credential,
    model: Option<String>,
    options: GenerationOptions,
    defaulting: Defaulting,
    greeting: Option<String>,
}

impl ConversationClientBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            credential: Credential::default(),
            model: None,
            options: GenerationOptions::default(),
            defaulting: Defaulting::default(),
            greeting: None,
        }
    }

    /// Sets the credential. Without one, every send fails.
    #[inline]
    pub fn with_credential<C: Into<Credential>>(mut self, credential: C) -> Self {
        self.credential = credential.into();
        self
    }

    /// Sets the model identifier, [`DEFAULT_MODEL`] otherwise.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the generation options.
    #[inline]
    pub fn with_generation_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets how unset generation options fall back to their defaults.
    #[inline]
    pub fn with_defaulting(mut self, defaulting: Defaulting) -> Self {
        self.defaulting = defaulting;
        self
    }

    /// Seeds the transcript with a model turn that is shown in the history
    /// but never sent to the model.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Builds the client.
    pub fn build(self) -> ConversationClient {
        let Self {
            model_client,
            credential,
            model,
            options,
            defaulting,
            greeting,
        } = self;

        let state = State {
            credential,
            generation_config: options.resolve(defaulting),
            conversation: Conversation::with_greeting(greeting),
        };
        ConversationClient {
            model_client,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            defaulting,
            state: Mutex::new(state),
            gate: Default::default(),
        }
    }
}
