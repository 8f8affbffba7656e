mod builder;
#[cfg(test)]
mod tests;

use std::sync::{Mutex, MutexGuard, PoisonError};

use askbar_model::{Credential, GenerationConfig, ModelRequest};

use crate::config::{Defaulting, GenerationOptions};
use crate::conversation::{Conversation, Turn};
use crate::error::Error;
use crate::model_client::ModelClient;
pub use builder::{ConversationClientBuilder, DEFAULT_MODEL};

/// The reply text used when the provider answered without any text.
pub const NO_RESPONSE_FALLBACK: &str = "No response generated";

/// A conversation with a model.
///
/// The client owns the transcript, the credential and the generation
/// settings, and performs one request/reply cycle per
/// [`send_message`](Self::send_message) call.
///
/// Overlapping `send_message` calls are queued: a call only touches the
/// transcript once every earlier call has finished, so a request never
/// carries a question that has not been answered yet. There is no
/// timeout and no retry.
pub struct ConversationClient {
    model_client: ModelClient,
    model: String,
    defaulting: Defaulting,
    state: Mutex<State>,
    gate: tokio::sync::Mutex<()>,
}

struct State {
    credential: Credential,
    generation_config: GenerationConfig,
    conversation: Conversation,
}

impl ConversationClient {
    /// Sends `text` as the next user turn and returns the model's reply.
    ///
    /// The user turn stays in the transcript even if the call fails
    /// afterwards. The reply is appended as a model turn on success.
    pub async fn send_message<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<String, Error> {
        let text = text.into();
        let _gate = self.gate.lock().await;

        let (request, epoch) = {
            let mut state = self.state();
            if state.credential.is_empty() {
                warn!("refusing to send a message without a credential");
                return Err(Error::MissingCredential);
            }
            state.conversation.push(Turn::user(text));
            let request = ModelRequest {
                model: self.model.clone(),
                credential: state.credential.clone(),
                messages: state.conversation.messages(),
                generation_config: state.generation_config.clone(),
            };
            (request, state.conversation.epoch())
        };

        let reply = self
            .model_client
            .send_request(request)
            .await
            .map_err(|err| Error::from_provider(err.as_ref()))?;
        let text = reply.text.unwrap_or_else(|| {
            debug!("no text in the reply, using the fallback");
            NO_RESPONSE_FALLBACK.to_owned()
        });

        let mut state = self.state();
        if state.conversation.epoch() == epoch {
            state.conversation.push(Turn::model(text.clone()));
        } else {
            debug!("history was cleared while waiting, reply not recorded");
        }
        Ok(text)
    }

    /// Resets the transcript, keeping the greeting if there is one.
    #[inline]
    pub fn clear_history(&self) -> &Self {
        self.state().conversation.clear();
        self
    }

    /// Returns a copy of the transcript, oldest turn first.
    #[inline]
    pub fn history(&self) -> Vec<Turn> {
        self.state().conversation.turns()
    }

    /// Replaces the credential. Requests already sent keep the old one.
    #[inline]
    pub fn set_credential<C: Into<Credential>>(&self, credential: C) -> &Self {
        self.state().credential = credential.into();
        self
    }

    /// Returns `true` if a non-empty credential is set.
    #[inline]
    pub fn credential_is_set(&self) -> bool {
        !self.state().credential.is_empty()
    }

    /// Replaces the generation options, resolved the same way as the ones
    /// given at construction.
    #[inline]
    pub fn set_generation_options(&self, options: &GenerationOptions) -> &Self {
        self.state().generation_config = options.resolve(self.defaulting);
        self
    }

    /// Returns the resolved generation settings sent with every request.
    #[inline]
    pub fn generation_config(&self) -> GenerationConfig {
        self.state().generation_config.clone()
    }

    /// Returns the identifier of the model this client talks to.
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
