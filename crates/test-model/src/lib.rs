//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use askbar_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Default)]
struct Shared {
    script: VecDeque<PresetReply>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should answer. Each request consumes the next reply in the order
/// they were added. If the script runs out, a transport error is returned.
///
/// Every received request is recorded, and clones of the provider share
/// both the script and the records, so a test can keep one clone for
/// inspection while the client under test owns another.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    shared: Arc<Mutex<Shared>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_reply(&mut self, reply: PresetReply) {
        self.lock().script.push_back(reply);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns every request received so far, oldest first.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let preset = {
            let mut shared = self.lock();
            shared.requests.push(req.clone());
            shared.script.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match preset {
                Some(PresetReply::Text(text)) => Ok(ModelReply::with_text(text)),
                Some(PresetReply::Empty) => Ok(ModelReply::empty()),
                Some(PresetReply::Rejected(message)) => Err(Error {
                    message,
                    kind: ErrorKind::Provider,
                }),
                Some(PresetReply::Unreachable(message)) => Err(Error {
                    message,
                    kind: ErrorKind::Transport,
                }),
                None => Err(Error {
                    message: "not enough replies".to_owned(),
                    kind: ErrorKind::Transport,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use askbar_model::{Credential, GenerationConfig, ModelMessage};

    use super::*;

    fn request(text: &str) -> ModelRequest {
        ModelRequest {
            model: "test".to_owned(),
            credential: Credential::new("key"),
            messages: vec![ModelMessage::User(text.to_owned())],
            generation_config: GenerationConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestModelProvider::default();
        provider.add_reply(PresetReply::text("Hello, world!"));
        provider.add_reply(PresetReply::Empty);
        provider.add_reply(PresetReply::rejected("invalid key"));

        let reply = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(reply.text.as_deref(), Some("Hello, world!"));

        let reply = provider.send_request(&request("Again")).await.unwrap();
        assert_eq!(reply, ModelReply::empty());

        let err = provider.send_request(&request("Once more")).await;
        let err = err.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Provider);
        assert_eq!(err.message(), "invalid key");

        let err = provider.send_request(&request("Out of script")).await;
        let err = err.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), "not enough replies");

        let texts: Vec<_> = provider
            .requests()
            .iter()
            .map(|req| req.messages[0].text().to_owned())
            .collect();
        assert_eq!(texts, ["Hi", "Again", "Once more", "Out of script"]);
    }

    #[tokio::test]
    async fn test_clones_share_script() {
        let mut provider = TestModelProvider::default();
        let inspector = provider.clone();
        provider.add_reply(PresetReply::text("shared"));

        let reply = inspector.send_request(&request("Hi")).await.unwrap();
        assert_eq!(reply.text.as_deref(), Some("shared"));
        assert_eq!(provider.requests().len(), 1);
    }
}
