//! A model provider for the Gemini `generateContent` API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use askbar_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use reqwest::{Client, StatusCode, header};

pub use config::{DEFAULT_BASE_URL, GeminiConfig, GeminiConfigBuilder};
use proto::GenerateContentResponse;

/// Error type for [`GeminiProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn transport(err: reqwest::Error) -> Self {
        // The URL carries the key, it must not end up in messages or logs.
        Self::new(format!("{}", err.without_url()), ErrorKind::Transport)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
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

/// Gemini model provider.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl Default for GeminiProvider {
    #[inline]
    fn default() -> Self {
        Self::new(GeminiConfigBuilder::new().build())
    }
}

impl ModelProvider for GeminiProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let body = proto::create_request(req);
        let builder = self
            .config
            .generate_content_url(&req.model, req.credential.expose())
            .map(|url| {
                self.client
                    .post(url)
                    .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .json(&body)
            });
        let model = req.model.clone();
        let message_count = req.messages.len();

        async move {
            trace!("sending {message_count} message(s) to {model}");
            let resp = builder?.send().await.map_err(Error::transport)?;

            let status = resp.status();
            if !status.is_success() {
                // The body is best effort, the status line is the fallback.
                let body = resp.text().await.unwrap_or_default();
                let message = proto::error_message(&body)
                    .unwrap_or_else(|| status_text(status));
                warn!("provider rejected the request ({status}): {message}");
                return Err(Error::new(message, ErrorKind::Provider));
            }

            let resp = resp
                .json::<GenerateContentResponse>()
                .await
                .map_err(Error::transport)?;
            let text = resp.into_reply_text();
            if text.is_none() {
                debug!("response from {model} carries no text");
            }
            Ok(ModelReply { text })
        }
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| status.as_str().to_owned())
}
