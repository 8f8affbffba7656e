use askbar_model::ErrorKind;
use reqwest::Url;

use crate::Error;

/// The public Generative Language API, version 1.
pub const DEFAULT_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1";

/// Builder for [`GeminiConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeminiConfigBuilder {
    base_url: Option<String>,
}

impl GeminiConfigBuilder {
    /// Creates a builder with every option left at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom base URL, e.g. a proxy or a local mock server.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> GeminiConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        GeminiConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

/// Configuration for the Gemini provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeminiConfig {
    pub(crate) base_url: String,
}

impl GeminiConfig {
    /// Returns the base URL requests are sent to.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the content-generation endpoint for `model`, with the key
    /// attached as the `key` query parameter.
    ///
    /// The model id is a single path segment, reserved characters in it
    /// are percent-encoded.
    pub(crate) fn generate_content_url(
        &self,
        model: &str,
        key: &str,
    ) -> Result<Url, Error> {
        let invalid = |reason: String| {
            Error::new(format!("invalid endpoint: {reason}"), ErrorKind::Transport)
        };

        let mut url =
            Url::parse(&self.base_url).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("{} can't be a base", self.base_url)))?
            .pop_if_empty()
            .push("models")
            .push(&format!("{model}:generateContent"));
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }
}
