
use crate::Credential;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
/// Default nucleus-sampling threshold.
pub const DEFAULT_TOP_P: f64 = 0.95;
/// Default top-k sampling size.
pub const DEFAULT_TOP_K: u32 = 40;
/// Default maximum number of output tokens.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
/// Default MIME type of the generated content.
pub const DEFAULT_RESPONSE_MIME_TYPE: &str = "text/plain";

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// Identifier of the model that should answer.
    pub model: String,
    /// The key authorizing this request.
    pub credential: Credential,
    /// The conversation so far, oldest first.
    pub messages: Vec<ModelMessage>,
    /// Generation parameters sent along with the messages.
    pub generation_config: GenerationConfig,
}

/// A complete message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// A user input text.
    User(String),
    /// A text previously produced by the model.
    Model(String),
}

impl ModelMessage {
    /// Returns the text of this message.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            ModelMessage::User(text) | ModelMessage::Model(text) => text,
        }
    }
}

/// Fully resolved generation parameters.
///
/// Every field always holds a concrete value, resolving defaults is the
/// caller's business.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus-sampling threshold.
    pub top_p: f64,
    /// Top-k sampling size.
    pub top_k: u32,
    /// Maximum length of the reply in tokens.
    pub max_output_tokens: u32,
    /// MIME type of the generated content.
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            response_mime_type: DEFAULT_RESPONSE_MIME_TYPE.to_owned(),
        }
    }
}
