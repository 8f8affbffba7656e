use askbar_model::{GenerationConfig, ModelMessage, ModelRequest};
use serde::{Deserialize, Serialize};

// ------------------------
// Types shared by both ends
// ------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: WireGenerationConfig,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    ///
    /// Any missing or `null` level yields `None`, and so does an empty
    /// text.
    pub fn into_reply_text(self) -> Option<String> {
        let candidate = self.candidates?.into_iter().next()?;
        let part = candidate.content?.parts?.into_iter().next()?;
        part.text.filter(|text| !text.is_empty())
    }
}

/// Extracts `error.message` from an error body, if there is a non-empty
/// one.
pub fn error_message(body: &str) -> Option<String> {
    let resp = serde_json::from_str::<ErrorResponse>(body).ok()?;
    resp.error?.message.filter(|message| !message.is_empty())
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &ModelRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: req.messages.iter().map(create_content).collect(),
        generation_config: create_generation_config(&req.generation_config),
    }
}

#[inline]
fn create_content(msg: &ModelMessage) -> Content {
    let role = match msg {
        ModelMessage::User(_) => "user",
        ModelMessage::Model(_) => "model",
    };
    Content {
        role: Some(role.to_owned()),
        parts: Some(vec![Part {
            text: Some(msg.text().to_owned()),
        }]),
    }
}

#[inline]
fn create_generation_config(config: &GenerationConfig) -> WireGenerationConfig {
    WireGenerationConfig {
        temperature: config.temperature,
        top_p: config.top_p,
        top_k: config.top_k,
        max_output_tokens: config.max_output_tokens,
        response_mime_type: config.response_mime_type.clone(),
    }
}
