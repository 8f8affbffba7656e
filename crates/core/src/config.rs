//! Generation settings supplied by the caller.

use askbar_model::GenerationConfig;

/// How unset generation options fall back to their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Defaulting {
    /// Zero, `NaN` and empty values count as unset, like absent ones.
    ///
    /// With this mode a temperature of `0.0` can't be requested, it
    /// always resolves to the default temperature.
    #[default]
    Falsy,
    /// Only absent values fall back to the defaults.
    Explicit,
}

/// Generation options, any of which may be left unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Nucleus-sampling threshold.
    pub top_p: Option<f64>,
    /// Top-k sampling size.
    pub top_k: Option<u32>,
    /// Maximum length of the reply in tokens.
    pub max_output_tokens: Option<u32>,
    /// MIME type of the generated content.
    pub response_mime_type: Option<String>,
}

impl GenerationOptions {
    /// Sets the sampling temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the nucleus-sampling threshold.
    #[inline]
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the top-k sampling size.
    #[inline]
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets the maximum length of the reply in tokens.
    #[inline]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Sets the MIME type of the generated content.
    #[inline]
    pub fn with_response_mime_type<S: Into<String>>(mut self, mime: S) -> Self {
        self.response_mime_type = Some(mime.into());
        self
    }

    /// Resolves every option into a concrete value.
    pub fn resolve(&self, defaulting: Defaulting) -> GenerationConfig {
        let defaults = GenerationConfig::default();
        GenerationConfig {
            temperature: pick(self.temperature, defaults.temperature, defaulting),
            top_p: pick(self.top_p, defaults.top_p, defaulting),
            top_k: pick(self.top_k, defaults.top_k, defaulting),
            max_output_tokens: pick(
                self.max_output_tokens,
                defaults.max_output_tokens,
                defaulting,
            ),
            response_mime_type: pick(
                self.response_mime_type.clone(),
                defaults.response_mime_type,
                defaulting,
            ),
        }
    }
}

trait Falsy {
    fn is_falsy(&self) -> bool;
}

impl Falsy for f64 {
    #[inline]
    fn is_falsy(&self) -> bool {
        *self == 0.0 || self.is_nan()
    }
}

impl Falsy for u32 {
    #[inline]
    fn is_falsy(&self) -> bool {
        *self == 0
    }
}

impl Falsy for String {
    #[inline]
    fn is_falsy(&self) -> bool {
        self.is_empty()
    }
}

#[inline]
fn pick<T: Falsy>(value: Option<T>, default: T, defaulting: Defaulting) -> T {
    match value {
        Some(value)
            if defaulting == Defaulting::Explicit || !value.is_falsy() =>
        {
            value
        }
        _ => default,
    }
}
