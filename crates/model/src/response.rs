/// A reply from the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModelReply {
    /// The reply text, or `None` if the provider answered successfully
    /// but the payload carried no text.
    pub text: Option<String>,
}

impl ModelReply {
    /// Creates a reply carrying the given text.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Creates a reply without any text.
    #[inline]
    pub fn empty() -> Self {
        Self { text: None }
    }
}
