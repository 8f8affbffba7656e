//! Conversation-related types.

use askbar_model::ModelMessage;
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The person typing.
    User,
    /// The model answering.
    Model,
}

/// One message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    /// Creates a turn typed by the user.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// Creates a turn produced by the model.
    #[inline]
    pub fn model<S: Into<String>>(text: S) -> Self {
        Self {
            speaker: Speaker::Model,
            text: text.into(),
        }
    }

    /// Returns who produced this turn.
    #[inline]
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the literal text of this turn.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn to_message(&self) -> ModelMessage {
        match self.speaker {
            Speaker::User => ModelMessage::User(self.text.clone()),
            Speaker::Model => ModelMessage::Model(self.text.clone()),
        }
    }
}

/// The transcript of one conversation.
///
/// Turns are only ever appended. The optional greeting is shown as the
/// first turn but never sent to the model, and it survives `clear`.
#[derive(Clone, Default, Debug)]
pub(crate) struct Conversation {
    greeting: Option<Turn>,
    turns: Vec<Turn>,
    // Bumped on every `clear`, so a reply that was requested before the
    // clear can tell that its transcript is gone.
    epoch: u64,
}

impl Conversation {
    #[inline]
    pub(crate) fn with_greeting(greeting: Option<String>) -> Self {
        Self {
            greeting: greeting.map(Turn::model),
            ..Default::default()
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.turns.clear();
        self.epoch += 1;
    }

    #[inline]
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Every turn including the greeting, oldest first.
    pub(crate) fn turns(&self) -> Vec<Turn> {
        self.greeting.iter().chain(&self.turns).cloned().collect()
    }

    /// The turns to send to the model, which leaves out the greeting.
    pub(crate) fn messages(&self) -> Vec<ModelMessage> {
        self.turns.iter().map(Turn::to_message).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_greeting_is_shown_but_not_sent() {
        let mut conversation =
            Conversation::with_greeting(Some("Hello!".to_owned()));
        conversation.push(Turn::user("Hi"));
        assert_eq!(conversation.turns(), [Turn::model("Hello!"), Turn::user("Hi")]);
        assert_eq!(conversation.messages(), [ModelMessage::User("Hi".to_owned())]);

        conversation.clear();
        assert_eq!(conversation.turns(), [Turn::model("Hello!")]);
        assert!(conversation.messages().is_empty());
        assert_eq!(conversation.epoch(), 1);
    }

    #[test]
    fn test_turn_serialization() {
        let turn = Turn::model("Paris");
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            json!({ "speaker": "model", "text": "Paris" })
        );
    }
}
