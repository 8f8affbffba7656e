use std::sync::Arc;
use std::time::Duration;

use askbar_model::{Credential, ModelMessage};
use askbar_test_model::{PresetReply, TestModelProvider};
use tokio::time::sleep;

use crate::config::{Defaulting, GenerationOptions};
use crate::conversation::{Speaker, Turn};
use crate::{
    ConversationClient, ConversationClientBuilder, DEFAULT_MODEL, Error,
    NO_RESPONSE_FALLBACK,
};

fn client_with(provider: &TestModelProvider) -> ConversationClient {
    ConversationClientBuilder::with_model_provider(provider.clone())
        .with_credential("test-key")
        .build()
}

#[tokio::test]
async fn test_transcript_alternates() {
    let mut provider = TestModelProvider::default();
    for reply in ["one", "two", "three"] {
        provider.add_reply(PresetReply::text(reply));
    }
    let client = client_with(&provider);

    for (idx, question) in ["a", "b", "c"].into_iter().enumerate() {
        client.send_message(question).await.unwrap();
        assert_eq!(client.history().len(), 2 * (idx + 1));
    }

    let speakers: Vec<_> =
        client.history().iter().map(Turn::speaker).collect();
    assert_eq!(
        speakers,
        [
            Speaker::User,
            Speaker::Model,
            Speaker::User,
            Speaker::Model,
            Speaker::User,
            Speaker::Model,
        ]
    );

    // Every request carries the whole transcript so far.
    let requests = provider.requests();
    assert_eq!(
        requests[2].messages,
        [
            ModelMessage::User("a".to_owned()),
            ModelMessage::Model("one".to_owned()),
            ModelMessage::User("b".to_owned()),
            ModelMessage::Model("two".to_owned()),
            ModelMessage::User("c".to_owned()),
        ]
    );
    assert_eq!(requests[2].model, DEFAULT_MODEL);
    assert_eq!(requests[2].credential, Credential::new("test-key"));
}

#[tokio::test]
async fn test_reply_is_returned_and_recorded() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::text("Paris"));
    let client = client_with(&provider);

    let reply = client.send_message("capital of France?").await.unwrap();
    assert_eq!(reply, "Paris");
    assert_eq!(client.history().last(), Some(&Turn::model("Paris")));
}

#[tokio::test]
async fn test_empty_reply_uses_fallback() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::Empty);
    let client = client_with(&provider);

    let reply = client.send_message("Hi").await.unwrap();
    assert_eq!(reply, NO_RESPONSE_FALLBACK);
    assert_eq!(
        client.history(),
        [Turn::user("Hi"), Turn::model("No response generated")]
    );
}

#[tokio::test]
async fn test_missing_credential() {
    let provider = TestModelProvider::default();
    let client = ConversationClientBuilder::with_model_provider(provider.clone())
        .with_greeting("Hello!")
        .build();
    let before = client.history();

    let err = client.send_message("Hi").await.unwrap_err();
    assert_eq!(err, Error::MissingCredential);
    assert_eq!(client.history(), before);
    assert!(provider.requests().is_empty());

    client.set_credential("");
    let err = client.send_message("Hi").await.unwrap_err();
    assert_eq!(err, Error::MissingCredential);
    assert!(!client.credential_is_set());
}

#[tokio::test]
async fn test_provider_error_keeps_user_turn() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::rejected("invalid key"));
    provider.add_reply(PresetReply::text("recovered"));
    let client = client_with(&provider);

    let err = client.send_message("Hi").await.unwrap_err();
    assert_eq!(
        err,
        Error::Provider {
            message: "invalid key".to_owned()
        }
    );
    assert_eq!(err.to_string(), "API error: invalid key");
    assert_eq!(client.history(), [Turn::user("Hi")]);

    // The client is still usable after a failure.
    let reply = client.send_message("Hi again").await.unwrap();
    assert_eq!(reply, "recovered");
    assert_eq!(
        client.history(),
        [
            Turn::user("Hi"),
            Turn::user("Hi again"),
            Turn::model("recovered"),
        ]
    );
}

#[tokio::test]
async fn test_transport_error() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::Unreachable("connection reset".to_owned()));
    let client = client_with(&provider);

    let err = client.send_message("Hi").await.unwrap_err();
    assert_eq!(
        err,
        Error::Transport {
            message: "connection reset".to_owned()
        }
    );
    assert_eq!(client.history(), [Turn::user("Hi")]);
}

#[tokio::test]
async fn test_clear_history() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::text("one"));
    provider.add_reply(PresetReply::text("two"));
    let client = ConversationClientBuilder::with_model_provider(provider.clone())
        .with_credential("test-key")
        .with_model("gemini-1.5-pro")
        .with_generation_options(GenerationOptions::default().with_top_k(5))
        .build();

    client.send_message("a").await.unwrap();
    let config = client.generation_config();
    assert!(client.clear_history().history().is_empty());
    assert!(client.credential_is_set());
    assert_eq!(client.generation_config(), config);
    assert_eq!(client.model(), "gemini-1.5-pro");

    // Cleared turns are not sent anymore.
    client.send_message("b").await.unwrap();
    assert_eq!(
        provider.requests()[1].messages,
        [ModelMessage::User("b".to_owned())]
    );
}

#[tokio::test]
async fn test_greeting() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::text("Paris"));
    let client = ConversationClientBuilder::with_model_provider(provider.clone())
        .with_credential("test-key")
        .with_greeting("Hello! Ask me anything.")
        .build();

    client.send_message("capital of France?").await.unwrap();
    assert_eq!(client.history().len(), 3);
    assert_eq!(client.history()[0], Turn::model("Hello! Ask me anything."));
    assert_eq!(
        provider.requests()[0].messages,
        [ModelMessage::User("capital of France?".to_owned())]
    );

    assert_eq!(
        client.clear_history().history(),
        [Turn::model("Hello! Ask me anything.")]
    );
}

#[tokio::test]
async fn test_history_is_a_copy() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::text("one"));
    let client = client_with(&provider);
    client.send_message("a").await.unwrap();

    let mut history = client.history();
    history.clear();
    history.push(Turn::user("forged"));
    assert_eq!(client.history(), [Turn::user("a"), Turn::model("one")]);
}

#[tokio::test]
async fn test_set_credential() {
    let mut provider = TestModelProvider::default();
    provider.add_reply(PresetReply::text("one"));
    let client = ConversationClientBuilder::with_model_provider(provider.clone())
        .build();
    assert!(!client.credential_is_set());

    client.set_credential("fresh-key").send_message("a").await.unwrap();
    assert_eq!(provider.requests()[0].credential, Credential::new("fresh-key"));
}

#[tokio::test]
async fn test_zero_temperature_falls_back() {
    let provider = TestModelProvider::default();
    let options = GenerationOptions::default().with_temperature(0.0);

    let client = ConversationClientBuilder::with_model_provider(provider.clone())
        .with_generation_options(options.clone())
        .build();
    assert_eq!(client.generation_config().temperature, 1.0);

    let client = ConversationClientBuilder::with_model_provider(provider)
        .with_generation_options(options.clone())
        .with_defaulting(Defaulting::Explicit)
        .build();
    assert_eq!(client.generation_config().temperature, 0.0);

    let options = options.with_top_p(0.5);
    assert_eq!(client.set_generation_options(&options).generation_config().top_p, 0.5);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_sends_are_queued() {
    let mut provider = TestModelProvider::default();
    provider.set_delay(Duration::from_millis(100));
    provider.add_reply(PresetReply::text("first"));
    provider.add_reply(PresetReply::text("second"));
    let client = Arc::new(client_with(&provider));

    let first = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.send_message("one").await }
    });
    sleep(Duration::from_millis(10)).await;
    let second = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.send_message("two").await }
    });
    sleep(Duration::from_millis(10)).await;

    // The second call is waiting for the first one to finish.
    assert_eq!(client.history(), [Turn::user("one")]);

    assert_eq!(first.await.unwrap().unwrap(), "first");
    assert_eq!(second.await.unwrap().unwrap(), "second");

    let requests = provider.requests();
    assert_eq!(requests[0].messages, [ModelMessage::User("one".to_owned())]);
    assert_eq!(
        requests[1].messages,
        [
            ModelMessage::User("one".to_owned()),
            ModelMessage::Model("first".to_owned()),
            ModelMessage::User("two".to_owned()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_while_waiting_drops_reply() {
    let mut provider = TestModelProvider::default();
    provider.set_delay(Duration::from_millis(100));
    provider.add_reply(PresetReply::text("late"));
    let client = Arc::new(client_with(&provider));

    let pending = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.send_message("one").await }
    });
    sleep(Duration::from_millis(10)).await;
    client.clear_history();

    // The caller still gets its answer, the transcript stays empty.
    assert_eq!(pending.await.unwrap().unwrap(), "late");
    assert!(client.history().is_empty());
}
