//! Core logic of a conversation: the transcript, generation settings, and
//! the request/reply cycle against a model provider.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod client;
pub mod config;
pub mod conversation;
mod error;
mod model_client;

pub use client::{
    ConversationClient, ConversationClientBuilder, DEFAULT_MODEL,
    NO_RESPONSE_FALLBACK,
};
pub use error::Error;

/// Re-exports of [`askbar_model`] crate.
pub mod model {
    pub use askbar_model::*;
}
