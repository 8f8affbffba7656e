//! A chat front-end over a Gemini conversation.
//!
//! The crate includes a CLI tool for chatting in the terminal. And you can
//! also use it as a library to drive a conversation from your own host
//! app, with the API key kept in a small on-disk store.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod session;
pub mod store;

pub use session::{
    FAILURE_NOTICE, GREETING, Session, SessionBuilder, Submission,
};

/// Re-exports of [`askbar_core`] crate.
pub mod core {
    pub use askbar_core::*;
}
