//! The protocol between a conversation and a generative-language model.
//!
//! This crate establishes the request and reply types that the
//! conversation client sends to, and receives from, a model provider,
//! so that the client never depends on a concrete HTTP endpoint.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod credential;
mod error;
mod provider;
mod request;
mod response;

pub use credential::*;
pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
