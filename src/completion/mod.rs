//! Outbound chat completion API.

mod client;
mod openai;

pub use client::{CompletionClient, CompletionError};
pub use openai::{ChatCompletionsClient, DEFAULT_ENDPOINT, DEFAULT_MODEL};
