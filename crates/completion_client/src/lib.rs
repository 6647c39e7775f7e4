//! completion_client - Chat-completion provider boundary.
//!
//! Exposes the [`CompletionProvider`] capability trait the pipeline is
//! handed, plus an HTTP client for OpenAI-compatible endpoints. The
//! pipeline only ever sees a tagged result: completion text or a typed
//! [`ProviderError`].

pub mod client;
pub mod error;
pub mod models;
pub mod provider;

pub use client::{ConnectionConfig, HttpCompletionClient};
pub use error::{ProviderError, Result};
pub use provider::{CompletionOptions, CompletionProvider};
