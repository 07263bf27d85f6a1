//! # lingo - Translation and Chat CLI
//!
//! `lingo` translates text and answers questions through interchangeable
//! backends: Google's free translation endpoint and OpenAI-compatible chat
//! completion APIs (DeepSeek, Qwen, OpenAI). Chat answers are streamed as
//! they are generated.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate with the free provider (English -> Chinese by default)
//! lingo good morning
//!
//! # Translate from stdin with a chat provider
//! cat notes.md | lingo -p deepseek -t ja
//!
//! # Ask a question, streaming the answer
//! lingo ask -p qwen "What is a monad?"
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use lingo::client::{AskOptions, ChatClient};
//! use lingo::provider::{CredentialConfig, ProviderRegistry};
//!
//! # async fn demo() -> Result<(), lingo::error::ProviderError> {
//! let client = ChatClient::new(ProviderRegistry::builtin());
//! let options = AskOptions {
//!     provider: "deepseek".to_string(),
//!     model: None,
//!     credentials: CredentialConfig::default(),
//! };
//! let answer = client
//!     .ask_stream("Why is the sky blue?", &options, |chunk| print!("{chunk}"))
//!     .await?;
//! # let _ = answer;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/lingo/config.toml`:
//!
//! ```toml
//! [lingo]
//! provider = "deepseek"
//! to = "zh"
//!
//! [api_keys]
//! deepseek = "sk-..."
//! ```

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Translation and chat clients.
pub mod client;

/// Configuration file management.
pub mod config;

/// Provider errors with user-facing hints.
pub mod error;

/// File system utilities.
pub mod fs;

/// Best-effort history of translations and answers.
pub mod history;

/// Input reading from arguments and stdin.
pub mod input;

/// Diagnostic logging setup.
pub mod logging;

/// XDG-style path utilities for configuration and data.
pub mod paths;

/// Provider registry and credential resolution.
pub mod provider;

/// Languages, prompts, request shaping, and stream decoding.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
