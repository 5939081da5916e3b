//! Command-line arguments.

use clap::{Parser, Subcommand};
use meridian_models::types::{ChatMessage, Role};
use meridian_telemetry::TracingFormat;

/// Meridian playground - route prompts to model providers
#[derive(Debug, Parser)]
#[command(name = "meridian-playground")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter directives (e.g. "meridian_dispatch=debug")
    #[arg(long, global = true, env = "MERIDIAN_LOG", default_value = "warn")]
    pub log: String,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, env = "MERIDIAN_LOG_FORMAT", default_value = "compact")]
    pub log_format: TracingFormat,

    /// Send requests to the real provider APIs instead of the simulated transport
    #[cfg(feature = "http")]
    #[arg(long, global = true)]
    pub live: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a single prompt
    Execute {
        /// Prompt text
        prompt: String,

        /// Model identifier
        #[arg(short, long, default_value = "gpt-4")]
        model: String,

        /// Sampling temperature in [0, 2]
        #[arg(short, long, default_value_t = 0.7)]
        temperature: f32,

        /// Upper bound on generated tokens
        #[arg(long, default_value_t = 1000)]
        max_tokens: u32,
    },

    /// Send a conversation; only the last message is answered
    Chat {
        /// Messages, oldest first. Prefix with "system:", "user:" or "assistant:" (default user)
        #[arg(required = true)]
        messages: Vec<String>,

        /// Model identifier
        #[arg(short, long, default_value = "gpt-4")]
        model: String,
    },

    /// Answer a query from retrieved documents
    Rag {
        /// The question
        query: String,

        /// Model identifier
        #[arg(short, long, default_value = "gpt-4")]
        model: String,

        /// Number of sources to keep
        #[arg(short = 'k', long, default_value_t = 5)]
        top_k: usize,

        /// Generate the answer with the model instead of the fixed template
        #[arg(long)]
        generate: bool,
    },

    /// Run one prompt across several models
    Compare {
        /// Prompt text
        prompt: String,

        /// Comma-separated model identifiers
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_value = "gpt-4,claude-3-opus,mistral-7b"
        )]
        models: Vec<String>,

        /// Sampling temperature in [0, 2]
        #[arg(short, long, default_value_t = 0.7)]
        temperature: f32,

        /// Upper bound on generated tokens
        #[arg(long, default_value_t = 1000)]
        max_tokens: u32,
    },

    /// List the model catalog
    Models,

    /// Report service health
    Health,
}

/// Parses `role: content`, defaulting to a user message.
pub fn parse_message(raw: &str) -> ChatMessage {
    let roles = [
        ("system:", Role::System),
        ("user:", Role::User),
        ("assistant:", Role::Assistant),
    ];
    for (prefix, role) in roles {
        if let Some(content) = raw.strip_prefix(prefix) {
            return ChatMessage::new(role, content.trim());
        }
    }
    ChatMessage::user(raw)
}
