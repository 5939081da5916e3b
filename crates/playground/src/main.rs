//! Meridian playground CLI.
//!
//! Sends prompts through the dispatcher and prints the JSON results. Uses the
//! simulated transport unless built with the `http` feature and run with
//! `--live`.
//!
//! # Usage
//!
//! ```bash
//! meridian-playground execute "Hello" --model gpt-4
//! meridian-playground chat "system: Be brief." "What is Rust?" --model claude-3-opus
//! meridian-playground rag "What is RAG?" -k 3
//! meridian-playground compare "Hello" --models gpt-4,claude-3-opus,mistral-7b
//! meridian-playground models
//! ```
//!
//! Press Ctrl-C to cancel a request in flight.

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the playground reports to the terminal"
)]

mod cli;

use clap::Parser;
use cli::{Cli, Command, parse_message};
use meridian_dispatch::{
    CancellationToken, ComparisonRequest, DispatchConfig, DispatchError, Dispatcher,
    GenerativeComposer, StaticRetriever,
};
use meridian_model_providers::{ProvidersConfig, SimulatedTransport, Transport};
use meridian_models::types::{ChatRequest, GenerationRequest, RetrievalRequest};
use meridian_telemetry::TracingSetup;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    TracingSetup::new()
        .with_format(cli.log_format)
        .with_env_filter(cli.log.clone())
        .init();

    let dispatcher = match dispatcher(&cli) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, canceling request");
            trigger.cancel();
        }
    });

    match run(&dispatcher, cli.command, &cancel).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error ({}): {err}", err.status_code());
            ExitCode::FAILURE
        }
    }
}

fn transport(cli: &Cli) -> Arc<dyn Transport> {
    #[cfg(feature = "http")]
    if cli.live {
        return Arc::new(meridian_model_providers::HttpTransport::new());
    }

    let _ = cli;
    Arc::new(SimulatedTransport::new())
}

fn dispatcher(cli: &Cli) -> Result<Dispatcher, DispatchError> {
    let providers = ProvidersConfig::from_env()?;
    let config = DispatchConfig::from_env()?;

    let mut builder = Dispatcher::standard(transport(cli), &providers)?
        .with_config(config)
        .with_retriever(Arc::new(StaticRetriever::sample()));

    if matches!(cli.command, Command::Rag { generate: true, .. }) {
        builder = builder.with_composer(Arc::new(GenerativeComposer::new()));
    }

    Ok(builder.build()?)
}

async fn run(
    dispatcher: &Dispatcher,
    command: Command,
    cancel: &CancellationToken,
) -> Result<String, DispatchError> {
    let value = match command {
        Command::Execute {
            prompt,
            model,
            temperature,
            max_tokens,
        } => {
            let request = GenerationRequest::new(prompt, model)
                .with_temperature(temperature)
                .with_max_tokens(max_tokens);
            to_json(&dispatcher.execute_with_cancel(&request, cancel).await?)
        }
        Command::Chat { messages, model } => {
            let messages = messages.iter().map(|raw| parse_message(raw)).collect();
            let request = ChatRequest::new(messages, model);
            to_json(&dispatcher.chat_with_cancel(&request, cancel).await?)
        }
        Command::Rag {
            query,
            model,
            top_k,
            ..
        } => {
            let request = RetrievalRequest::new(query, model).with_top_k(top_k);
            to_json(&dispatcher.retrieval_query_with_cancel(&request, cancel).await?)
        }
        Command::Compare {
            prompt,
            models,
            temperature,
            max_tokens,
        } => {
            let request = ComparisonRequest::new(prompt, models)
                .with_temperature(temperature)
                .with_max_tokens(max_tokens);
            to_json(&dispatcher.compare_with_cancel(&request, cancel).await?)
        }
        Command::Models => to_json(&dispatcher.list_models()),
        Command::Health => to_json(&dispatcher.health_check()),
    };
    Ok(value)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}
