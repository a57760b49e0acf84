//! Fetch explorer documents from a running server.

use crate::CliResult;
use clap::Args;
use explorer_core::render_json;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_EXPLORER_URL: &str = "http://127.0.0.1:3000/explorer";

/// CLI arguments for the fetch command.
#[derive(Args, Clone, Debug)]
pub struct FetchArgs {
    /// Base URL of the explorer mount.
    #[arg(long, env = "EXPLORER_URL", default_value = DEFAULT_EXPLORER_URL)]
    pub url: String,
    /// Resource path of a model; omit to fetch the resource listing.
    #[arg(long)]
    pub model: Option<String>,
}

/// Error payload returned by the explorer server.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Fetch the requested document and return it pretty-printed.
#[cfg(not(test))]
pub async fn run_fetch(args: &FetchArgs) -> CliResult<String> {
    let client = Client::builder().user_agent("explorer-cli").build()?;
    run_fetch_with(&client, args).await
}

/// Fetch with an injected client.
async fn run_fetch_with(client: &Client, args: &FetchArgs) -> CliResult<String> {
    let base = normalize_explorer_url(&args.url)?;
    let url = document_url(&base, args.model.as_deref());
    let document = fetch_document(client, &url).await?;
    Ok(render_json(&document)?)
}

/// Trim whitespace and trailing slashes from the explorer URL.
fn normalize_explorer_url(url: &str) -> CliResult<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("explorer url is required".into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn document_url(base: &str, model: Option<&str>) -> String {
    match model.map(|model| model.trim_matches('/')) {
        Some(model) if !model.is_empty() => format!("{base}/resources/{model}"),
        _ => format!("{base}/resources"),
    }
}

async fn fetch_document(client: &Client, url: &str) -> CliResult<Value> {
    let response = client.get(url).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|error| error.message)
            .unwrap_or_else(|_| format!("not found: {url}"));
        return Err(message.into());
    }
    let document = response.error_for_status()?.json::<Value>().await?;
    Ok(document)
}
