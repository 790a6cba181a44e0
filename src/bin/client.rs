use anyhow::{Context, Result};
use clap::Parser;
use openai_action_gateway::auth::sign_token;
use serde_json::json;

/// Companion client: mints a short-lived token from AUTH_SECRET and posts a
/// chat action to a running gateway.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gateway URL
    url: String,

    /// Message content to send
    #[arg(short, long, default_value = "What is HelloKitty?")]
    content: String,

    /// Model to request
    #[arg(short, long, default_value = "gpt-3.5-turbo")]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let secret =
        std::env::var("AUTH_SECRET").context("AUTH_SECRET environment variable is not set")?;
    let token = sign_token("client", &secret, 300).context("Failed to sign token")?;

    let client = reqwest::Client::new();
    let response = client
        .post(&args.url)
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "action": "chat",
            "params": {
                "model": args.model,
                "messages": [{"role": "user", "content": args.content}],
            }
        }))
        .send()
        .await
        .context("Request failed")?;

    println!("{}", response.status());

    let payload: serde_json::Value = response
        .json()
        .await
        .context("Failed to parse response body")?;
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
