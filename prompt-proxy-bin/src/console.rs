//! Line-oriented front end over `PromptController`.
//!
//! Plain lines replace the prompt text. Commands: `/send`, `/show`,
//! `/clear`, `/quit`. The wallet counts as connected when `WALLET_ADDRESS`
//! is set; the proxy is reached at `PROXY_BASE_URL`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use prompt_runtime::transport::DEFAULT_PROXY_BASE_URL;
use prompt_runtime::{Applied, PromptController, ProxyClient, View, WalletContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_log();

    let proxy_url =
        std::env::var("PROXY_BASE_URL").unwrap_or_else(|_| DEFAULT_PROXY_BASE_URL.to_string());
    let wallet = match std::env::var("WALLET_ADDRESS") {
        Ok(address) if !address.trim().is_empty() => WalletContext::connected(address.trim()),
        _ => WalletContext::disconnected(),
    };

    tracing::info!("Using proxy at {proxy_url}");
    let mut controller = PromptController::new(Arc::new(ProxyClient::new(proxy_url)));
    print!("{}", controller.render(&wallet));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim_end() {
            "/quit" => break,
            "/show" => {}
            "/clear" => controller.set_input(""),
            "/send" => {
                if controller.render(&wallet) == View::Disconnected {
                    println!("Connect a wallet first (set WALLET_ADDRESS).");
                    continue;
                }
                match controller.submit_and_wait().await {
                    None => println!("Nothing to send."),
                    Some(Applied::Failed) => {
                        if let Some(e) = controller.last_error() {
                            println!("Error fetching data: {e}");
                        }
                    }
                    Some(_) => {}
                }
            }
            text => controller.set_input(text),
        }
        print!("{}", controller.render(&wallet));
    }

    Ok(())
}

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    if tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}
