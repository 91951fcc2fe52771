mod completion;
mod config;
mod csp;
mod csrf;
mod error;
mod handlers;
mod metrics;
mod models;
mod profile;
mod prompts;
mod rate_limit;
mod sanitize;
mod session;
mod sitemap;
mod state;
mod validation;
mod worker;

use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::completion::CompletionClient;
use crate::config::Args;
use crate::models::CompletionJob;
use crate::profile::Profile;
use crate::state::AppState;
use crate::worker::{completion_worker, limiter_sweeper};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("portfolio_gateway=info")),
        )
        .init();

    let args = Args::parse();

    let profile = match &args.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.request_timeout))
        .build()?;
    let client = CompletionClient::new(http, args.completion_url.clone(), args.model.clone());

    let (completion_tx, completion_rx) = mpsc::channel::<CompletionJob>(args.queue_size as usize);
    tokio::spawn(completion_worker(completion_rx, client));

    let state = Arc::new(AppState::from_args(&args, profile, completion_tx));
    info!(
        "Rate limits: {} chat messages / {} completions per {:?}",
        state.chat_limiter.max_attempts(),
        state.completion_limiter.max_attempts(),
        state.chat_limiter.window()
    );
    tokio::spawn(limiter_sweeper(state.clone(), state.chat_limiter.window()));
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gateway running on http://localhost:{}", args.port);
    info!("Forwarding completions to {}", args.completion_url);

    // peer addresses key the rate limits of visitors without a session id
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
