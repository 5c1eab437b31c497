mod client;
mod config;
mod error;
mod handlers;
mod interpret;
mod labels;
mod models;
mod preprocess;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::client::InferenceClient;
use crate::config::Config;
use crate::handlers::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may come from the real environment.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let client = InferenceClient::new(&config).context("failed to build inference client")?;
    info!(
        bind = %config.bind,
        endpoint = %client.endpoint_url(),
        timeout_secs = ?config.timeout_secs,
        classes = labels::len(),
        "starting ripple-server"
    );

    let state = web::Data::new(AppState {
        client,
        max_upload_bytes: config.max_upload_bytes,
    });

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind)
    .with_context(|| format!("failed to bind {}", config.bind))?
    .run()
    .await?;

    Ok(())
}
