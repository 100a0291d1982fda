//! Contact Audit Server - Main entry point
//!
//! Serves the contact audit tools over the Model Context Protocol on stdio.

use anyhow::Result;
use contact_audit::client::{AsyncContactsClient, AsyncContactsClientImpl};
use contact_audit::repositories::{ContactStore, HttpContactStore};
use contact_audit::{Config, ContactAuditServer, ContactsClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(std::env::var("LOG_LEVEL").unwrap_or_default()))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting contact audit server with API URL: {}", config.api_url);
    info!(
        "Page size: {}, edit reconciliation: {:?}",
        config.page_size, config.reconcile
    );

    let sync_client = ContactsClient::new(&config);
    let metrics = sync_client.metrics().clone();
    let client =
        Arc::new(AsyncContactsClientImpl::new(sync_client)) as Arc<dyn AsyncContactsClient>;
    let store = Arc::new(HttpContactStore::new(client)) as Arc<dyn ContactStore>;

    let server = ContactAuditServer::new(store, &config);

    info!("Starting MCP server with stdio transport");
    contact_audit::server::run_server(server).await?;

    info!("Store traffic: {}", metrics);
    info!("Contact audit server shutdown complete");
    Ok(())
}
