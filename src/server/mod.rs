//! MCP server implementation for the contact audit engine.
//!
//! This module provides the MCP protocol server that exposes contact
//! browsing, validation and correction to AI assistants.

pub mod handlers;

pub use handlers::ContactAuditServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the contact audit server with stdio transport.
///
/// Communicates via stdin/stdout using the MCP protocol and returns once
/// the client disconnects.
pub async fn run_server(server: ContactAuditServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
