//! MCP tool handlers for the contact audit server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Every view tool answers with the resulting view snapshot as pretty JSON.

use crate::config::Config;
use crate::domain::{ContactId, Field};
use crate::error::ViewError;
use crate::models::Contact;
use crate::repositories::ContactStore;
use crate::services::{TransferService, TransferServiceImpl};
use crate::view::{
    EditForm, EditReconciler, StatusFilter, Transition, ViewController, ViewEvent, ViewMode,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

/// The MCP server exposing contact review tools.
#[derive(Clone)]
pub struct ContactAuditServer {
    contacts: Arc<ViewController>,
    validation: Arc<ViewController>,
    reconciler: Arc<EditReconciler>,
    transfer: Arc<dyn TransferService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ContactAuditServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contact-audit".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Contact audit server - browse, search and validate imported client contacts, correct invalid records, and move spreadsheets in and out of the contacts store.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ViewParams {
    /// "contacts" (default) or "validation"
    #[serde(default)]
    view: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListContactsParams {
    #[serde(default)]
    view: Option<String>,
    #[serde(default)]
    page: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchContactsParams {
    #[serde(default)]
    view: Option<String>,
    /// client_key, name, email or phone
    field: String,
    value: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NavigateParams {
    #[serde(default)]
    view: Option<String>,
    /// next, prev or jump
    direction: String,
    #[serde(default)]
    page: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ValidateContactsParams {
    #[serde(default)]
    page: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SetFilterParams {
    #[serde(default)]
    view: Option<String>,
    /// all, valid or invalid
    filter: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateContactParams {
    contact_id: String,
    #[serde(default)]
    client_key: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UploadParams {
    path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DownloadParams {
    /// Directory to save into (default: current directory)
    #[serde(default)]
    directory: Option<String>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn view_error(e: ViewError) -> McpError {
    match e {
        ViewError::Input { .. } => invalid_params(e),
        other => to_mcp_error(other),
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

// Tool router implementation
#[tool_router]
impl ContactAuditServer {
    /// Create a new contact audit server over `store`.
    pub fn new(store: Arc<dyn ContactStore>, config: &Config) -> Self {
        let contacts = Arc::new(ViewController::new(
            store.clone(),
            ViewMode::Contacts,
            config.page_size,
        ));
        let validation = Arc::new(ViewController::new(
            store.clone(),
            ViewMode::Validation,
            config.page_size,
        ));

        let reconciler = Arc::new(
            EditReconciler::new(store.clone(), contacts.clone(), config.reconcile)
                .with_view(validation.clone()),
        );

        let transfer = Arc::new(TransferServiceImpl::new(
            store,
            config.export_file_name.clone(),
        )) as Arc<dyn TransferService>;

        Self {
            contacts,
            validation,
            reconciler,
            transfer,
            tool_router: Self::tool_router(),
        }
    }

    /// The view a tool call addresses.
    fn view(&self, name: Option<&str>) -> Result<&Arc<ViewController>, McpError> {
        match name.map(|n| n.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("contacts") => Ok(&self.contacts),
            Some("validation") => Ok(&self.validation),
            Some(other) => Err(invalid_params(format!(
                "unknown view: {} (expected contacts or validation)",
                other
            ))),
        }
    }

    fn find_contact(&self, id: &ContactId) -> Option<Contact> {
        [&self.contacts, &self.validation]
            .into_iter()
            .find_map(|view| view.snapshot().items.contact(id).cloned())
    }

    async fn dispatch(
        &self,
        view: &ViewController,
        event: ViewEvent,
    ) -> Result<CallToolResult, McpError> {
        let transition = view.dispatch(event).await.map_err(view_error)?;
        json_result(&render(view, transition))
    }

    /// List one page of contacts.
    #[tool(
        description = "Load a page of contacts (default page 1). With an active search, re-runs the search instead. Returns the rows that pass the current filter together with their validation errors."
    )]
    async fn list_contacts(
        &self,
        params: Parameters<ListContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let view = self.view(params.view.as_deref())?;
        self.dispatch(view, ViewEvent::Load(params.page.unwrap_or(1)))
            .await
    }

    /// Search contacts by one field.
    #[tool(
        description = "Search contacts by field (client_key, name, email or phone). Shows the full match set as one page; a blank value clears the search."
    )]
    async fn search_contacts(
        &self,
        params: Parameters<SearchContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let view = self.view(params.view.as_deref())?;
        let field = params.field.parse::<Field>().map_err(invalid_params)?;

        self.dispatch(
            view,
            ViewEvent::SetQuery {
                field,
                value: params.value,
            },
        )
        .await
    }

    /// Leave search mode.
    #[tool(description = "Clear the active search and return to page 1 of the listing")]
    async fn clear_search(
        &self,
        params: Parameters<ViewParams>,
    ) -> Result<CallToolResult, McpError> {
        let view = self.view(params.0.view.as_deref())?;
        self.dispatch(view, ViewEvent::ClearQuery).await
    }

    /// Move between pages.
    #[tool(
        description = "Move to the next or previous page, or jump to a page number. Moves outside the available pages are ignored."
    )]
    async fn navigate(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let view = self.view(params.view.as_deref())?;

        let event = match params.direction.trim().to_lowercase().as_str() {
            "next" => ViewEvent::NextPage,
            "prev" | "previous" => ViewEvent::PrevPage,
            "jump" => match params.page {
                Some(page) => ViewEvent::Jump(page),
                None => return Err(invalid_params("jump needs a page number")),
            },
            other => {
                return Err(invalid_params(format!(
                    "unknown direction: {} (expected next, prev or jump)",
                    other
                )))
            }
        };

        self.dispatch(view, event).await
    }

    /// Run server-side validation.
    #[tool(
        description = "Validate the contact collection and show one page of results with collection-wide valid/invalid counts"
    )]
    async fn validate_contacts(
        &self,
        params: Parameters<ValidateContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let page = params.0.page.unwrap_or(1);
        self.dispatch(&self.validation, ViewEvent::Load(page)).await
    }

    /// Filter rows by validity.
    #[tool(
        description = "Show all, only valid or only invalid rows. On the validation view this reloads from page 1."
    )]
    async fn set_filter(
        &self,
        params: Parameters<SetFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let view = self.view(params.view.as_deref())?;
        let filter = params.filter.parse::<StatusFilter>().map_err(invalid_params)?;

        self.dispatch(view, ViewEvent::SetFilter(filter)).await
    }

    /// Correct a contact.
    #[tool(
        description = "Update a contact's fields. Omitted fields keep their current values when the contact is on a loaded page. Returns the stored contact and its fresh validation."
    )]
    async fn update_contact(
        &self,
        params: Parameters<UpdateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let id = ContactId::new(params.contact_id).map_err(invalid_params)?;

        tracing::info!("MCP Handler: update_contact called for {}", id);

        let base = match self.find_contact(&id) {
            Some(contact) => contact,
            None => Contact::new(id.clone(), "", "", "", ""),
        };

        let mut form = EditForm::open(&base);
        if let Some(client_key) = params.client_key {
            form.draft.client_key = client_key;
        }
        if let Some(name) = params.name {
            form.draft.name = name;
        }
        if let Some(email) = params.email {
            form.draft.email = email;
        }
        if let Some(phone) = params.phone {
            form.draft.phone = phone;
        }

        let outcome = form.submit(&self.reconciler).await.map_err(|e| {
            tracing::error!("Failed to update contact {}: {}", id, e);
            view_error(e)
        })?;

        json_result(&serde_json::json!({
            "contact": outcome.contact,
            "is_valid": outcome.result.is_valid,
            "errors": outcome.result.errors,
            "on_page": outcome.on_page,
        }))
    }

    /// Counts for one view.
    #[tool(
        description = "Valid/invalid counts for a view: the current page, the active search and the whole collection, plus which of them should be shown"
    )]
    async fn view_summary(&self, params: Parameters<ViewParams>) -> Result<CallToolResult, McpError> {
        let view = self.view(params.0.view.as_deref())?;
        let state = view.snapshot();
        let summary = state.summary();

        json_result(&serde_json::json!({
            "view": state.mode,
            "status": state.status,
            "summary": summary,
            "preferred": summary.preferred(),
        }))
    }

    /// Import a spreadsheet.
    #[tool(
        description = "Upload a local .xlsx or .xls spreadsheet into the contacts store, then reload both views"
    )]
    async fn upload_spreadsheet(
        &self,
        params: Parameters<UploadParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = PathBuf::from(params.0.path);

        let summary = self.transfer.upload(&path).await.map_err(|e| {
            tracing::error!("Upload of {} failed: {}", path.display(), e);
            to_mcp_error(e)
        })?;

        let mut reloads = Vec::new();
        for view in [&self.contacts, &self.validation] {
            let reloaded = match view.dispatch(ViewEvent::ClearQuery).await {
                Ok(transition) => serde_json::json!(transition),
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            };
            reloads.push(serde_json::json!({ "view": view.mode(), "reload": reloaded }));
        }

        json_result(&serde_json::json!({
            "upload": summary,
            "views": reloads,
        }))
    }

    /// Export the corrected spreadsheet.
    #[tool(description = "Download the corrected contacts spreadsheet and save it to a directory")]
    async fn download_spreadsheet(
        &self,
        params: Parameters<DownloadParams>,
    ) -> Result<CallToolResult, McpError> {
        let dir = PathBuf::from(params.0.directory.unwrap_or_else(|| ".".to_string()));

        let receipt = self.transfer.export_to(&dir).await.map_err(|e| {
            tracing::error!("Download failed: {}", e);
            to_mcp_error(e)
        })?;

        json_result(&serde_json::json!(receipt))
    }
}

/// Snapshot of a view as returned by every view tool.
fn render(view: &ViewController, transition: Transition) -> serde_json::Value {
    let state = view.snapshot();
    let summary = state.summary();

    serde_json::json!({
        "view": state.mode,
        "transition": transition,
        "status": state.status,
        "page": state.current_page,
        "total_pages": state.total_pages,
        "total_count": state.total_count,
        "page_size": state.page_size,
        "filter": state.filter,
        "query": state.query,
        "summary": summary.preferred(),
        "rows": state.visible(),
    })
}
