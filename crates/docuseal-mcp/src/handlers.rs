//! MCP Tool Handlers
//!
//! Each handler deserializes the tool's arguments into the typed request
//! shape from `docuseal-api`, makes exactly one API call and returns the
//! remote JSON. [`call_tool`] wraps the dispatch so that every outcome,
//! including unknown tools and API failures, becomes a [`ToolResult`].

use docuseal_api::types::{
    CloneTemplate, CreateSubmission, CreateTemplateFromPdf, ResourceId, SubmissionListQuery,
    SubmitterListQuery, TemplateListQuery, UpdateSubmitter,
};
use docuseal_api::DocusealClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::tools::{self, ToolResult};
use crate::{Error, Result};

/// Run a tool and convert the outcome into a result envelope.
///
/// Never fails: errors are rendered as `Error: <message>` with the error
/// flag set.
pub async fn call_tool(client: &DocusealClient, tool_name: &str, arguments: Value) -> ToolResult {
    match handle_tool_call(client, tool_name, arguments).await {
        Ok(value) => {
            tracing::debug!(tool = tool_name, "Tool call succeeded");
            ToolResult::json(&value)
        }
        Err(e) => {
            tracing::warn!(tool = tool_name, error = %e, "Tool call failed");
            ToolResult::error(format!("Error: {}", e))
        }
    }
}

/// Handle a tool call by dispatching to the appropriate handler
pub async fn handle_tool_call(
    client: &DocusealClient,
    tool_name: &str,
    arguments: Value,
) -> Result<Value> {
    match tool_name {
        // Templates
        tools::LIST_TEMPLATES => handle_list_templates(client, arguments).await,
        tools::GET_TEMPLATE => handle_get_template(client, arguments).await,
        tools::CLONE_TEMPLATE => handle_clone_template(client, arguments).await,
        tools::ARCHIVE_TEMPLATE => handle_archive_template(client, arguments).await,
        tools::CREATE_TEMPLATE_FROM_PDF => handle_create_template_from_pdf(client, arguments).await,

        // Submissions
        tools::LIST_SUBMISSIONS => handle_list_submissions(client, arguments).await,
        tools::GET_SUBMISSION => handle_get_submission(client, arguments).await,
        tools::CREATE_SUBMISSION => handle_create_submission(client, arguments).await,
        tools::ARCHIVE_SUBMISSION => handle_archive_submission(client, arguments).await,

        // Submitters
        tools::LIST_SUBMITTERS => handle_list_submitters(client, arguments).await,
        tools::GET_SUBMITTER => handle_get_submitter(client, arguments).await,
        tools::UPDATE_SUBMITTER => handle_update_submitter(client, arguments).await,

        _ => Err(Error::UnknownTool(tool_name.to_string())),
    }
}

/// Deserialize tool arguments, treating a missing argument object as `{}`
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

// ============================================================================
// Template Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct TemplateIdArgs {
    template_id: ResourceId,
}

/// Handle docuseal_list_templates - GET /templates
async fn handle_list_templates(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let query: TemplateListQuery = parse_args(tools::LIST_TEMPLATES, arguments)?;
    Ok(client.list_templates(&query).await?)
}

/// Handle docuseal_get_template - GET /templates/{id}
async fn handle_get_template(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: TemplateIdArgs = parse_args(tools::GET_TEMPLATE, arguments)?;
    Ok(client.get_template(args.template_id).await?)
}

#[derive(Debug, Deserialize)]
struct CloneTemplateArgs {
    template_id: ResourceId,
    #[serde(flatten)]
    body: CloneTemplate,
}

/// Handle docuseal_clone_template - POST /templates/{id}/clone
async fn handle_clone_template(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: CloneTemplateArgs = parse_args(tools::CLONE_TEMPLATE, arguments)?;
    Ok(client.clone_template(args.template_id, &args.body).await?)
}

/// Handle docuseal_archive_template - DELETE /templates/{id}
async fn handle_archive_template(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: TemplateIdArgs = parse_args(tools::ARCHIVE_TEMPLATE, arguments)?;
    Ok(client.archive_template(args.template_id).await?)
}

/// Handle docuseal_create_template_from_pdf - POST /templates/pdf
async fn handle_create_template_from_pdf(
    client: &DocusealClient,
    arguments: Value,
) -> Result<Value> {
    let body: CreateTemplateFromPdf = parse_args(tools::CREATE_TEMPLATE_FROM_PDF, arguments)?;
    Ok(client.create_template_from_pdf(&body).await?)
}

// ============================================================================
// Submission Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct SubmissionIdArgs {
    submission_id: ResourceId,
}

/// Handle docuseal_list_submissions - GET /submissions
async fn handle_list_submissions(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let query: SubmissionListQuery = parse_args(tools::LIST_SUBMISSIONS, arguments)?;
    Ok(client.list_submissions(&query).await?)
}

/// Handle docuseal_get_submission - GET /submissions/{id}
async fn handle_get_submission(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: SubmissionIdArgs = parse_args(tools::GET_SUBMISSION, arguments)?;
    Ok(client.get_submission(args.submission_id).await?)
}

/// Handle docuseal_create_submission - POST /submissions
async fn handle_create_submission(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: CreateSubmission = parse_args(tools::CREATE_SUBMISSION, arguments)?;
    Ok(client.create_submission(args).await?)
}

/// Handle docuseal_archive_submission - DELETE /submissions/{id}
async fn handle_archive_submission(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: SubmissionIdArgs = parse_args(tools::ARCHIVE_SUBMISSION, arguments)?;
    Ok(client.archive_submission(args.submission_id).await?)
}

// ============================================================================
// Submitter Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct SubmitterIdArgs {
    submitter_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct UpdateSubmitterArgs {
    submitter_id: ResourceId,
    #[serde(flatten)]
    body: UpdateSubmitter,
}

/// Handle docuseal_list_submitters - GET /submitters
async fn handle_list_submitters(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let query: SubmitterListQuery = parse_args(tools::LIST_SUBMITTERS, arguments)?;
    Ok(client.list_submitters(&query).await?)
}

/// Handle docuseal_get_submitter - GET /submitters/{id}
async fn handle_get_submitter(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: SubmitterIdArgs = parse_args(tools::GET_SUBMITTER, arguments)?;
    Ok(client.get_submitter(args.submitter_id).await?)
}

/// Handle docuseal_update_submitter - PUT /submitters/{id}
async fn handle_update_submitter(client: &DocusealClient, arguments: Value) -> Result<Value> {
    let args: UpdateSubmitterArgs = parse_args(tools::UPDATE_SUBMITTER, arguments)?;
    Ok(client.update_submitter(args.submitter_id, &args.body).await?)
}
