//! MCP Tool definitions
//!
//! The static catalog advertised through `tools/list`. Tools are the only
//! way agents interact with DocuSeal through this server.
//!
//! # Tool Categories
//!
//! ## Templates
//! - `docuseal_list_templates` - List templates with optional filters
//! - `docuseal_get_template` - Fetch one template
//! - `docuseal_clone_template` - Clone a template
//! - `docuseal_archive_template` - Archive (soft delete) a template
//! - `docuseal_create_template_from_pdf` - Create a template from PDF documents
//!
//! ## Submissions
//! - `docuseal_list_submissions` - List submissions with optional filters
//! - `docuseal_get_submission` - Fetch one submission
//! - `docuseal_create_submission` - Send a template out for signing
//! - `docuseal_archive_submission` - Archive (soft delete) a submission
//!
//! ## Submitters
//! - `docuseal_list_submitters` - List submitters with optional filters
//! - `docuseal_get_submitter` - Fetch one submitter
//! - `docuseal_update_submitter` - Update a submitter and optionally re-send emails

use docuseal_api::types::FieldType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const LIST_TEMPLATES: &str = "docuseal_list_templates";
pub const GET_TEMPLATE: &str = "docuseal_get_template";
pub const CLONE_TEMPLATE: &str = "docuseal_clone_template";
pub const ARCHIVE_TEMPLATE: &str = "docuseal_archive_template";
pub const CREATE_TEMPLATE_FROM_PDF: &str = "docuseal_create_template_from_pdf";
pub const LIST_SUBMISSIONS: &str = "docuseal_list_submissions";
pub const GET_SUBMISSION: &str = "docuseal_get_submission";
pub const CREATE_SUBMISSION: &str = "docuseal_create_submission";
pub const ARCHIVE_SUBMISSION: &str = "docuseal_archive_submission";
pub const LIST_SUBMITTERS: &str = "docuseal_list_submitters";
pub const GET_SUBMITTER: &str = "docuseal_get_submitter";
pub const UPDATE_SUBMITTER: &str = "docuseal_update_submitter";

/// Every tool name, in the order they are advertised
pub const TOOL_NAMES: [&str; 12] = [
    LIST_TEMPLATES,
    GET_TEMPLATE,
    CLONE_TEMPLATE,
    ARCHIVE_TEMPLATE,
    CREATE_TEMPLATE_FROM_PDF,
    LIST_SUBMISSIONS,
    GET_SUBMISSION,
    CREATE_SUBMISSION,
    ARCHIVE_SUBMISSION,
    LIST_SUBMITTERS,
    GET_SUBMITTER,
    UPDATE_SUBMITTER,
];

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }

    /// Names listed in the schema's `required` array
    #[cfg(test)]
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema["required"]
            .as_array()
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Result from a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create a successful result rendering `value` as indented JSON
    pub fn json(value: &Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self::text(text)
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Concatenated text of all content items
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Whether `name` is one of the advertised tools
pub fn is_known_tool(name: &str) -> bool {
    TOOL_NAMES.contains(&name)
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        // Templates
        ToolDefinition::new(
            LIST_TEMPLATES,
            "List all document templates from DocuSeal",
            json!({
                "type": "object",
                "properties": {
                    "application_key": {
                        "type": "string",
                        "description": "Filter templates by application key"
                    },
                    "folder": {
                        "type": "string",
                        "description": "Filter templates by folder name"
                    },
                    "archived": {
                        "type": "boolean",
                        "description": "Get archived templates instead of active ones"
                    },
                    "limit": limit_property("templates")
                },
                "required": []
            }),
        ),
        ToolDefinition::new(
            GET_TEMPLATE,
            "Get detailed information about a specific template",
            id_schema("template_id", "The unique identifier of the template"),
        ),
        ToolDefinition::new(
            CLONE_TEMPLATE,
            "Clone an existing template into a new template",
            json!({
                "type": "object",
                "properties": {
                    "template_id": id_property("The unique identifier of the template to clone"),
                    "name": {
                        "type": "string",
                        "description": "Name for the new cloned template"
                    },
                    "folder_name": {
                        "type": "string",
                        "description": "Folder name for the cloned template"
                    },
                    "application_key": {
                        "type": "string",
                        "description": "Application key for the cloned template"
                    }
                },
                "required": ["template_id"]
            }),
        ),
        ToolDefinition::new(
            ARCHIVE_TEMPLATE,
            "Archive (soft delete) a template",
            id_schema(
                "template_id",
                "The unique identifier of the template to archive",
            ),
        ),
        ToolDefinition::new(
            CREATE_TEMPLATE_FROM_PDF,
            "Create a template from an existing PDF with form fields",
            json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name for the template"
                    },
                    "documents": {
                        "type": "array",
                        "description": "Array of documents with fields",
                        "items": document_schema()
                    },
                    "folder_name": {
                        "type": "string",
                        "description": "Folder name for the template"
                    },
                    "application_key": {
                        "type": "string",
                        "description": "Application key for the template"
                    }
                },
                "required": ["name", "documents"]
            }),
        ),
        // Submissions
        ToolDefinition::new(
            LIST_SUBMISSIONS,
            "List all submissions with optional filtering",
            json!({
                "type": "object",
                "properties": {
                    "template_id": id_property("Filter by template ID"),
                    "application_key": {
                        "type": "string",
                        "description": "Filter by application key"
                    },
                    "template_folder": {
                        "type": "string",
                        "description": "Filter by template folder name"
                    },
                    "limit": limit_property("submissions")
                },
                "required": []
            }),
        ),
        ToolDefinition::new(
            GET_SUBMISSION,
            "Get detailed information about a specific submission",
            id_schema("submission_id", "The unique identifier of the submission"),
        ),
        ToolDefinition::new(
            CREATE_SUBMISSION,
            "Create a new submission for document signing",
            json!({
                "type": "object",
                "properties": {
                    "template_id": id_property("Template ID to create submission from"),
                    "submitters": {
                        "type": "array",
                        "description": "Array of submitters for the document",
                        "items": submitter_schema()
                    },
                    "send_email": {
                        "type": "boolean",
                        "description": "Whether to send email notifications",
                        "default": true
                    },
                    "order": {
                        "type": "string",
                        "enum": ["preserved", "random"],
                        "description": "Order of submitters signing",
                        "default": "preserved"
                    },
                    "message": message_schema()
                },
                "required": ["template_id", "submitters"]
            }),
        ),
        ToolDefinition::new(
            ARCHIVE_SUBMISSION,
            "Archive (soft delete) a submission",
            id_schema(
                "submission_id",
                "The unique identifier of the submission to archive",
            ),
        ),
        // Submitters
        ToolDefinition::new(
            LIST_SUBMITTERS,
            "List all submitters with optional filtering",
            json!({
                "type": "object",
                "properties": {
                    "submission_id": id_property("Filter by submission ID"),
                    "application_key": {
                        "type": "string",
                        "description": "Filter by application key"
                    },
                    "limit": limit_property("submitters")
                },
                "required": []
            }),
        ),
        ToolDefinition::new(
            GET_SUBMITTER,
            "Get detailed information about a specific submitter",
            id_schema("submitter_id", "The unique identifier of the submitter"),
        ),
        ToolDefinition::new(
            UPDATE_SUBMITTER,
            "Update submitter details, field values, and re-send emails",
            json!({
                "type": "object",
                "properties": {
                    "submitter_id": id_property("The unique identifier of the submitter"),
                    "name": {
                        "type": "string",
                        "description": "Submitter name"
                    },
                    "email": {
                        "type": "string",
                        "format": "email",
                        "description": "Submitter email"
                    },
                    "phone": {
                        "type": "string",
                        "description": "Submitter phone"
                    },
                    "values": {
                        "type": "object",
                        "description": "Field values to update"
                    },
                    "send_email": {
                        "type": "boolean",
                        "description": "Whether to re-send email notification"
                    },
                    "message": message_schema()
                },
                "required": ["submitter_id"]
            }),
        ),
    ]
}

fn id_property(description: &str) -> Value {
    json!({
        "type": "number",
        "description": description
    })
}

/// Schema for tools whose only input is a single required id
fn id_schema(field: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: id_property(description)
        },
        "required": [field]
    })
}

fn limit_property(resource: &str) -> Value {
    json!({
        "type": "number",
        "description": format!("Number of {resource} to return (max 100)"),
        "default": 10
    })
}

fn message_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "subject": { "type": "string" },
            "body": { "type": "string" }
        },
        "description": "Custom email message"
    })
}

fn submitter_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "email": { "type": "string", "format": "email" },
            "name": { "type": "string" },
            "role": { "type": "string" },
            "phone": { "type": "string" },
            "send_email": { "type": "boolean", "default": true },
            "send_sms": { "type": "boolean", "default": false },
            "values": {
                "type": "object",
                "description": "Pre-filled field values"
            }
        },
        "required": ["email", "role"]
    })
}

fn document_schema() -> Value {
    let field_types: Vec<&str> = FieldType::ALL.iter().map(FieldType::as_str).collect();

    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "file": { "type": "string", "description": "Base64 encoded file content" },
            "fields": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "role": { "type": "string" },
                        "type": {
                            "type": "string",
                            "enum": field_types
                        },
                        "areas": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "x": { "type": "number" },
                                    "y": { "type": "number" },
                                    "w": { "type": "number" },
                                    "h": { "type": "number" },
                                    "page": { "type": "number" }
                                },
                                "required": ["x", "y", "w", "h", "page"]
                            }
                        }
                    },
                    "required": ["name", "role", "type", "areas"]
                }
            }
        },
        "required": ["name", "file"]
    })
}
