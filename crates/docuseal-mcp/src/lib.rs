//! MCP Server for DocuSeal
//!
//! This crate exposes DocuSeal document-signing operations via the Model
//! Context Protocol (MCP), allowing agent runtimes (Claude Desktop, Cursor,
//! Windsurf, ...) to manage templates, submissions and submitters.
//!
//! # Architecture
//!
//! The `docuseal-mcp` crate is a thin facade over `docuseal-api`:
//!
//! ```text
//! [ MCP Client (agent runtime) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ docuseal-mcp (MCP Server) ]
//!        | tools/list -> tool catalog
//!        | tools/call -> handler -> one API request
//!        v
//! [ docuseal-api (HTTP client) ]
//!        |
//!        +--> [ DocuSeal REST API (cloud or self-hosted) ]
//! ```
//!
//! # Tools
//!
//! - Templates: list, get, clone, archive, create from PDF
//! - Submissions: list, get, create, archive
//! - Submitters: list, get, update
//!
//! Every tool call yields a result envelope. Failures (missing API key,
//! remote HTTP errors, unknown tools, bad arguments) come back as text with
//! the `isError` flag set rather than as protocol errors.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use handlers::{call_tool, handle_tool_call};
pub use server::DocusealMcpServer;
pub use tools::{get_tool_definitions, ToolContent, ToolDefinition, ToolResult};
