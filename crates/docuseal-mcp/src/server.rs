//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling
//! with the DocuSeal API client.

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use docuseal_api::DocusealClient;

use crate::handlers::call_tool;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolsCapability, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PROTOCOL_VERSION,
};
use crate::tools::{get_tool_definitions, is_known_tool, ToolDefinition};
use crate::{Error, Result};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "docuseal-mcp";

/// MCP Server for DocuSeal
///
/// Reads newline-delimited JSON-RPC requests, answers each one in turn and
/// writes one response line per request. Tool calls are forwarded to the
/// DocuSeal API through the injected [`DocusealClient`].
///
/// # Example
///
/// ```ignore
/// use docuseal_api::{Config, DocusealClient};
/// use docuseal_mcp::DocusealMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = DocusealClient::with_http(Config::from_env());
///     let mut server = DocusealMcpServer::new(client);
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct DocusealMcpServer {
    client: DocusealClient,

    /// Whether the server has been initialized
    initialized: bool,

    /// Available MCP tools
    tools: Vec<ToolDefinition>,
}

impl DocusealMcpServer {
    /// Create a new MCP server instance around a configured client
    pub fn new(client: DocusealClient) -> Self {
        Self {
            client,
            initialized: false,
            tools: Vec::new(),
        }
    }

    /// Load the tool catalog
    pub fn initialize(&mut self) {
        tracing::info!(base_url = %self.client.config().base_url(), "Initializing MCP server");
        if self.client.config().api_key().is_none() {
            tracing::warn!("DOCUSEAL_API_KEY is not set; tool calls will fail until it is provided");
        }

        self.tools = get_tool_definitions();
        self.initialized = true;
    }

    /// Run the MCP server over stdin/stdout until stdin closes
    pub async fn run(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Process newline-delimited requests from `reader`, writing responses to `writer`.
    ///
    /// Returns when the reader reaches EOF. Lines that are not UTF-8 or not
    /// JSON are answered with a parse error; only I/O failures on the channel
    /// itself are returned as errors.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if !self.initialized {
            self.initialize();
        }

        tracing::info!("MCP server ready, listening on stdio");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    tracing::debug!(request = %line, "Received message");

                    match self.handle_message(line).await {
                        Ok(response) => response,
                        Err(e) => serde_json::to_string(&internal_error(None, &e))?,
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Message is not valid UTF-8");
                    serde_json::to_string(&JsonRpcResponse::parse_error(format!(
                        "Parse error: {}",
                        e
                    )))?
                }
            };

            // Notifications get no response
            if response.is_empty() {
                continue;
            }

            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Parses the JSON-RPC request and dispatches to the appropriate handler.
    ///
    /// # Returns
    ///
    /// The JSON-RPC response as a string, or empty string for notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let raw: Value = match serde_json::from_str(message) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                return Ok(serde_json::to_string(&JsonRpcResponse::parse_error(
                    format!("Parse error: {}", e),
                ))?);
            }
        };

        let id = raw.get("id").cloned().filter(|id| !id.is_null());
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(request) => request,
            Err(e) => {
                return Ok(serde_json::to_string(&JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                ))?);
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return Ok(String::new());
        }

        let id = request.id.clone();
        let response = match self.dispatch(request).await {
            Ok(response) => response,
            Err(e) => internal_error(id, &e),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Route a request to its method handler
    async fn dispatch(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params)?,
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };
        Ok(response)
    }

    /// Handle the initialize request
    ///
    /// Returns server capabilities and info.
    fn handle_initialize(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();
        if let Some(client) = &params.client_info {
            tracing::info!(
                client = %client.name,
                version = client.version.as_deref().unwrap_or("unknown"),
                protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
                "Client connected"
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools = if self.tools.is_empty() {
            get_tool_definitions()
        } else {
            self.tools.clone()
        };

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    ///
    /// Tool failures are reported inside a successful JSON-RPC response with
    /// the result's error flag set; only malformed params produce a
    /// JSON-RPC error.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        if is_known_tool(&tool_params.name) {
            tracing::info!(tool = %tool_params.name, "Tool call");
        } else {
            tracing::warn!(tool = %tool_params.name, "Call to unknown tool");
        }
        let result = call_tool(&self.client, &tool_params.name, tool_params.arguments).await;
        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Check if the server is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }
}

/// Internal-error reply for a request whose handler failed
fn internal_error(id: Option<Value>, error: &Error) -> JsonRpcResponse {
    tracing::error!(error = %error, "Request handling failed");
    JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Internal error: {}", error))
}
