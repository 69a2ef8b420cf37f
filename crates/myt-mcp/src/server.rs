//! MCP server implementation.
//!
//! The server handles the MCP protocol lifecycle:
//! 1. Initialize - exchange capabilities
//! 2. Handle tool calls - dispatch to the tool registry
//! 3. Shutdown - stop at EOF on stdin

use std::io::{BufRead, ErrorKind, Write};

use myt_jira_workflow::TransitionResolver;
use serde::Serialize;
use serde_json::Value;

use crate::handlers::default_registry;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, ToolsListResult, MCP_VERSION,
};
use crate::tools::ToolRegistry;
use crate::transport::{IncomingMessage, LineTransport, StdioTransport};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "myt-mcp";

/// MCP server for myt-tools.
pub struct McpServer {
    registry: ToolRegistry,
    initialized: bool,
}

impl McpServer {
    /// Create a server exposing the tools in `registry`.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server on stdin/stdout until EOF.
    pub async fn run(&mut self) -> myt_core::Result<()> {
        let mut transport = StdioTransport::stdio();
        self.serve(&mut transport).await
    }

    /// Serve requests from `transport` until EOF.
    ///
    /// Unparseable lines get a parse error response; any other I/O failure
    /// ends the session with an error.
    pub async fn serve<R: BufRead, W: Write>(
        &mut self,
        transport: &mut LineTransport<R, W>,
    ) -> myt_core::Result<()> {
        tracing::info!(
            "Starting MCP server with {} tools: {}",
            self.registry.len(),
            self.registry.names().join(", ")
        );

        loop {
            let response = match transport.read_message() {
                Ok(Some(msg)) => self.handle_message(msg).await,
                Ok(None) => break,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    tracing::warn!(error = %e, "Unreadable message");
                    Some(JsonRpcResponse::error(
                        RequestId::Null,
                        JsonRpcError::parse_error(&e.to_string()),
                    ))
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(response) = response {
                transport.write_response(&response)?;
            }
        }

        tracing::info!("Input closed, MCP server stopped");
        Ok(())
    }

    async fn handle_message(&mut self, msg: IncomingMessage) -> Option<JsonRpcResponse> {
        match msg {
            IncomingMessage::Request(req) => Some(self.handle_request(req).await),
            IncomingMessage::Notification(notif) => {
                self.on_notification(&notif.method);
                None
            }
        }
    }

    /// Dispatch one request and wrap the outcome in a response for its id.
    async fn handle_request(&mut self, req: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %req.method, id = ?req.id, "Dispatching request");

        let outcome = match req.method.as_str() {
            "initialize" => self.initialize(req.params),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(req.params).await,
            "ping" => Ok(Value::Object(Default::default())),
            method => {
                tracing::warn!(method, "Method not supported");
                Err(JsonRpcError::method_not_found(method))
            }
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(req.id, result),
            Err(error) => JsonRpcResponse::error(req.id, error),
        }
    }

    fn on_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => tracing::info!("Client ready"),
            "notifications/cancelled" => tracing::debug!("Client cancelled a request"),
            other => tracing::debug!(method = other, "Notification ignored"),
        }
    }

    fn initialize(&mut self, params: Option<Value>) -> RpcResult {
        if self.initialized {
            return Err(JsonRpcError::invalid_request("Server already initialized"));
        }

        // Client details are informational; bad params don't fail the handshake
        match params.map(serde_json::from_value::<InitializeParams>) {
            Some(Ok(params)) => tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol = %params.protocol_version,
                "Client connected"
            ),
            Some(Err(e)) => tracing::warn!("Unreadable initialize params: {}", e),
            None => {}
        }

        self.initialized = true;

        to_rpc_value(&InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    fn list_tools(&self) -> RpcResult {
        to_rpc_value(&ToolsListResult {
            tools: self.registry.definitions(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> RpcResult {
        let params: ToolCallParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| JsonRpcError::invalid_params(&e.to_string()))
            })?;

        tracing::info!(tool = %params.name, "Tool call");

        let result = self.registry.call(&params.name, params.arguments).await;
        to_rpc_value(&result)
    }
}

type RpcResult = std::result::Result<Value, JsonRpcError>;

fn to_rpc_value<T: Serialize>(value: &T) -> RpcResult {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(&e.to_string()))
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new(default_registry(TransitionResolver::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ToolCallResult, JSONRPC_VERSION};
    use std::io::Cursor;

    fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: RequestId::Number(id),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_response() {
        let mut server = McpServer::default();

        let resp = server
            .handle_request(request(
                1,
                "initialize",
                Some(serde_json::json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {
                        "name": "test-client",
                        "version": "1.0.0"
                    }
                })),
            ))
            .await;

        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], MCP_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(server.is_initialized());
    }

    #[test]
    fn test_double_initialize_error() {
        let mut server = McpServer::default();
        server.initialize(None).unwrap();

        let err = server.initialize(None).unwrap_err();
        assert_eq!(err.code, JsonRpcError::INVALID_REQUEST);
    }

    #[test]
    fn test_initialize_with_invalid_params() {
        let mut server = McpServer::default();

        // Unparseable params are only logged
        let result = server.initialize(Some(serde_json::json!({"invalid": true})));

        assert!(result.is_ok());
        assert!(server.is_initialized());
    }

    #[test]
    fn test_tools_list() {
        let server = McpServer::default();

        let result: ToolsListResult = serde_json::from_value(server.list_tools().unwrap()).unwrap();
        let names: Vec<_> = result.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["get_jira_transitions", "jira_transition"]);
    }

    #[tokio::test]
    async fn test_ping() {
        let mut server = McpServer::default();
        let mut req = request(0, "ping", None);
        req.id = RequestId::String("ping-1".to_string());

        let resp = server.handle_request(req).await;

        assert_eq!(resp.id, RequestId::String("ping-1".to_string()));
        assert_eq!(resp.result, Some(serde_json::json!({})));
        assert!(resp.error.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let mut server = McpServer::default();

        let resp = server
            .handle_request(request(1, "unknown/method", None))
            .await;

        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let mut server = McpServer::default();

        let msg = IncomingMessage::Notification(crate::protocol::JsonRpcNotification {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: "initialized".to_string(),
            params: None,
        });

        assert!(server.handle_message(msg).await.is_none());
    }

    #[tokio::test]
    async fn test_tools_call() {
        let mut server = McpServer::default();

        let resp = server
            .handle_request(request(
                3,
                "tools/call",
                Some(serde_json::json!({
                    "name": "get_jira_transitions",
                    "arguments": {"from_status": "qa", "to_status": "validating"}
                })),
            ))
            .await;

        let result: ToolCallResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert!(result.is_error.is_none());
        assert!(result.text_content().contains("\"direct_transition\""));
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let server = McpServer::default();

        let value = server
            .call_tool(Some(serde_json::json!({"name": "get_issues"})))
            .await
            .unwrap();

        let result: ToolCallResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_tools_call_bad_params() {
        let server = McpServer::default();

        let missing = server.call_tool(None).await.unwrap_err();
        assert_eq!(missing.code, JsonRpcError::INVALID_PARAMS);

        let malformed = server
            .call_tool(Some(serde_json::json!("not an object")))
            .await
            .unwrap_err();
        assert_eq!(malformed.code, JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_serve_session() {
        let input = [
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"t","version":"1"}}}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "garbage",
            r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#,
        ]
        .join("\n");

        let mut transport = LineTransport::new(Cursor::new(input.into_bytes()), Vec::new());
        let mut server = McpServer::default();
        server.serve(&mut transport).await.unwrap();

        let output = String::from_utf8(transport.into_writer()).unwrap();
        let responses: Vec<JsonRpcResponse> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        // One response per request plus the parse error; none for the notification
        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0].id, RequestId::Number(1));
        assert_eq!(responses[1].id, RequestId::Number(2));
        assert_eq!(responses[2].id, RequestId::Null);
        assert_eq!(
            responses[2].error.as_ref().unwrap().code,
            JsonRpcError::PARSE_ERROR
        );
        assert_eq!(responses[3].id, RequestId::Number(3));
    }
}
