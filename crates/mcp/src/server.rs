// MCP request dispatcher

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use serde_json::{json, Value};
use std::sync::Arc;

const INSTRUCTIONS: &str =
    "Use this server to search the Web for various types of data via the Brave Search API.";

/// One logical MCP server: dispatches JSON-RPC requests against a shared
/// tool registry. Each session gets its own instance.
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Handle a single request. Notifications return `None`.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize(request.params)),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            "logging/setLevel" => JsonRpcResponse::success(id, json!({})),
            method => JsonRpcResponse::error(id, JsonRpcError::method_not_found(method)),
        };

        Some(response)
    }

    fn initialize(&self, params: Option<Value>) -> InitializeResult {
        // Malformed or absent params do not fail the handshake; the server
        // answers with its own protocol version either way
        if let Some(params) =
            params.and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
        {
            tracing::debug!(
                client = %params.client_info,
                requested = %params.protocol_version,
                "initialize handshake"
            );
        }

        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo::default(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams =
            match serde_json::from_value(params.unwrap_or(Value::Null)) {
                Ok(params) => params,
                Err(error) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("invalid tool call params: {error}")),
                    );
                }
            };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("unknown tool: {}", params.name)),
            );
        };

        match tool.execute(params.arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                // Execution failures stay inside the tool result so the
                // session survives a failed invocation
                tracing::error!(tool = %params.name, "tool execution failed: {error:#}");
                JsonRpcResponse::success(
                    id,
                    crate::protocol::CallToolResult::error(format!("Error: {error}")),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
    use crate::tools::{json_schema_object, Tool};
    use anyhow::Result;

    struct EchoTool;

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".to_string(),
                description: "echoes".to_string(),
                input_schema: json_schema_object(json!({}), vec![]),
                annotations: None,
            }
        }

        async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
            Ok(CallToolResult::success(vec![ToolContent::text(
                arguments.to_string(),
            )]))
        }
    }

    struct FailingTool;

    #[async_trait::async_trait]
    impl Tool for FailingTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "failing".to_string(),
                description: "always fails".to_string(),
                input_schema: json_schema_object(json!({}), vec![]),
                annotations: None,
            }
        }

        async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
            anyhow::bail!("upstream exploded")
        }
    }

    fn server() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();
        registry.register(Arc::new(FailingTool)).unwrap();
        McpServer::new(Arc::new(registry))
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn initialize_reports_protocol_and_server_info() {
        let response = server()
            .handle(request("initialize", json!({ "protocolVersion": PROTOCOL_VERSION })))
            .await
            .unwrap();

        assert!(response.is_success());
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!("brave-search-mcp-server"));
        assert!(result["capabilities"]["logging"].is_object());
    }

    #[tokio::test]
    async fn initialize_tolerates_absent_params() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(7)),
            method: "initialize".to_string(),
            params: None,
        };
        let response = server().handle(request).await.unwrap();

        assert!(response.is_success());
        assert_eq!(
            response.result.unwrap()["protocolVersion"],
            json!(PROTOCOL_VERSION)
        );
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let notification = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(server().handle(notification).await.is_none());
    }

    #[tokio::test]
    async fn tools_list_returns_registered_schemas() {
        let response = server().handle(request("tools/list", json!({}))).await.unwrap();
        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["echo", "failing"]);
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let response = server()
            .handle(request("tools/call", json!({ "name": "nope" })))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn tool_failure_becomes_error_content_not_protocol_error() {
        let response = server()
            .handle(request("tools/call", json!({ "name": "failing" })))
            .await
            .unwrap();

        assert!(response.is_success());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["content"][0]["text"],
            json!("Error: upstream exploded")
        );
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let response = server()
            .handle(request("resources/list", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn ping_returns_empty_result() {
        let response = server().handle(request("ping", json!({}))).await.unwrap();
        assert_eq!(response.result.unwrap(), json!({}));
    }
}
