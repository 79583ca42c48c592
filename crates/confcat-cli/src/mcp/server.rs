use confcat_engine::SessionQuery;
use confcat_types::Session;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{BufRead, Write};
use tracing::{debug, info};

use super::tools::{ToolError, call_tool, tool_definitions};

const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// MCP tool server over a loaded session collection.
pub struct CatalogServer {
    sessions: Vec<Session>,
}

impl CatalogServer {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => JsonRpcResponse::success(id, tool_definitions()),
            "tools/call" => self.handle_call_tool(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            _ => JsonRpcResponse::failure(
                id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "confcat",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": format!(
                    "Conference catalog of {} sessions. Search sessions, speakers and services, or browse by level, role, industry, topic and other categories.",
                    self.sessions.len()
                )
            }),
        )
    }

    fn handle_call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::failure(id, -32602, "Missing params");
        };
        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::failure(id, -32602, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        debug!(tool = tool_name, "tool call");
        let query = SessionQuery::new(&self.sessions);
        match call_tool(&query, tool_name, &arguments) {
            Ok(content) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [
                        {
                            "type": "text",
                            "text": serde_json::to_string_pretty(&content)
                                .unwrap_or_else(|_| content.to_string())
                        }
                    ]
                }),
            ),
            Err(err @ ToolError::InvalidArguments(_)) => {
                JsonRpcResponse::failure(id, -32602, err.to_string())
            }
            Err(err @ ToolError::UnknownTool(_)) => {
                JsonRpcResponse::failure(id, -32601, err.to_string())
            }
        }
    }
}

/// Serve newline-delimited JSON-RPC until `reader` is exhausted.
///
/// Notifications (requests without an id) get no response.
pub fn run_server<R: BufRead, W: Write>(
    sessions: Vec<Session>,
    reader: R,
    mut writer: W,
) -> anyhow::Result<()> {
    let server = CatalogServer::new(sessions);
    info!(sessions = server.sessions.len(), "mcp server ready");

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
            Ok(request) if request.id.is_none() => {
                debug!(method = %request.method, "notification");
                continue;
            }
            Ok(request) => server.handle_request(request),
            Err(e) => JsonRpcResponse::failure(Value::Null, -32700, format!("Parse error: {}", e)),
        };

        writeln!(writer, "{}", serde_json::to_string(&response)?)?;
        writer.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confcat_types::Category;

    fn exchange(requests: &[Value]) -> Vec<Value> {
        let mut session = Session {
            code: Some("SVS201".to_string()),
            title: Some("Serverless patterns".to_string()),
            session_id: Some("1".to_string()),
            ..Default::default()
        };
        session.attributes.push(Category::Roles, "Developer");

        let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
        let mut output = Vec::new();
        run_server(vec![session], input.as_bytes(), &mut output).unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_initialize_then_call() {
        let responses = exchange(&[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "list_categories", "arguments": {"category": "roles"}}}),
        ]);

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["result"]["serverInfo"]["name"], "confcat");
        assert_eq!(responses[1]["id"], 2);

        let text = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
        let values: Value = serde_json::from_str(text).unwrap();
        assert_eq!(values[0]["name"], "Developer");
        assert_eq!(values[0]["count"], 1);
    }

    #[test]
    fn test_error_codes() {
        let responses = exchange(&[
            json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "nope"}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "get_session_details", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call"}),
        ]);

        assert_eq!(responses[0]["error"]["code"], -32601);
        assert_eq!(responses[1]["error"]["code"], -32601);
        assert_eq!(responses[2]["error"]["code"], -32602);
        assert_eq!(responses[3]["error"]["code"], -32602);
    }

    #[test]
    fn test_malformed_line_gets_parse_error() {
        let mut output = Vec::new();
        run_server(Vec::new(), "{ not json\n\n".as_bytes(), &mut output).unwrap();

        let response: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["error"]["code"], -32700);
        assert_eq!(response["id"], Value::Null);
    }
}
