use confcat_engine::{Page, SessionQuery};
use confcat_types::Category;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;

const DEFAULT_LIMIT: usize = 20;
const DEFAULT_SPEAKER_LIMIT: usize = 5;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// No tool with this name
    UnknownTool(String),
    /// Arguments missing or of the wrong shape
    InvalidArguments(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
            ToolError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl std::error::Error for ToolError {}

#[derive(Debug, Deserialize)]
struct PageArgs {
    limit: Option<usize>,
    cursor: Option<String>,
}

impl PageArgs {
    fn page(&self, default_limit: usize) -> Page {
        let limit = self.limit.unwrap_or(default_limit).clamp(1, MAX_LIMIT);
        Page::new(limit, self.cursor.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct SearchSessionsArgs {
    query: String,
    #[serde(flatten)]
    page: PageArgs,
}

#[derive(Debug, Deserialize)]
struct SearchSpeakersArgs {
    #[serde(default)]
    speaker_name: String,
    #[serde(flatten)]
    page: PageArgs,
}

#[derive(Debug, Deserialize)]
struct SessionDetailsArgs {
    session_code: String,
}

#[derive(Debug, Deserialize)]
struct ListCategoriesArgs {
    category: String,
}

/// `get_sessions_by_*` tools: tool name, argument name, category filtered on.
const SESSIONS_BY: [(&str, &str, Category); 7] = [
    ("get_sessions_by_service", "service", Category::Services),
    ("get_sessions_by_role", "role", Category::Roles),
    ("get_sessions_by_industry", "industry", Category::Industries),
    ("get_sessions_by_segment", "segment", Category::Segments),
    ("get_sessions_by_feature", "feature", Category::Features),
    ("get_sessions_by_topic", "topic", Category::Topics),
    ("get_sessions_by_area_of_interest", "area_of_interest", Category::AreasOfInterest),
];

fn parse<T: DeserializeOwned>(arguments: &Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments.clone()).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Run one tool against the loaded sessions.
///
/// `get_session_details` answers `null` for an unknown code rather than failing.
pub fn call_tool(query: &SessionQuery, name: &str, arguments: &Value) -> Result<Value, ToolError> {
    match name {
        "search_sessions" => {
            let args: SearchSessionsArgs = parse(arguments)?;
            to_value(&query.search_sessions(&args.query, &args.page.page(DEFAULT_LIMIT)))
        }
        "search_services" => {
            let args: SearchSessionsArgs = parse(arguments)?;
            to_value(&query.search_services(&args.query, &args.page.page(DEFAULT_LIMIT)))
        }
        "search_speakers" => {
            let args: SearchSpeakersArgs = parse(arguments)?;
            to_value(&query.search_speakers(
                &args.speaker_name,
                &args.page.page(DEFAULT_SPEAKER_LIMIT),
            ))
        }
        "get_session_details" => {
            let args: SessionDetailsArgs = parse(arguments)?;
            to_value(&query.session_details(&args.session_code))
        }
        "list_categories" => {
            let args: ListCategoriesArgs = parse(arguments)?;
            to_value(&query.list_categories(&args.category))
        }
        "get_sessions_by_level" => {
            let level = required_str(arguments, "level")?;
            let page: PageArgs = parse(arguments)?;
            to_value(&query.sessions_by_level(level, &page.page(DEFAULT_LIMIT)))
        }
        _ => {
            let Some((_, param, category)) = SESSIONS_BY.iter().find(|(tool, _, _)| *tool == name)
            else {
                return Err(ToolError::UnknownTool(name.to_string()));
            };
            let value = required_str(arguments, param)?;
            let page: PageArgs = parse(arguments)?;
            to_value(&query.sessions_by(*category, value, &page.page(DEFAULT_LIMIT)))
        }
    }
}

fn required_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing string field `{}`", key)))
}

fn page_properties(default_limit: usize) -> Value {
    json!({
        "limit": {
            "type": "number",
            "minimum": 1,
            "maximum": MAX_LIMIT,
            "description": format!("Maximum number of results (default: {})", default_limit)
        },
        "cursor": {
            "type": "string",
            "description": "Offset returned as next_cursor by the previous page"
        }
    })
}

fn paged_schema(param: &str, description: &str, default_limit: usize) -> Value {
    let mut properties = page_properties(default_limit);
    properties[param] = json!({"type": "string", "description": description});
    json!({
        "type": "object",
        "properties": properties,
        "required": [param]
    })
}

/// Descriptors returned by `tools/list`.
pub fn tool_definitions() -> Value {
    let mut tools = vec![
        json!({
            "name": "search_sessions",
            "description": "Search sessions by keyword in title, abstract or speaker name. An empty query returns every session.",
            "inputSchema": paged_schema("query", "Search keyword (case-insensitive)", DEFAULT_LIMIT)
        }),
        json!({
            "name": "get_session_details",
            "description": "Full details of one session by its code: abstract, type, attributes and speakers.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "session_code": {"type": "string", "description": "Session code such as SVS201"}
                },
                "required": ["session_code"]
            }
        }),
        json!({
            "name": "list_categories",
            "description": "Distinct values of a category with session counts. Supported categories: topics, services, industries, roles, levels, segments, areas_of_interest, features, types.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "enum": ["topics", "services", "industries", "roles", "levels", "segments", "areas_of_interest", "features", "types"]
                    }
                },
                "required": ["category"]
            }
        }),
        json!({
            "name": "search_services",
            "description": "Find services whose name contains the query, with the number of sessions covering each.",
            "inputSchema": paged_schema("query", "Service name fragment", DEFAULT_LIMIT)
        }),
        json!({
            "name": "search_speakers",
            "description": "Find speakers by name with the sessions they present. An empty name returns every speaker.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "speaker_name": {"type": "string", "description": "Speaker name fragment"},
                    "limit": page_properties(DEFAULT_SPEAKER_LIMIT)["limit"].clone(),
                    "cursor": page_properties(DEFAULT_SPEAKER_LIMIT)["cursor"].clone()
                }
            }
        }),
        json!({
            "name": "get_sessions_by_level",
            "description": "Sessions at a difficulty level. Supported levels: 100 (Foundational), 200 (Intermediate), 300 (Advanced), 400 (Expert), 500 (Distinguished).",
            "inputSchema": paged_schema("level", "One of 100, 200, 300, 400, 500", DEFAULT_LIMIT)
        }),
    ];

    for (tool, param, category) in SESSIONS_BY {
        tools.push(json!({
            "name": tool,
            "description": format!(
                "Sessions tagged with an exact {} value. Supported values are listed by list_categories.",
                category
            ),
            "inputSchema": paged_schema(param, &format!("Exact {} value", param.replace('_', " ")), DEFAULT_LIMIT)
        }));
    }

    json!({ "tools": tools })
}

#[cfg(test)]
mod tests {
    use super::*;
    use confcat_types::Session;

    fn sessions() -> Vec<Session> {
        let mut a = Session {
            code: Some("SVS201".to_string()),
            title: Some("Serverless patterns".to_string()),
            session_id: Some("1".to_string()),
            speakers: vec![json!({"fullName": "Ada Lovelace"})],
            ..Default::default()
        };
        a.attributes.push(Category::Roles, "Developer");
        a.attributes.push(Category::Level, "300 – Advanced");

        let b = Session {
            code: Some("KEY001".to_string()),
            title: Some("Keynote".to_string()),
            session_id: Some("2".to_string()),
            ..Default::default()
        };

        vec![a, b]
    }

    #[test]
    fn test_every_tool_is_listed_with_schema() {
        let defs = tool_definitions();
        let tools = defs["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 13);

        for tool in tools {
            let description = tool["description"].as_str().unwrap();
            assert!(description.len() > 20);
            assert_eq!(tool["inputSchema"]["type"], "object");
            if let Some(limit) = tool["inputSchema"]["properties"].get("limit") {
                assert_eq!(limit["type"], "number");
                assert_eq!(limit["maximum"], MAX_LIMIT);
            }
        }

        for name in ["get_sessions_by_role", "get_sessions_by_level", "get_sessions_by_topic"] {
            let tool = tools.iter().find(|t| t["name"] == name).unwrap();
            assert!(tool["description"].as_str().unwrap().to_lowercase().contains("supported"));
        }
    }

    #[test]
    fn test_call_search_sessions() {
        let data = sessions();
        let query = SessionQuery::new(&data);

        let result = call_tool(&query, "search_sessions", &json!({"query": "", "limit": 1})).unwrap();
        assert_eq!(result["total"], 2);
        assert_eq!(result["items"].as_array().unwrap().len(), 1);
        assert_eq!(result["next_cursor"], "1");
    }

    #[test]
    fn test_call_sessions_by_tools() {
        let data = sessions();
        let query = SessionQuery::new(&data);

        let result = call_tool(&query, "get_sessions_by_role", &json!({"role": "Developer"})).unwrap();
        assert_eq!(result["items"][0]["code"], "SVS201");

        let result = call_tool(&query, "get_sessions_by_level", &json!({"level": "300"})).unwrap();
        assert_eq!(result["total"], 1);
    }

    #[test]
    fn test_unknown_session_code_is_null() {
        let data = sessions();
        let query = SessionQuery::new(&data);

        let result = call_tool(&query, "get_session_details", &json!({"session_code": "INVALID"})).unwrap();
        assert_eq!(result, Value::Null);
    }

    #[test]
    fn test_bad_calls() {
        let data = sessions();
        let query = SessionQuery::new(&data);

        assert_eq!(
            call_tool(&query, "drop_tables", &json!({})),
            Err(ToolError::UnknownTool("drop_tables".to_string()))
        );
        assert!(matches!(
            call_tool(&query, "get_sessions_by_role", &json!({})),
            Err(ToolError::InvalidArguments(_))
        ));
        assert!(matches!(
            call_tool(&query, "search_sessions", &json!({"limit": 3})),
            Err(ToolError::InvalidArguments(_))
        ));
    }
}
