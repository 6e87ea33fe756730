//! API request and response types for the Raysurfer service.
//!
//! Request types always serialize every declared field, defaults included.
//! Response types tolerate missing fields; the pattern and few-shot types
//! additionally keep unknown keys so they survive a round trip to JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Endpoint;

/// A request body bound to a single endpoint and response type.
pub trait ApiRequest: Serialize {
    type Response: for<'de> Deserialize<'de>;

    const ENDPOINT: Endpoint;
}

// ============================================================================
// Request types
// ============================================================================

/// Search request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub task: String,
    pub top_k: u32,
    pub min_verdict_score: f64,
    pub prefer_complete: bool,
}

impl SearchRequest {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            top_k: 5,
            min_verdict_score: 0.0,
            prefer_complete: true,
        }
    }
}

impl ApiRequest for SearchRequest {
    type Response = SearchResponse;
    const ENDPOINT: Endpoint = Endpoint::Search;
}

/// A local file sent along with an upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadFile {
    pub path: String,
    pub content: String,
}

/// Upload request body (one file per request)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRequest {
    pub task: String,
    pub file_written: UploadFile,
    pub succeeded: bool,
    pub auto_vote: bool,
}

impl UploadRequest {
    pub fn new(task: impl Into<String>, file_written: UploadFile) -> Self {
        Self {
            task: task.into(),
            file_written,
            succeeded: true,
            auto_vote: true,
        }
    }
}

impl ApiRequest for UploadRequest {
    type Response = UploadResponse;
    const ENDPOINT: Endpoint = Endpoint::Upload;
}

/// Vote request body. `succeeded` is the vote direction (true = thumbs up).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteRequest {
    pub code_block_id: String,
    pub succeeded: bool,
    pub task: String,
    pub code_block_name: String,
    pub code_block_description: String,
}

impl VoteRequest {
    pub fn new(code_block_id: impl Into<String>, succeeded: bool, task: impl Into<String>) -> Self {
        Self {
            code_block_id: code_block_id.into(),
            succeeded,
            task: task.into(),
            code_block_name: String::new(),
            code_block_description: String::new(),
        }
    }
}

impl ApiRequest for VoteRequest {
    type Response = VoteResponse;
    const ENDPOINT: Endpoint = Endpoint::Vote;
}

/// Task patterns request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternsRequest {
    pub task: String,
    pub code_block_id: String,
    pub min_thumbs_up: u32,
    pub top_k: u32,
}

impl PatternsRequest {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            code_block_id: String::new(),
            min_thumbs_up: 1,
            top_k: 5,
        }
    }
}

impl ApiRequest for PatternsRequest {
    type Response = PatternsResponse;
    const ENDPOINT: Endpoint = Endpoint::Patterns;
}

/// Few-shot examples request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FewShotRequest {
    pub task: String,
    pub k: u32,
}

impl FewShotRequest {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            k: 3,
        }
    }
}

impl ApiRequest for FewShotRequest {
    type Response = FewShotResponse;
    const ENDPOINT: Endpoint = Endpoint::FewShotExamples;
}

// ============================================================================
// Response types
// ============================================================================

/// Metadata for a cached code block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeBlock {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source: String,
    pub entrypoint: String,
    pub language: String,
    pub dependencies: Vec<String>,
    pub tags: Vec<String>,
}

/// A single search hit
///
/// The match-level `filename`, `language`, `entrypoint` and `dependencies`
/// are fallbacks for when no code block is attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMatch {
    pub code_block: Option<CodeBlock>,
    pub combined_score: f64,
    pub vector_score: f64,
    pub verdict_score: f64,
    pub thumbs_up: u64,
    pub thumbs_down: u64,
    pub filename: String,
    pub language: String,
    pub entrypoint: String,
    pub dependencies: Vec<String>,
}

impl SearchMatch {
    /// Display name: code block name, then filename.
    pub fn display_name(&self) -> Option<&str> {
        self.code_block
            .as_ref()
            .map(|cb| cb.name.as_str())
            .filter(|name| !name.is_empty())
            .or_else(|| Some(self.filename.as_str()).filter(|name| !name.is_empty()))
    }

    pub fn display_language(&self) -> Option<&str> {
        self.code_block
            .as_ref()
            .map(|cb| cb.language.as_str())
            .filter(|lang| !lang.is_empty())
            .or_else(|| Some(self.language.as_str()).filter(|lang| !lang.is_empty()))
    }

    pub fn code_block_id(&self) -> Option<&str> {
        self.code_block
            .as_ref()
            .map(|cb| cb.id.as_str())
            .filter(|id| !id.is_empty())
    }

    pub fn source(&self) -> Option<&str> {
        self.code_block
            .as_ref()
            .map(|cb| cb.source.as_str())
            .filter(|source| !source.is_empty())
    }
}

/// Search response. `matches` keeps the server's rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub matches: Vec<SearchMatch>,
    pub total_found: u64,
    pub cache_hit: bool,
    pub search_namespaces: Vec<String>,
}

/// Upload response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    pub code_block_ids: Vec<String>,
    pub message: String,
}

/// Vote response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteResponse {
    pub success: bool,
    pub message: String,
}

/// A proven task pattern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternEntry {
    pub code_block: Option<CodeBlock>,
    pub thumbs_up: u64,
    pub thumbs_down: u64,
    pub combined_score: f64,
    /// Fields the server added that this client does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatternEntry {
    pub fn display_name(&self) -> Option<&str> {
        self.code_block
            .as_ref()
            .map(|cb| cb.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn code_block_id(&self) -> Option<&str> {
        self.code_block
            .as_ref()
            .map(|cb| cb.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// Task patterns response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsResponse {
    pub patterns: Vec<PatternEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A task/code pair for prompting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FewShotExample {
    pub task: String,
    pub code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Few-shot examples response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FewShotResponse {
    pub examples: Vec<FewShotExample>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_defaults() {
        let body = serde_json::to_value(SearchRequest::new("fix flaky test")).unwrap();
        assert_eq!(
            body,
            json!({
                "task": "fix flaky test",
                "top_k": 5,
                "min_verdict_score": 0.0,
                "prefer_complete": true
            })
        );
    }

    #[test]
    fn test_request_bodies_serialize_all_fields() {
        let upload = UploadRequest::new(
            "parse csv",
            UploadFile {
                path: "csv.py".to_string(),
                content: "import csv\n".to_string(),
            },
        );
        assert_eq!(
            serde_json::to_value(&upload).unwrap(),
            json!({
                "task": "parse csv",
                "file_written": {"path": "csv.py", "content": "import csv\n"},
                "succeeded": true,
                "auto_vote": true
            })
        );

        let vote = VoteRequest::new("abc123", false, "");
        assert_eq!(
            serde_json::to_value(&vote).unwrap(),
            json!({
                "code_block_id": "abc123",
                "succeeded": false,
                "task": "",
                "code_block_name": "",
                "code_block_description": ""
            })
        );

        assert_eq!(
            serde_json::to_value(PatternsRequest::new("retry http")).unwrap(),
            json!({
                "task": "retry http",
                "code_block_id": "",
                "min_thumbs_up": 1,
                "top_k": 5
            })
        );

        assert_eq!(
            serde_json::to_value(FewShotRequest::new("retry http")).unwrap(),
            json!({"task": "retry http", "k": 3})
        );
    }

    #[test]
    fn test_request_field_order() {
        let body = serde_json::to_string(&SearchRequest::new("t")).unwrap();
        assert_eq!(
            body,
            r#"{"task":"t","top_k":5,"min_verdict_score":0.0,"prefer_complete":true}"#
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let response: SearchResponse =
            serde_json::from_value(json!({"matches": [{"code_block": {"name": "x"}}]})).unwrap();
        assert_eq!(response.total_found, 0);
        assert!(!response.cache_hit);
        assert!(response.search_namespaces.is_empty());

        let hit = &response.matches[0];
        assert_eq!(hit.thumbs_up, 0);
        assert_eq!(hit.combined_score, 0.0);
        let block = hit.code_block.as_ref().unwrap();
        assert_eq!(block.name, "x");
        assert!(block.tags.is_empty());
        assert!(block.dependencies.is_empty());

        let empty: UploadResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, UploadResponse::default());
    }

    #[test]
    fn test_integer_scores_accepted() {
        let hit: SearchMatch = serde_json::from_value(json!({"combined_score": 1})).unwrap();
        assert_eq!(hit.combined_score, 1.0);
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let result = serde_json::from_value::<SearchResponse>(json!({"total_found": "seven"}));
        assert!(result.is_err());

        let result = serde_json::from_value::<VoteResponse>(json!({"message": null}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_ignored_on_strict_types() {
        let response: VoteResponse =
            serde_json::from_value(json!({"success": true, "message": "ok", "trace": 42}))
                .unwrap();
        assert!(response.success);
        let round = serde_json::to_value(&response).unwrap();
        assert!(round.get("trace").is_none());
    }

    #[test]
    fn test_extra_fields_retained_on_tolerant_types() {
        let raw = json!({
            "patterns": [{
                "code_block": {"id": "p1", "name": "retry"},
                "thumbs_up": 4,
                "task_pattern": "retry *"
            }],
            "registry": "community"
        });
        let response: PatternsResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(response.extra.get("registry"), Some(&json!("community")));
        let entry = &response.patterns[0];
        assert_eq!(entry.thumbs_up, 4);
        assert_eq!(entry.extra.get("task_pattern"), Some(&json!("retry *")));
        assert!(!entry.extra.contains_key("thumbs_up"));

        let examples: FewShotResponse = serde_json::from_value(json!({
            "examples": [{"task": "t", "code": "c", "score": 0.5}],
            "model": "v2"
        }))
        .unwrap();
        assert_eq!(examples.examples[0].extra.get("score"), Some(&json!(0.5)));
        assert_eq!(examples.extra.get("model"), Some(&json!("v2")));
    }

    #[test]
    fn test_parse_serialize_parse_is_stable() {
        let raw = json!({
            "matches": [{
                "code_block": {"id": "a", "name": "n", "tags": ["x"]},
                "combined_score": 0.9,
                "thumbs_up": 3
            }],
            "total_found": 7,
            "cache_hit": true,
            "search_namespaces": ["team-a"]
        });
        let first: SearchResponse = serde_json::from_value(raw).unwrap();
        let second: SearchResponse =
            serde_json::from_value(serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);

        let patterns: PatternsResponse =
            serde_json::from_value(json!({"patterns": [{"x": 1}], "y": [2]})).unwrap();
        let again: PatternsResponse =
            serde_json::from_value(serde_json::to_value(&patterns).unwrap()).unwrap();
        assert_eq!(patterns, again);
    }

    #[test]
    fn test_display_fields_prefer_code_block() {
        let hit = SearchMatch {
            code_block: Some(CodeBlock {
                name: "retry_helper".to_string(),
                language: "python".to_string(),
                ..Default::default()
            }),
            filename: "retry.py".to_string(),
            language: "text".to_string(),
            ..Default::default()
        };
        assert_eq!(hit.display_name(), Some("retry_helper"));
        assert_eq!(hit.display_language(), Some("python"));

        let bare = SearchMatch {
            filename: "retry.py".to_string(),
            language: "python".to_string(),
            ..Default::default()
        };
        assert_eq!(bare.display_name(), Some("retry.py"));
        assert_eq!(bare.display_language(), Some("python"));
        assert_eq!(bare.code_block_id(), None);
        assert_eq!(SearchMatch::default().display_name(), None);
    }
}
