//! Fixture loading.
//!
//! A category's fixtures live in two JSON objects keyed by test name: one
//! holding request payloads, one holding expected responses. Cases are
//! yielded in the key order of the payload file.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::error::{CoreError, Result};

/// A single named request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    /// Test name, the key in the payload file.
    pub name: String,
    /// Request payload sent as the JSON body (or used for the lookup id).
    pub payload: Value,
}

impl TestCase {
    /// Create a test case.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Whether the case name marks it as a GET-by-id lookup.
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        self.name.contains("get")
    }

    /// The payload's `id` as text, before path encoding.
    ///
    /// Strings are returned verbatim, numbers use their JSON text; the request
    /// planner percent-encodes the result into a path segment. Anything else
    /// (including a missing `id`) yields `None`.
    #[must_use]
    pub fn lookup_id(&self) -> Option<String> {
        match self.payload.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A test case paired with the response it should produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fixture {
    /// The request side.
    pub case: TestCase,
    /// Expected response body; `None` when the responses file has no entry.
    pub expected: Option<Value>,
}

/// All fixtures of one category, in payload file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureSet {
    /// Category the fixtures belong to.
    pub category: Category,
    /// Fixtures in execution order.
    pub fixtures: Vec<Fixture>,
}

impl FixtureSet {
    /// Number of fixtures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// Whether the set has no fixtures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

/// Load the fixtures of `category` from the payload and response directories.
///
/// # Errors
///
/// Returns an error if either file is unreadable, is not valid JSON, or does
/// not contain a JSON object at its root.
pub fn load_category(
    payloads_dir: &Path,
    responses_dir: &Path,
    category: Category,
) -> Result<FixtureSet> {
    let payload_path = payloads_dir.join(category.payload_file_name());
    let response_path = responses_dir.join(category.response_file_name());

    let payloads = read_object(&payload_path)?;
    let responses = read_object(&response_path)?;

    Ok(pair(category, payloads, responses))
}

/// Build a fixture set from in-memory payload and response documents.
///
/// # Errors
///
/// Returns an error if either text is not a JSON object.
pub fn parse_fixtures(
    category: Category,
    payloads: &str,
    responses: &str,
) -> Result<FixtureSet> {
    let payloads = parse_object(payloads, Path::new(&category.payload_file_name()))?;
    let responses = parse_object(responses, Path::new(&category.response_file_name()))?;

    Ok(pair(category, payloads, responses))
}

fn pair(
    category: Category,
    payloads: Map<String, Value>,
    mut responses: Map<String, Value>,
) -> FixtureSet {
    let fixtures = payloads
        .into_iter()
        .map(|(name, payload)| {
            let expected = responses.remove(&name);
            Fixture {
                case: TestCase { name, payload },
                expected,
            }
        })
        .collect();

    FixtureSet { category, fixtures }
}

fn read_object(path: &Path) -> Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_object(&contents, path)
}

fn parse_object(contents: &str, path: &Path) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(contents).map_err(|source| CoreError::Parse {
        path: PathBuf::from(path),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::InvalidFixtureFile {
            path: path.to_path_buf(),
            reason: format!("expected a JSON object keyed by test name, found {}", kind(&other)),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn lookup_detection_uses_case_name() {
        assert!(TestCase::new("user_get_1", json!({"id": 1})).is_lookup());
        assert!(!TestCase::new("user_create_1", json!({"id": 1})).is_lookup());
    }

    #[test]
    fn lookup_id_accepts_strings_and_numbers() {
        assert_eq!(
            TestCase::new("get", json!({"id": 1000})).lookup_id().as_deref(),
            Some("1000")
        );
        assert_eq!(
            TestCase::new("get", json!({"id": "abc"})).lookup_id().as_deref(),
            Some("abc")
        );
        assert_eq!(TestCase::new("get", json!({"id": null})).lookup_id(), None);
        assert_eq!(TestCase::new("get", json!({})).lookup_id(), None);
    }

    #[test]
    fn pairs_cases_in_payload_order() {
        let payloads = r#"{
            "user_create_2": {"command": "create", "id": 2},
            "user_create_1": {"command": "create", "id": 1},
            "user_get_1": {"id": 1}
        }"#;
        let responses = r#"{
            "user_get_1": {"id": 1, "username": "a"},
            "user_create_1": {"username": "a"},
            "user_create_2": {}
        }"#;

        let set = parse_fixtures(Category::User, payloads, responses).unwrap();
        let names: Vec<_> = set.fixtures.iter().map(|f| f.case.name.as_str()).collect();

        assert_eq!(names, ["user_create_2", "user_create_1", "user_get_1"]);
        assert_eq!(set.fixtures[1].expected, Some(json!({"username": "a"})));
        assert_eq!(set.fixtures[0].expected, Some(json!({})));
    }

    #[test]
    fn responses_without_payload_are_ignored() {
        let payloads = r#"{"product_create_1": {"command": "create", "name": "pen"}}"#;
        let responses = r#"{
            "product_retired_9": {"name": "old"},
            "product_create_1": {"name": "pen"},
            "product_get_7": {"id": 7}
        }"#;

        let set = parse_fixtures(Category::Product, payloads, responses).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.fixtures[0].case.name, "product_create_1");
        assert_eq!(set.fixtures[0].expected, Some(json!({"name": "pen"})));
    }

    #[test]
    fn missing_expected_response_is_none() {
        let set = parse_fixtures(Category::Order, r#"{"order_1": {}}"#, "{}").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.fixtures[0].expected, None);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = parse_fixtures(Category::User, "[1, 2]", "{}").unwrap_err();
        match err {
            CoreError::InvalidFixtureFile { path, reason } => {
                assert_eq!(path, PathBuf::from("user_testcases.json"));
                assert!(reason.contains("an array"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_fixtures(Category::User, "{}", "{not json").unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }));
    }

    #[test]
    fn load_category_reads_both_directories() {
        let payloads = TempDir::new().unwrap();
        let responses = TempDir::new().unwrap();
        std::fs::write(
            payloads.path().join("product_testcases.json"),
            r#"{"product_get_1": {"id": 7}}"#,
        )
        .unwrap();
        std::fs::write(
            responses.path().join("product_responses.json"),
            r#"{"product_get_1": {"id": 7, "name": "widget"}}"#,
        )
        .unwrap();

        let set = load_category(payloads.path(), responses.path(), Category::Product).unwrap();

        assert_eq!(set.category, Category::Product);
        assert_eq!(set.fixtures[0].case.lookup_id().as_deref(), Some("7"));
        assert_eq!(
            set.fixtures[0].expected,
            Some(json!({"id": 7, "name": "widget"}))
        );
    }

    #[test]
    fn load_category_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_category(dir.path(), dir.path(), Category::Order).unwrap_err();
        match err {
            CoreError::Io { path, .. } => {
                assert!(path.ends_with("order_testcases.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
