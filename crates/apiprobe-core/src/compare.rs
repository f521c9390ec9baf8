//! JSON response comparison.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Fields the server is free to assign, which expectations usually omit.
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &["id"];

/// Set of top-level fields dropped from the actual response when the
/// expected response does not mention them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePolicy {
    fields: BTreeSet<String>,
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_FIELDS.iter().copied())
    }
}

impl IgnorePolicy {
    /// Create a policy ignoring the given fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that ignores nothing; responses must match exactly.
    #[must_use]
    pub fn none() -> Self {
        Self {
            fields: BTreeSet::new(),
        }
    }

    /// The ignored field names, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Remove ignored fields from `actual` that `expected` does not contain.
    #[must_use]
    pub fn apply(&self, expected: &Value, actual: Value) -> Value {
        let Value::Object(mut map) = actual else {
            return actual;
        };

        for field in &self.fields {
            let expected_has_field = expected
                .as_object()
                .is_some_and(|e| e.contains_key(field));
            if !expected_has_field {
                map.shift_remove(field);
            }
        }

        Value::Object(map)
    }
}

/// A response body ready for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not JSON; holds the raw text.
    Raw(String),
}

impl ResponseBody {
    /// Whether the body parsed as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// The body as a JSON value. Raw text becomes a JSON string.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Raw(text) => Value::String(text),
        }
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Turn a raw response body into the value used for comparison.
///
/// Empty bodies and a literal `{}` become an empty object. Bodies that are
/// not JSON are kept as [`ResponseBody::Raw`] and never match.
#[must_use]
pub fn normalize_body(text: &str) -> ResponseBody {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return ResponseBody::Json(Value::Object(Map::new()));
    }

    serde_json::from_str(trimmed)
        .map_or_else(|_| ResponseBody::Raw(text.to_string()), ResponseBody::Json)
}

/// One difference between expected and actual responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDiff {
    /// Expected key absent from the actual response.
    Missing {
        /// Key name.
        key: String,
        /// Expected value.
        expected: Value,
    },
    /// Actual key the expected response does not have.
    Unexpected {
        /// Key name.
        key: String,
        /// Actual value.
        actual: Value,
    },
    /// Key present on both sides with different values.
    Changed {
        /// Key name.
        key: String,
        /// Expected value.
        expected: Value,
        /// Actual value.
        actual: Value,
    },
    /// The documents differ and at least one is not an object.
    Root {
        /// Expected document.
        expected: Value,
        /// Actual document.
        actual: Value,
    },
}

/// Result of comparing one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Whether the (filtered) actual response equals the expected one.
    pub matches: bool,
    /// The actual response after the ignore policy was applied.
    pub actual: Value,
    /// Top-level differences; empty when `matches` is true.
    pub differences: Vec<FieldDiff>,
    /// False when the response body was not JSON.
    pub body_is_json: bool,
}

/// Compare an actual response against its expectation.
///
/// A missing expectation compares as JSON `null`, so it never matches an
/// object response. A raw (non-JSON) body never matches, even an expected
/// JSON string with the same text.
#[must_use]
pub fn compare(
    expected: Option<&Value>,
    actual: impl Into<ResponseBody>,
    policy: &IgnorePolicy,
) -> Comparison {
    static NULL: Value = Value::Null;
    let expected = expected.unwrap_or(&NULL);

    let actual = match actual.into() {
        ResponseBody::Json(value) => value,
        ResponseBody::Raw(text) => {
            let actual = Value::String(text);
            return Comparison {
                matches: false,
                differences: vec![FieldDiff::Root {
                    expected: expected.clone(),
                    actual: actual.clone(),
                }],
                actual,
                body_is_json: false,
            };
        }
    };

    let actual = policy.apply(expected, actual);
    let matches = *expected == actual;
    let differences = if matches {
        Vec::new()
    } else {
        diff(expected, &actual)
    };

    Comparison {
        matches,
        actual,
        differences,
        body_is_json: true,
    }
}

fn diff(expected: &Value, actual: &Value) -> Vec<FieldDiff> {
    let (Value::Object(exp), Value::Object(act)) = (expected, actual) else {
        return vec![FieldDiff::Root {
            expected: expected.clone(),
            actual: actual.clone(),
        }];
    };

    let mut out = Vec::new();
    for (key, exp_value) in exp {
        match act.get(key) {
            None => out.push(FieldDiff::Missing {
                key: key.clone(),
                expected: exp_value.clone(),
            }),
            Some(act_value) if act_value != exp_value => out.push(FieldDiff::Changed {
                key: key.clone(),
                expected: exp_value.clone(),
                actual: act_value.clone(),
            }),
            Some(_) => {}
        }
    }
    for (key, act_value) in act {
        if !exp.contains_key(key) {
            out.push(FieldDiff::Unexpected {
                key: key.clone(),
                actual: act_value.clone(),
            });
        }
    }
    out
}
