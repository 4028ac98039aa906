//! Merge-Tag Template Processor
//!
//! Resolves `{{tag}}` placeholders and `{{#if key}}...{{/if}}` blocks against a
//! [`MergeData`] mapping, then applies the two lightweight markup rules the
//! front-end editor relies on: `**bold**` and line breaks.
//!
//! Conditional blocks are flat. A `{{#if}}` nested inside another block is
//! matched against the first `{{/if}}` that follows it, so nested templates
//! produce unspecified output.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}#/][^{}]*)\}\}").expect("tag pattern is valid"));

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#if\s+(\w+)\}\}(.*?)\{\{/if\}\}").expect("conditional pattern is valid")
});

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

/// Subject and body pair supplied by the front-end
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub body: String,
}

/// A template after merge-tag resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body: String,
}

impl Template {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Render both subject and body against the same data
    pub fn render(&self, data: &MergeData) -> RenderedTemplate {
        RenderedTemplate {
            subject: render(&self.subject, data),
            body: render(&self.body, data),
        }
    }
}

/// Tag name → value mapping used to fill a template
///
/// Values are arbitrary JSON so callers can pass booleans and numbers as
/// conditional flags alongside plain strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeData(Map<String, Value>);

impl MergeData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` is present with a truthy value
    pub fn is_truthy(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(is_truthy)
    }

    /// Overlay `overrides` on top of `self`; overriding keys win
    #[must_use]
    pub fn merged_with(mut self, overrides: Self) -> Self {
        self.0.extend(overrides.0);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for MergeData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MergeData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text substituted for a merge tag; falsy values become empty
pub fn display_value(value: &Value) -> String {
    if !is_truthy(value) {
        return String::new();
    }

    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Render a template string against `data`
///
/// Steps run in a fixed order: merge tags, conditionals, bold, line breaks.
/// Tags whose key is absent from `data` are left as written, and substituted
/// values are never scanned for further tags.
pub fn render(template: &str, data: &MergeData) -> String {
    let output = TAG.replace_all(template, |caps: &Captures<'_>| {
        data.get(&caps[1])
            .map_or_else(|| caps[0].to_owned(), display_value)
    });

    let output = CONDITIONAL.replace_all(&output, |caps: &Captures<'_>| {
        if data.is_truthy(&caps[1]) {
            caps[2].to_owned()
        } else {
            String::new()
        }
    });

    let output = BOLD.replace_all(&output, "<strong>${1}</strong>");

    output.replace("\r\n", "\n").replace('\n', "<br>")
}
