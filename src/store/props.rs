use std::collections::BTreeMap;

use serde_json::{json, Value};

/// Typed value of a single row property, mirroring the hosted store's
/// property kinds. Anything the store returns that is not listed here is
/// dropped on read.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(String),
    RichText(String),
    Number(Option<f64>),
    Select(Option<String>),
    MultiSelect(Vec<String>),
    Checkbox(bool),
    Relation(Vec<String>),
}

pub type Properties = BTreeMap<String, PropertyValue>;

/// A row as returned by the store: its id plus whatever properties it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub properties: Properties,
}

impl Row {
    pub fn new(id: impl Into<String>, properties: Properties) -> Self {
        Self {
            id: id.into(),
            properties,
        }
    }

    /// Numeric property, `None` when missing, null or of another kind.
    pub fn opt_number(&self, name: &str) -> Option<f64> {
        match self.properties.get(name) {
            Some(PropertyValue::Number(n)) => *n,
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> f64 {
        self.opt_number(name).unwrap_or(0.0)
    }

    /// Title or rich text content; empty when missing.
    pub fn text(&self, name: &str) -> String {
        match self.properties.get(name) {
            Some(PropertyValue::Title(s)) | Some(PropertyValue::RichText(s)) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn opt_text(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|s| !s.is_empty())
    }

    pub fn select(&self, name: &str) -> Option<String> {
        match self.properties.get(name) {
            Some(PropertyValue::Select(s)) => s.clone().filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    pub fn tags(&self, name: &str) -> Vec<String> {
        match self.properties.get(name) {
            Some(PropertyValue::MultiSelect(tags)) => tags.clone(),
            _ => Vec::new(),
        }
    }

    pub fn checkbox(&self, name: &str) -> bool {
        matches!(self.properties.get(name), Some(PropertyValue::Checkbox(true)))
    }

    pub fn relation(&self, name: &str) -> Vec<String> {
        match self.properties.get(name) {
            Some(PropertyValue::Relation(ids)) => ids.clone(),
            _ => Vec::new(),
        }
    }
}

impl PropertyValue {
    /// Parses a property object in the store's read shape
    /// (`{"type": "number", "number": 12}` and friends).
    pub fn from_store(value: &Value) -> Option<Self> {
        let kind = value.get("type")?.as_str()?;
        let body = value.get(kind)?;
        let parsed = match kind {
            "title" => Self::Title(plain_text(body)),
            "rich_text" => Self::RichText(plain_text(body)),
            "number" => Self::Number(body.as_f64()),
            "select" => Self::Select(option_name(body)),
            "multi_select" => Self::MultiSelect(
                body.as_array()
                    .map(|opts| opts.iter().filter_map(option_name).collect())
                    .unwrap_or_default(),
            ),
            "checkbox" => Self::Checkbox(body.as_bool().unwrap_or(false)),
            "relation" => Self::Relation(
                body.as_array()
                    .map(|ids| {
                        ids.iter()
                            .filter_map(|r| r.get("id").and_then(Value::as_str))
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            _ => return None,
        };
        Some(parsed)
    }

    /// Renders the property in the store's write shape.
    pub fn to_store(&self) -> Value {
        match self {
            Self::Title(s) => json!({ "title": rich_text_body(s) }),
            Self::RichText(s) => json!({ "rich_text": rich_text_body(s) }),
            Self::Number(n) => json!({ "number": n }),
            Self::Select(Some(name)) => json!({ "select": { "name": name } }),
            Self::Select(None) => json!({ "select": Value::Null }),
            Self::MultiSelect(tags) => json!({
                "multi_select": tags.iter().map(|t| json!({ "name": t })).collect::<Vec<_>>()
            }),
            Self::Checkbox(b) => json!({ "checkbox": b }),
            Self::Relation(ids) => json!({
                "relation": ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>()
            }),
        }
    }
}

/// A relation property the store returned only the first page of
/// (`"has_more": true`). Its full id list lives behind the page's
/// property-item endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedRelation {
    pub name: String,
    pub property_id: String,
}

/// Relations of a page's `properties` object that were cut short.
pub fn truncated_relations(value: &Value) -> Vec<TruncatedRelation> {
    let Some(props) = value.as_object() else {
        return Vec::new();
    };
    props
        .iter()
        .filter(|(_, v)| {
            v.get("type").and_then(Value::as_str) == Some("relation")
                && v.get("has_more").and_then(Value::as_bool).unwrap_or(false)
        })
        .map(|(name, v)| TruncatedRelation {
            name: name.clone(),
            property_id: v
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or(name)
                .to_string(),
        })
        .collect()
}

/// Related page ids from one page of a property-item list
/// (`{"object": "list", "results": [{"type": "relation", "relation": {"id": ..}}]}`).
pub fn relation_item_ids(list: &Value) -> Vec<String> {
    list.get("results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("relation")?.get("id")?.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parses the `properties` object of a page.
pub fn properties_from_store(value: &Value) -> Properties {
    value
        .as_object()
        .map(|props| {
            props
                .iter()
                .filter_map(|(name, v)| PropertyValue::from_store(v).map(|p| (name.clone(), p)))
                .collect()
        })
        .unwrap_or_default()
}

pub fn properties_to_store(props: &Properties) -> Value {
    Value::Object(
        props
            .iter()
            .map(|(name, v)| (name.clone(), v.to_store()))
            .collect(),
    )
}

fn plain_text(body: &Value) -> String {
    body.as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| {
                    p.get("plain_text")
                        .or_else(|| p.get("text").and_then(|t| t.get("content")))
                        .and_then(Value::as_str)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn option_name(body: &Value) -> Option<String> {
    body.get("name").and_then(Value::as_str).map(str::to_string)
}

fn rich_text_body(s: &str) -> Value {
    if s.is_empty() {
        return json!([]);
    }
    json!([{ "text": { "content": s } }])
}
