use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of content characters kept in a link preview.
pub const PREVIEW_CHARS: usize = 97;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub content: String,
}

impl Page {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Page {
        Page {
            url: url.into(),
            content: content.into(),
        }
    }

    /// Link text for this page: the first 97 characters of the content,
    /// always followed by `...`.
    pub fn preview(&self) -> String {
        preview(&self.content)
    }
}

pub fn preview(content: &str) -> String {
    let mut out: String = content.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

/// Opaque token tying a search response to later click reports.
///
/// Any JSON value is accepted as-is; only `null` counts as no id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct SearchQueryId(Value);

impl SearchQueryId {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Whether clicks under this id should be reported: false for `false`,
    /// zero and the empty string, true for everything else.
    pub fn is_trackable(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// Strings are written bare, every other value as its JSON text.
impl fmt::Display for SearchQueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for SearchQueryId {
    fn from(value: &str) -> Self {
        SearchQueryId(Value::String(value.to_string()))
    }
}

impl From<Value> for SearchQueryId {
    fn from(value: Value) -> Self {
        SearchQueryId(value)
    }
}

/// Result pages in the order the response lists them.
///
/// Accepts either a JSON object (keys are discarded, document order kept)
/// or a JSON array.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Pages(pub Vec<Page>);

impl Pages {
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.0.get(index)
    }
}

impl IntoIterator for Pages {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for Pages {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PagesVisitor;

        impl<'de> Visitor<'de> for PagesVisitor {
            type Value = Pages;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map or a list of pages")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Pages, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pages = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((_, page)) = map.next_entry::<IgnoredAny, Page>()? {
                    pages.push(page);
                }
                Ok(Pages(pages))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Pages, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut pages = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(page) = seq.next_element::<Page>()? {
                    pages.push(page);
                }
                Ok(Pages(pages))
            }
        }

        deserializer.deserialize_any(PagesVisitor)
    }
}

#[test]
fn test_preview_always_appends_ellipsis() {
    assert_eq!(preview(""), "...");
    assert_eq!(preview("A"), "A...");

    let exact = "x".repeat(PREVIEW_CHARS);
    assert_eq!(preview(&exact), format!("{exact}..."));

    let long = "y".repeat(PREVIEW_CHARS + 40);
    let out = preview(&long);
    assert_eq!(out, format!("{}...", "y".repeat(PREVIEW_CHARS)));
}

#[test]
fn test_preview_counts_characters_not_bytes() {
    let content = "é".repeat(120);
    let out = preview(&content);
    assert_eq!(out.chars().count(), PREVIEW_CHARS + 3);
    assert!(out.starts_with("éé"));
}
