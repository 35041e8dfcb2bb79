//! Loosely typed catalog feeds.
//!
//! The catalog service promises nothing beyond "any level may be absent", so
//! the feed is decoded into a small tagged union at this boundary. Items stay
//! raw `serde_json::Value`s; the normalizer picks them apart defensively.

use serde_json::Value;

use crate::error::CatalogError;

/// A home or explore feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub sections: Vec<FeedSection>,
}

/// The section shapes we know about.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSection {
    /// A horizontally scrolling shelf with a header and raw items.
    Carousel(CarouselShelf),
    /// Onboarding shelf with no playable contents.
    TasteBuilder,
    /// Anything that is not an object.
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselShelf {
    pub header_title: Option<String>,
    pub contents: Vec<Value>,
}

impl Feed {
    /// Decode a feed from the catalog's JSON.
    ///
    /// A missing or empty `sections` list is a normal, empty feed. A root that
    /// is not an object, or a `sections` field that is not a list, is
    /// malformed.
    pub fn from_value(value: &Value) -> Result<Self, CatalogError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CatalogError::Malformed(format!("feed root is {}", kind_of(value))))?;

        let sections = match obj.get("sections") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(raw)) => raw.iter().map(FeedSection::from_value).collect(),
            Some(other) => {
                return Err(CatalogError::Malformed(format!(
                    "`sections` is {}",
                    kind_of(other)
                )))
            }
        };

        Ok(Self { sections })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// First carousel whose header title equals `label` exactly.
    pub fn find_carousel(&self, label: &str) -> Option<&CarouselShelf> {
        self.sections.iter().find_map(|s| match s {
            FeedSection::Carousel(shelf) if shelf.header_title.as_deref() == Some(label) => {
                Some(shelf)
            }
            _ => None,
        })
    }
}

impl FeedSection {
    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::Unknown;
        };
        match obj.get("contents") {
            Some(Value::Array(items)) => Self::Carousel(CarouselShelf {
                header_title: header_title(value),
                contents: items.clone(),
            }),
            // `contents` present but unusable: keep the header so lookups
            // still match, with nothing to normalize.
            Some(_) => Self::Carousel(CarouselShelf {
                header_title: header_title(value),
                contents: Vec::new(),
            }),
            None => Self::TasteBuilder,
        }
    }
}

/// `header.title.text`, or `header.title` when it is already a string.
fn header_title(section: &Value) -> Option<String> {
    let title = section.get("header")?.get("title")?;
    match title {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => title.get("text")?.as_str().map(str::to_string),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
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

    #[test]
    fn missing_sections_is_an_empty_feed() {
        let feed = Feed::from_value(&json!({})).unwrap();
        assert!(feed.is_empty());
        let feed = Feed::from_value(&json!({ "sections": null })).unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn non_object_root_is_malformed() {
        assert!(matches!(
            Feed::from_value(&json!([1, 2])),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            Feed::from_value(&json!({ "sections": "nope" })),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn sections_are_classified() {
        let feed = Feed::from_value(&json!({
            "sections": [
                { "header": { "title": { "text": "Quick picks" } }, "contents": [{ "id": "a" }] },
                { "header": { "title": "Plain" }, "contents": [] },
                { "header": { "title": { "text": "Tell us what you like" } } },
                42
            ]
        }))
        .unwrap();

        assert_eq!(feed.sections.len(), 4);
        assert!(matches!(&feed.sections[0], FeedSection::Carousel(s) if s.contents.len() == 1));
        assert!(
            matches!(&feed.sections[1], FeedSection::Carousel(s) if s.header_title.as_deref() == Some("Plain"))
        );
        assert_eq!(feed.sections[2], FeedSection::TasteBuilder);
        assert_eq!(feed.sections[3], FeedSection::Unknown);
    }

    #[test]
    fn lookup_is_exact() {
        let feed = Feed::from_value(&json!({
            "sections": [
                { "header": { "title": { "text": "Quick Picks" } }, "contents": [] },
                { "header": { "title": { "text": "Quick picks" } }, "contents": [{ "id": "x" }] }
            ]
        }))
        .unwrap();

        let shelf = feed.find_carousel("Quick picks").unwrap();
        assert_eq!(shelf.contents.len(), 1);
        assert!(feed.find_carousel("quick picks").is_none());
    }
}
