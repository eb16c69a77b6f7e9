//! Sidebar file shape as written by authors, before composition.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Named sidebars in declaration order.
#[derive(Debug)]
pub(crate) struct RawSidebars(pub Vec<(String, Vec<RawItem>)>);

impl<'de> Deserialize<'de> for RawSidebars {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = RawSidebars;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of named sidebars")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut sidebars = Vec::with_capacity(map.size_hint().unwrap_or(1));
                while let Some((name, items)) = map.next_entry::<String, Vec<RawItem>>()? {
                    sidebars.push((name, items));
                }
                Ok(RawSidebars(sidebars))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// A sidebar entry: a bare document id or a table tagged by `type`.
#[derive(Debug)]
pub(crate) enum RawItem {
    Id(String),
    Doc(RawDoc),
    Category(RawCategory),
    Link(RawLink),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawDoc {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawCategory {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default = "default_collapsed")]
    pub collapsed: bool,
    /// Document opened by clicking the category header.
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawLink {
    #[serde(default)]
    pub label: String,
    pub href: String,
}

fn default_collapsed() -> bool {
    true
}

impl<'de> Deserialize<'de> for RawItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut table = match Value::deserialize(deserializer)? {
            Value::String(id) => return Ok(Self::Id(id)),
            Value::Object(table) => table,
            other => {
                return Err(de::Error::custom(format!(
                    "sidebar item must be a document id or a table, found `{other}`"
                )));
            }
        };

        let entry = describe(&table);
        let kind = match table.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "sidebar item {entry} has a non-string `type`: `{other}`"
                )));
            }
            None => {
                return Err(de::Error::custom(format!(
                    "sidebar item {entry} is missing `type` (doc, category or link)"
                )));
            }
        };

        let table = Value::Object(table);
        let invalid = |e: serde_json::Error| -> D::Error {
            de::Error::custom(format!("invalid {kind} item {entry}: {e}"))
        };
        match kind.as_str() {
            "doc" => serde_json::from_value(table).map(Self::Doc).map_err(invalid),
            "category" => serde_json::from_value(table)
                .map(Self::Category)
                .map_err(invalid),
            "link" => serde_json::from_value(table).map(Self::Link).map_err(invalid),
            _ => Err(de::Error::custom(format!(
                "unknown type `{kind}` for sidebar item {entry}, expected doc, category or link"
            ))),
        }
    }
}

/// Name an entry for error messages by its label, id or href.
fn describe(table: &Map<String, Value>) -> String {
    ["label", "id", "href"]
        .iter()
        .find_map(|key| table.get(*key).and_then(Value::as_str))
        .map_or_else(|| "(no label or id)".to_owned(), |name| format!("`{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(json: &str) -> Result<Vec<RawItem>, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_bare_id_and_tagged_items() {
        let items = parse_json(
            r#"["index", {"type": "doc", "id": "tools/web/zap", "label": "OWASP ZAP"},
                {"type": "category", "label": "Cloud", "items": ["tools/cloud/prowler"]},
                {"type": "link", "label": "Source", "href": "https://example.com"}]"#,
        )
        .unwrap();

        assert!(matches!(&items[0], RawItem::Id(id) if id == "index"));
        assert!(matches!(&items[1], RawItem::Doc(RawDoc { label: Some(l), .. }) if l == "OWASP ZAP"));
        let RawItem::Category(cloud) = &items[2] else {
            panic!("expected category, got {:?}", items[2]);
        };
        assert!(cloud.collapsed);
        assert_eq!(cloud.items.len(), 1);
        assert!(matches!(&items[3], RawItem::Link(link) if link.href == "https://example.com"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse_json(r#"[{"type": "doc", "id": "index", "lable": "Home"}]"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid doc item `index`"), "{msg}");
        assert!(msg.contains("unknown field `lable`"), "{msg}");
    }

    #[test]
    fn test_unknown_type_names_entry() {
        let err = parse_json(r#"[{"type": "categroy", "label": "Tools", "items": ["x"]}]"#)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown type `categroy`"), "{msg}");
        assert!(msg.contains("`Tools`"), "{msg}");
    }

    #[test]
    fn test_nested_error_names_parent_category() {
        let err = parse_json(
            r#"[{"type": "category", "label": "Tools",
                 "items": [{"type": "doc", "id": "tools/cloud/prowler", "collapsed": false}]}]"#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid category item `Tools`"), "{msg}");
        assert!(msg.contains("invalid doc item `tools/cloud/prowler`"), "{msg}");
        assert!(msg.contains("unknown field `collapsed`"), "{msg}");
    }

    #[test]
    fn test_missing_type() {
        let err = parse_json(r#"[{"id": "index"}]"#).unwrap_err();
        assert!(err.to_string().contains("`index` is missing `type`"));
    }

    #[test]
    fn test_non_table_item() {
        let err = parse_json("[42]").unwrap_err();
        assert!(err.to_string().contains("must be a document id or a table"));
    }
}
