//! Match descriptions printed by the CLI.

use arbor_json::{JsonNodeId, JsonTree};
use arbor_query::{AdapterResult, NodeAdapter};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{Map, Value};

/// One matched node, as shown to the user.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    /// Slash-separated names from the root.
    pub path: String,
    /// The node's name.
    pub name: String,
    /// Leaf text, if any.
    pub content: Option<String>,
    /// Primitive members in document order with their original JSON values.
    pub attributes: Map<String, Value>,
}

impl MatchReport {
    /// Describe `id`. Attribute values keep their JSON type.
    pub fn describe(tree: &JsonTree, id: JsonNodeId) -> AdapterResult<Self> {
        let mut attributes = Map::new();
        for key in tree.attribute_names(&id)? {
            let value = tree
                .attribute_value(id, &key)
                .cloned()
                .unwrap_or(Value::Null);
            let _ = attributes.insert(key, value);
        }
        Ok(Self {
            path: tree.path(id),
            name: tree.name(&id)?.into_owned(),
            content: tree.content(&id)?.map(|c| c.into_owned()),
            attributes,
        })
    }

    /// One line of text output: the path, then content and attributes.
    #[must_use]
    pub fn to_line(&self, color: bool) -> String {
        let mut line = if color {
            self.path.cyan().to_string()
        } else {
            self.path.clone()
        };
        if let Some(content) = &self.content {
            let quoted = format!("{content:?}");
            line.push(' ');
            if color {
                line.push_str(&quoted.green().to_string());
            } else {
                line.push_str(&quoted);
            }
        }
        for (key, value) in &self.attributes {
            let attr = format!("{key}={value}");
            line.push(' ');
            if color {
                line.push_str(&attr.dimmed().to_string());
            } else {
                line.push_str(&attr);
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> JsonTree {
        JsonTree::parse(
            "root",
            r#"{"items": [{"id": 1, "note": null}, "loose"]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_describe_object() {
        let tree = catalog();
        let report = MatchReport::describe(&tree, JsonNodeId(1)).unwrap();
        assert_eq!(report.path, "/root/items");
        assert_eq!(report.name, "items");
        assert_eq!(report.content, None);
        assert_eq!(report.attributes.get("id"), Some(&serde_json::json!(1)));
        assert_eq!(report.attributes.get("note"), Some(&Value::Null));
    }

    #[test]
    fn test_plain_line() {
        let tree = catalog();
        let object = MatchReport::describe(&tree, JsonNodeId(1)).unwrap();
        assert_eq!(object.to_line(false), r#"/root/items id=1 note=null"#);
        let leaf = MatchReport::describe(&tree, JsonNodeId(2)).unwrap();
        assert_eq!(leaf.to_line(false), r#"/root/items "loose""#);
    }

    #[test]
    fn test_json_shape() {
        let tree = catalog();
        let leaf = MatchReport::describe(&tree, JsonNodeId(2)).unwrap();
        let json = serde_json::to_value(&leaf).unwrap();
        assert_eq!(json["content"], "loose");
        assert_eq!(json["attributes"], serde_json::json!({}));

        let object = MatchReport::describe(&tree, JsonNodeId(1)).unwrap();
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["attributes"], serde_json::json!({"id": 1, "note": null}));
    }
}
