//! The document model returned to callers.
//!
//! Every construct normalizes to a [`Node`]: a `parameters` mapping of
//! tag-derived and structural flags, and an ordered `body` of strings and
//! child nodes. The model is decoupled from the grammar's parse-tree shape
//! and is the sole artifact downstream renderers consume. Serialization
//! matches the JSON those renderers expect: nodes as
//! `{"parameters": {…}, "body": […]}`, parameter values and body entries
//! untagged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A parameter value: a flag, a count (e.g. heading level), or a tag's
/// quoted value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// The parameter mapping attached to a node. Later tags overwrite earlier
/// ones on key collision.
pub type Parameters = HashMap<String, Value>;

/// One entry in a node's body: a text run or a child node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Text(String),
    Node(Node),
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Item::Text(text.to_string())
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Item::Text(text)
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Item::Node(node)
    }
}

/// A normalized document node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub parameters: Parameters,
    pub body: Vec<Item>,
}

/// A parsed document together with the tags from its first line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaggedDocument {
    pub tags: Vec<String>,
    pub body: Vec<Node>,
}
