use ahash::HashMap;

/// The reserved key holding the attributes of an element.
pub const ATTRS_KEY: &str = "@attrs";
/// The reserved key holding the text content of an element.
pub const TEXT_KEY: &str = "#text";

/// A node in the input tree.
///
/// A tree of nodes is what gets serialized into an XML fragment. Mapping keys
/// become element names, sequences become repeated sibling elements and
/// scalars become text content.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// No value. Produces no output.
    #[default]
    Empty,
    /// A leaf value.
    Scalar(Scalar),
    /// Repeated siblings sharing the key of the enclosing mapping.
    Sequence(Vec<Node>),
    /// Keyed children.
    Mapping(Mapping),
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A boolean, rendered as `true` or `false`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// Text, rendered as is.
    Text(String),
}

impl Node {
    /// Create an empty mapping node.
    pub fn mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    /// A short description of the kind of node, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Empty => "empty",
            Node::Scalar(scalar) => scalar.kind(),
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Whether this node is [`Node::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Access the mapping if this node is one.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Access the scalar if this node is one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Access the text if this node is a text scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::Text(text)) => Some(text),
            _ => None,
        }
    }
}

impl Scalar {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Int(_) | Scalar::UInt(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }
}

/// Keyed children of a node.
///
/// The iteration order of a mapping is unspecified. Use [`Mapping::sorted`]
/// to get the entries in the order they are serialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping(HashMap<String, Node>);

impl Mapping {
    /// Create a new empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder variant of [`Mapping::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value under `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Get a mutable reference to the value under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Remove the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.0.remove(key)
    }

    /// Whether there is a value under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The entries in ascending lexical order of their keys.
    pub fn sorted(&self) -> Vec<(&str, &Node)> {
        let mut entries = self.iter().collect::<Vec<_>>();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// Whether this mapping has any key other than the reserved ones.
    pub(crate) fn has_children(&self) -> bool {
        self.0.keys().any(|k| k != ATTRS_KEY && k != TEXT_KEY)
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Node);
    type IntoIter = std::collections::hash_map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Mapping> for Node {
    fn from(mapping: Mapping) -> Self {
        Node::Mapping(mapping)
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::Text(s))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node::Scalar(Scalar::Int(i.into()))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Scalar(Scalar::Int(i))
    }
}

impl From<u32> for Node {
    fn from(i: u32) -> Self {
        Node::Scalar(Scalar::UInt(i.into()))
    }
}

impl From<u64> for Node {
    fn from(i: u64) -> Self {
        Node::Scalar(Scalar::UInt(i))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Scalar(Scalar::Float(f))
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted() {
        let mapping = Mapping::new().with("b", "B").with("a", "A").with("C", "c");
        let keys = mapping.sorted().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["C", "a", "b"]);
    }

    #[test]
    fn test_has_children() {
        let mapping = Mapping::new()
            .with(ATTRS_KEY, Mapping::new())
            .with(TEXT_KEY, "t");
        assert!(!mapping.has_children());
        assert!(mapping.with("@other", "x").has_children());
    }

    #[test]
    fn test_option_none_is_empty() {
        let node: Node = Option::<&str>::None.into();
        assert!(node.is_empty());
        assert_eq!(node.kind(), "empty");
    }

    #[test]
    fn test_from_iterator() {
        let mapping: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(mapping.get("b"), Some(&Node::Scalar(Scalar::Int(2))));
        assert_eq!(mapping.len(), 2);
    }
}
