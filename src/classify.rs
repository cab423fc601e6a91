use indextree::{Arena, NodeId};

use crate::attributes::{Attribute, Extractor};
use crate::error::Error;
use crate::fragment::{Element, Item};
use crate::node::{Mapping, Node, ATTRS_KEY, TEXT_KEY};
use crate::output::xml::{MixedContent, Parameters};
use crate::path::Path;
use crate::scalar::ScalarEncoder;

/// Routes each node of the input tree to the element, text or sequence
/// handling and builds the element tree in the arena.
pub(crate) struct Classifier<'a> {
    arena: &'a mut Arena<Item>,
    encoder: ScalarEncoder,
    extractor: Extractor,
    mixed_content: MixedContent,
}

impl<'a> Classifier<'a> {
    pub(crate) fn new(arena: &'a mut Arena<Item>, parameters: &Parameters) -> Self {
        Classifier {
            arena,
            encoder: ScalarEncoder::new(parameters.escape_text),
            extractor: Extractor::new(parameters.attribute_values),
            mixed_content: parameters.mixed_content,
        }
    }

    /// Classify the top-level node, returning the top-level items in order.
    pub(crate) fn top(&mut self, node: &Node) -> Result<Vec<NodeId>, Error> {
        let path = Path::root();
        match node {
            Node::Empty => Ok(Vec::new()),
            Node::Scalar(_) => Ok(self.text(node, &path)?.into_iter().collect()),
            Node::Mapping(mapping) => {
                if mapping.contains_key(ATTRS_KEY) || mapping.contains_key(TEXT_KEY) {
                    tracing::warn!("reserved keys ignored at the top level, there is no enclosing element");
                }
                self.children(mapping, &path)
            }
            Node::Sequence(_) => Err(Error::UnsupportedNodeKind {
                path,
                kind: node.kind(),
            }),
        }
    }

    // one element per non-reserved key, in key order; sequences expand into
    // one element per item
    fn children(&mut self, mapping: &Mapping, path: &Path) -> Result<Vec<NodeId>, Error> {
        let mut ids = Vec::new();
        for (key, value) in mapping.sorted() {
            if key == ATTRS_KEY || key == TEXT_KEY {
                continue;
            }
            ids.extend(self.entry(key, value, path)?);
        }
        Ok(ids)
    }

    /// Classify a single key with its value, as found in a mapping at
    /// `path`.
    pub(crate) fn entry(
        &mut self,
        key: &str,
        value: &Node,
        path: &Path,
    ) -> Result<Vec<NodeId>, Error> {
        let key_path = path.key(key);
        match value {
            Node::Sequence(items) => {
                let mut ids = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = key_path.index(i);
                    if let Node::Sequence(_) = item {
                        return Err(Error::UnsupportedNodeKind {
                            path: item_path,
                            kind: item.kind(),
                        });
                    }
                    ids.push(self.element(key, item, &item_path)?);
                }
                Ok(ids)
            }
            _ => Ok(vec![self.element(key, value, &key_path)?]),
        }
    }

    /// An element whose children keep the order of `entries` instead of
    /// being sorted.
    pub(crate) fn ordered(
        &mut self,
        name: &str,
        entries: &[(String, Node)],
        path: &Path,
    ) -> Result<NodeId, Error> {
        let element_path = path.key(name);
        let mut content = Vec::new();
        for (key, value) in entries {
            content.extend(self.entry(key, value, &element_path)?);
        }
        self.new_element(name, Vec::new(), content)
    }

    fn element(&mut self, name: &str, value: &Node, path: &Path) -> Result<NodeId, Error> {
        match value {
            Node::Mapping(mapping) => {
                let extracted = self.extractor.extract_at(mapping, path)?;
                let content = match extracted.text {
                    Some(text) => {
                        if mapping.has_children() {
                            self.mixed(path)?;
                        }
                        self.text_content(text, &path.key(TEXT_KEY))?
                    }
                    None => self.children(mapping, path)?,
                };
                self.new_element(name, extracted.attributes, content)
            }
            Node::Scalar(_) => {
                let content = self.text(value, path)?.into_iter().collect();
                self.new_element(name, Vec::new(), content)
            }
            Node::Empty => self.new_element(name, Vec::new(), Vec::new()),
            Node::Sequence(_) => Err(Error::UnsupportedNodeKind {
                path: path.clone(),
                kind: value.kind(),
            }),
        }
    }

    // content given by `#text`: a scalar, nothing, or a mapping rendered as
    // children
    fn text_content(&mut self, text: &Node, path: &Path) -> Result<Vec<NodeId>, Error> {
        match text {
            Node::Scalar(_) => Ok(self.text(text, path)?.into_iter().collect()),
            Node::Empty => Ok(Vec::new()),
            Node::Mapping(mapping) => self.children(mapping, path),
            Node::Sequence(_) => Err(Error::UnsupportedNodeKind {
                path: path.clone(),
                kind: text.kind(),
            }),
        }
    }

    fn mixed(&self, path: &Path) -> Result<(), Error> {
        match self.mixed_content {
            MixedContent::DropChildren => {
                tracing::warn!(%path, "child keys next to #text are dropped");
                Ok(())
            }
            MixedContent::Reject => Err(Error::MixedContent(path.clone())),
        }
    }

    // empty text creates no node
    fn text(&mut self, node: &Node, path: &Path) -> Result<Option<NodeId>, Error> {
        let encoded = self.encoder.encode_at(node, false, path)?;
        if encoded.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            self.arena.new_node(Item::Text(encoded.into_owned())),
        ))
    }

    fn new_element(
        &mut self,
        name: &str,
        attributes: Vec<Attribute>,
        content: Vec<NodeId>,
    ) -> Result<NodeId, Error> {
        let element = self
            .arena
            .new_node(Item::Element(Element::new(name, attributes)));
        for child in content {
            element.checked_append(child, self.arena)?;
        }
        Ok(element)
    }
}
