//! The element tree a node tree is converted into before rendering.
//!
//! Conversion happens once: all classification, attribute extraction and
//! scalar encoding is done while building the [`Fragment`]. Rendering a
//! fragment can't fail except for I/O.
use indextree::{Arena, NodeId};

use crate::attributes::Attribute;
use crate::classify::Classifier;
use crate::error::Error;
use crate::node::Node;
use crate::output::xml::Parameters;
use crate::output::{gen_outputs, Output};
use crate::path::Path;

/// An element in a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Element {
            name: name.into(),
            attributes,
        }
    }

    /// The element name, including any prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attributes, ordered by name.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    Element(Element),
    // already encoded
    Text(String),
}

/// An ordered XML fragment: zero or more top-level elements, or a single
/// top-level text.
#[derive(Debug, Default)]
pub struct Fragment {
    pub(crate) arena: Arena<Item>,
    pub(crate) roots: Vec<NodeId>,
}

impl Fragment {
    /// Convert a node tree into a fragment.
    pub fn from_node(node: &Node, parameters: &Parameters) -> Result<Self, Error> {
        let mut fragment = Fragment::default();
        fragment.push_node(node, parameters)?;
        tracing::debug!(
            roots = fragment.roots.len(),
            nodes = fragment.arena.count(),
            "built fragment"
        );
        Ok(fragment)
    }

    /// Classify a node tree and add its top-level content after the
    /// existing content.
    pub(crate) fn push_node(&mut self, node: &Node, parameters: &Parameters) -> Result<(), Error> {
        let roots = Classifier::new(&mut self.arena, parameters).top(node)?;
        self.roots.extend(roots);
        Ok(())
    }

    /// Add the elements for a single key with its value after the existing
    /// content.
    pub(crate) fn push_entry(
        &mut self,
        key: &str,
        value: &Node,
        parameters: &Parameters,
    ) -> Result<(), Error> {
        let roots = Classifier::new(&mut self.arena, parameters).entry(key, value, &Path::root())?;
        self.roots.extend(roots);
        Ok(())
    }

    /// Add an element with children in the given order after the existing
    /// content.
    pub(crate) fn push_ordered(
        &mut self,
        name: &str,
        entries: &[(String, Node)],
        parameters: &Parameters,
    ) -> Result<(), Error> {
        let root =
            Classifier::new(&mut self.arena, parameters).ordered(name, entries, &Path::root())?;
        self.roots.push(root);
        Ok(())
    }

    /// Whether the fragment produces no output at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Move all top-level content into a new root element.
    pub fn wrap(&mut self, name: impl Into<String>, mut attributes: Vec<Attribute>) -> Result<(), Error> {
        attributes.sort_by(|a, b| a.name.cmp(&b.name));
        let root = self
            .arena
            .new_node(Item::Element(Element::new(name, attributes)));
        for child in self.roots.drain(..) {
            root.checked_append(child, &mut self.arena)?;
        }
        self.roots.push(root);
        Ok(())
    }

    /// The output tokens of this fragment, in document order.
    ///
    /// You can use these for customized rendering.
    pub fn outputs(&self) -> impl Iterator<Item = Output<'_>> + '_ {
        gen_outputs(self).map(|(_, output)| output)
    }

    pub(crate) fn item(&self, node_id: NodeId) -> &Item {
        self.arena[node_id].get()
    }

    pub(crate) fn has_element_child(&self, node_id: NodeId) -> bool {
        node_id
            .children(&self.arena)
            .any(|child| matches!(self.item(child), Item::Element(_)))
    }

    pub(crate) fn has_children(&self, node_id: NodeId) -> bool {
        self.arena[node_id].first_child().is_some()
    }
}
