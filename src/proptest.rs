//! Proptest support for node trees
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. This module helps you write a proptest by letting you
//! generate arbitrary node trees.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! xmldict = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! The generated trees only use shapes that survive a trip through
//! [`serialize`](crate::serialize) and [`parse`](crate::parse) unchanged,
//! provided text and attribute values are escaped: all scalars are
//! non-empty text, sequences have at least two items and there is no text
//! next to child elements. A single-item sequence only reads back as a
//! sequence when its path is one of the
//! list nodes in [`ParseParameters`](crate::ParseParameters).
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use proptest::prelude::*;

use crate::node::{Mapping, Node, ATTRS_KEY, TEXT_KEY};

const ELEMENT_NAMES: &[&str] = &["a", "b", "c", "d", "e", "ns:f"];
const ATTRIBUTE_NAMES: &[&str] = &["q", "r", "s", "xml:lang"];
const TEXT: &str = "[a-z0-9 &<>'\"]{1,8}";
const ATTRIBUTE_VALUE: &str = "[a-z0-9 &<>'\"\t\n]{0,8}";

fn arb_attributes() -> impl Strategy<Value = Mapping> {
    prop::collection::vec(
        (prop::sample::select(ATTRIBUTE_NAMES), ATTRIBUTE_VALUE),
        1..3,
    )
    .prop_map(|attributes| attributes.into_iter().collect())
}

fn arb_leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        TEXT.prop_map(Node::from),
        Just(Node::mapping()),
        (arb_attributes(), prop::option::of(TEXT)).prop_map(|(attributes, text)| {
            let mut mapping = Mapping::new().with(ATTRS_KEY, attributes);
            if let Some(text) = text {
                mapping.insert(TEXT_KEY, text);
            }
            Node::Mapping(mapping)
        }),
    ]
}

fn arb_children(inner: BoxedStrategy<Node>) -> impl Strategy<Value = Mapping> {
    prop::collection::vec(
        (
            prop::sample::select(ELEMENT_NAMES),
            prop_oneof![
                inner.clone(),
                prop::collection::vec(inner, 2..4).prop_map(Node::Sequence),
            ],
        ),
        1..4,
    )
    .prop_map(|children| children.into_iter().collect())
}

/// The value under a key: text, an empty element, an element with
/// attributes and optional text, or an element with children and optional
/// attributes.
pub fn arb_element_value() -> impl Strategy<Value = Node> {
    arb_leaf().prop_recursive(
        4,  // levels deep
        64, // maximum size of 64 nodes
        4,  // up to 4 items per collection
        |inner| {
            (arb_children(inner), prop::option::of(arb_attributes())).prop_map(
                |(mut children, attributes)| {
                    if let Some(attributes) = attributes {
                        children.insert(ATTRS_KEY, attributes);
                    }
                    Node::Mapping(children)
                },
            )
        },
    )
}

/// A top-level mapping of one or more elements.
pub fn arb_node() -> impl Strategy<Value = Node> {
    arb_children(arb_element_value().boxed()).prop_map(Node::Mapping)
}
