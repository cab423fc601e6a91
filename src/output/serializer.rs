use genawaiter::rc::gen;
use genawaiter::yield_;
use indextree::{NodeEdge, NodeId};

use crate::attributes::Attribute;
use crate::fragment::{Element, Fragment, Item};

/// Output of serialization
///
/// Given an [`OutputToken`] or
/// [`PrettyOutputToken`](`crate::output::PrettyOutputToken`), this enum
/// represents what the token represents in the fragment.
///
/// You can use this information for customized serialization.
#[derive(Debug, PartialEq)]
pub enum Output<'a> {
    /// Start tag open, i.e `<foo` or `<ns:foo`
    StartTagOpen(&'a Element),
    /// Attribute, i.e. `foo="bar"`
    Attribute(&'a Attribute),
    /// Start tag close, always `>`
    StartTagClose(&'a Element),
    /// Text, already encoded
    Text(&'a str),
    /// End tag, i.e. `</foo>` or `</ns:foo>`
    EndTag(&'a Element),
}

pub(crate) fn gen_outputs(
    fragment: &Fragment,
) -> impl Iterator<Item = (NodeId, Output<'_>)> + '_ {
    gen!({
        for root in fragment.roots.iter() {
            for edge in root.traverse(&fragment.arena) {
                match edge {
                    NodeEdge::Start(current_node) => {
                        let gen = gen_edge_start(fragment, current_node);
                        for output in gen {
                            yield_!((current_node, output));
                        }
                    }
                    NodeEdge::End(current_node) => {
                        if let Item::Element(element) = fragment.item(current_node) {
                            yield_!((current_node, Output::EndTag(element)));
                        }
                    }
                }
            }
        }
    })
    .into_iter()
}

fn gen_edge_start(fragment: &Fragment, node: NodeId) -> impl Iterator<Item = Output<'_>> + '_ {
    gen!({
        match fragment.item(node) {
            Item::Element(element) => {
                yield_!(Output::StartTagOpen(element));
                for attribute in element.attributes.iter() {
                    yield_!(Output::Attribute(attribute));
                }
                yield_!(Output::StartTagClose(element));
            }
            Item::Text(text) => {
                yield_!(Output::Text(text));
            }
        }
    })
    .into_iter()
}

/// Output token
///
/// This represents an [`Output`] as a rendered output token.
pub struct OutputToken {
    /// Whether the token is prefixed by a space character.
    pub space: bool,
    /// The token.
    ///
    /// This is a fragment of XML like `<foo` or `a="A"` or `>`, etc.
    pub text: String,
}
