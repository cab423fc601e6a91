#![forbid(unsafe_code)]

//! Serialize trees of mappings, sequences and scalars into XML fragments.
//!
//! Mapping keys become element names, emitted in ascending lexical order.
//! A sequence under a key becomes one element per item, in order. Scalars
//! become text. Two reserved keys give a mapping element semantics:
//! `@attrs` holds the attributes of the element and `#text` its text.
//!
//! ```rust
//! use xmldict::{serialize, Mapping, Node};
//!
//! let node = Node::from(Mapping::new().with(
//!     "parent",
//!     Mapping::new().with(
//!         "child",
//!         Mapping::new()
//!             .with("#text", 222)
//!             .with("@attrs", Mapping::new().with("site", "US").with("id", 1234)),
//!     ),
//! ));
//! assert_eq!(
//!     serialize(&node, false).unwrap(),
//!     r#"<parent><child id="1234" site="US">222</child></parent>"#
//! );
//! ```
//!
//! The output is a fragment: there is no XML declaration and no root
//! element is added. Use [`Envelope`] to wrap a fragment into a document.
//! [`parse`] goes the other way, turning XML back into a [`Node`] tree.

mod attributes;
mod classify;
mod encoding;
mod entity;
mod envelope;
mod error;
mod fragment;
mod node;
pub mod output;
mod parse;
mod path;
#[cfg(feature = "proptest")]
pub mod proptest;
mod scalar;
#[cfg(feature = "serde")]
mod serde_support;

use std::io;

pub use attributes::{extract, Attribute, Extracted};
pub use envelope::{Credentials, Envelope};
pub use error::Error;
pub use fragment::{Element, Fragment};
pub use node::{Mapping, Node, Scalar, ATTRS_KEY, TEXT_KEY};
pub use parse::{parse, parse_bytes, parse_bytes_with, parse_with, ParseParameters};
pub use path::{Path, Segment};
pub use scalar::ScalarEncoder;

use output::xml::Parameters;
use output::{gen_outputs, NoopNormalizer, Normalizer, XmlSerializer};

/// Serialize a node tree to an XML fragment.
///
/// With `escape_text`, `& < > ' "` in element text are replaced by entity
/// references, except for text that starts with `<![CDATA[`. Attribute
/// values are never escaped.
///
/// An empty node gives an empty string. On error no output is produced.
pub fn serialize(node: &Node, escape_text: bool) -> Result<String, Error> {
    serialize_xml_string(Parameters::escaped(escape_text), node)
}

/// Serialize a node tree to an XML fragment string, with parameters.
pub fn serialize_xml_string(parameters: Parameters, node: &Node) -> Result<String, Error> {
    serialize_xml_string_with_normalizer(parameters, node, NoopNormalizer)
}

/// Serialize a node tree to an XML fragment string, normalizing text and
/// attribute values.
pub fn serialize_xml_string_with_normalizer<N: Normalizer>(
    parameters: Parameters,
    node: &Node,
    normalizer: N,
) -> Result<String, Error> {
    let mut buf = Vec::new();
    serialize_xml_write_with_normalizer(parameters, node, &mut buf, normalizer)?;
    // input is str and output is str, so this can't fail
    Ok(String::from_utf8(buf).unwrap())
}

/// Serialize a node tree as an XML fragment to a writer.
///
/// The node tree is fully classified before anything is written, so a
/// classification error leaves the writer untouched.
pub fn serialize_xml_write(
    parameters: Parameters,
    node: &Node,
    w: &mut impl io::Write,
) -> Result<(), Error> {
    serialize_xml_write_with_normalizer(parameters, node, w, NoopNormalizer)
}

/// Serialize a node tree as an XML fragment to a writer, normalizing text
/// and attribute values.
pub fn serialize_xml_write_with_normalizer<N: Normalizer>(
    parameters: Parameters,
    node: &Node,
    w: &mut impl io::Write,
    normalizer: N,
) -> Result<(), Error> {
    let fragment = Fragment::from_node(node, &parameters)?;
    write_fragment(&fragment, &parameters, w, normalizer)
}

pub(crate) fn write_fragment<N: Normalizer>(
    fragment: &Fragment,
    parameters: &Parameters,
    w: &mut impl io::Write,
    normalizer: N,
) -> Result<(), Error> {
    let mut serializer = XmlSerializer::new(fragment, normalizer);
    let outputs = gen_outputs(fragment);
    if let Some(indentation) = &parameters.indentation {
        serializer.serialize_pretty(w, outputs, &indentation.suppress)
    } else {
        serializer.serialize(w, outputs)
    }
}
