use std::fmt;

use crate::path::Path;

/// Errors from serializing or parsing.
#[derive(Debug)]
pub enum Error {
    /// A node is of a kind that can't appear at its position, such as a
    /// sequence at the top level or directly inside another sequence.
    UnsupportedNodeKind { path: Path, kind: &'static str },
    /// `@attrs` is present but isn't a mapping.
    MalformedAttributes(Path),
    /// A scalar value can't be stringified.
    UnsupportedScalar(Path),
    /// An attribute value can't be stringified.
    UnserializableAttribute { path: Path, name: String },
    /// An attribute value needs escaping and
    /// [`AttributeValues::Reject`](crate::output::xml::AttributeValues::Reject)
    /// is in effect.
    UnescapedAttributeValue { path: Path, name: String },
    /// An element has both text and child elements.
    MixedContent(Path),
    /// An entity reference is missing its closing `;`.
    UnclosedEntity(String),
    /// An entity or character reference is unknown.
    InvalidEntity(String),
    /// An end tag doesn't match the open element.
    MismatchedEndTag { expected: String, found: String },
    /// The input ended while an element was still open.
    UnclosedElement(String),
    /// The encoding of the input couldn't be determined or decoded.
    UnsupportedEncoding,
    /// Writing the output failed.
    Io(std::io::Error),
    /// The XML tokenizer failed.
    Parser(xmlparser::Error),
    /// The element tree couldn't be restructured.
    Tree(indextree::NodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedNodeKind { path, kind } => {
                write!(f, "unsupported node kind at {}: {}", path, kind)
            }
            Error::MalformedAttributes(path) => {
                write!(f, "malformed attributes at {}: @attrs must be a mapping", path)
            }
            Error::UnsupportedScalar(path) => write!(f, "unsupported scalar at {}", path),
            Error::UnserializableAttribute { path, name } => {
                write!(f, "unserializable attribute {} at {}", name, path)
            }
            Error::UnescapedAttributeValue { path, name } => {
                write!(f, "attribute {} at {} needs escaping", name, path)
            }
            Error::MixedContent(path) => {
                write!(f, "mixed text and child elements at {}", path)
            }
            Error::UnclosedEntity(entity) => write!(f, "unclosed entity: {}", entity),
            Error::InvalidEntity(entity) => write!(f, "invalid entity: {}", entity),
            Error::MismatchedEndTag { expected, found } => {
                write!(f, "expected end tag {}, found {}", expected, found)
            }
            Error::UnclosedElement(name) => write!(f, "unclosed element: {}", name),
            Error::UnsupportedEncoding => write!(f, "unsupported encoding"),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Parser(e) => write!(f, "parser error: {}", e),
            Error::Tree(e) => write!(f, "tree error: {:?}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parser(e) => Some(e),
            _ => None,
        }
    }
}

impl From<xmlparser::Error> for Error {
    #[inline]
    fn from(e: xmlparser::Error) -> Self {
        Error::Parser(e)
    }
}

impl From<indextree::NodeError> for Error {
    #[inline]
    fn from(e: indextree::NodeError) -> Self {
        Error::Tree(e)
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl Error {
    /// The location in the input tree this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::UnsupportedNodeKind { path, .. }
            | Error::MalformedAttributes(path)
            | Error::UnsupportedScalar(path)
            | Error::UnserializableAttribute { path, .. }
            | Error::UnescapedAttributeValue { path, .. }
            | Error::MixedContent(path) => Some(path),
            _ => None,
        }
    }
}
