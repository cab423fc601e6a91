//! Canonical text forms of scalar values.
//!
//! All forms are locale independent:
//!
//! - booleans render as `true` and `false`,
//! - integers as plain decimal digits,
//! - floats as the shortest decimal that round trips, never in exponent
//!   notation, with integral values keeping a trailing `.0`,
//! - text as is.
//!
//! NaN and infinities have no canonical form and are rejected.
use std::borrow::Cow;

use crate::entity::serialize_text;
use crate::error::Error;
use crate::node::{Node, Scalar};
use crate::path::Path;

/// Turns scalars into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScalarEncoder {
    /// Apply entity escaping to element text. Text that starts with
    /// `<![CDATA[` is never escaped.
    pub escape_text: bool,
}

impl ScalarEncoder {
    /// Create an encoder.
    pub fn new(escape_text: bool) -> Self {
        Self { escape_text }
    }

    /// Encode a scalar node.
    ///
    /// Attribute values (`as_attribute` true) are stringified but never
    /// escaped as element text. Anything but a scalar fails with
    /// [`Error::UnsupportedScalar`].
    pub fn encode<'a>(&self, node: &'a Node, as_attribute: bool) -> Result<Cow<'a, str>, Error> {
        self.encode_at(node, as_attribute, &Path::root())
    }

    pub(crate) fn encode_at<'a>(
        &self,
        node: &'a Node,
        as_attribute: bool,
        path: &Path,
    ) -> Result<Cow<'a, str>, Error> {
        let scalar = node
            .as_scalar()
            .ok_or_else(|| Error::UnsupportedScalar(path.clone()))?;
        let text = canonical(scalar).ok_or_else(|| Error::UnsupportedScalar(path.clone()))?;
        if !as_attribute && self.escape_text {
            Ok(serialize_text(text))
        } else {
            Ok(text)
        }
    }

    /// Encode an attribute value. Empty nodes give an empty value.
    pub(crate) fn encode_attribute<'a>(
        &self,
        node: &'a Node,
        path: &Path,
        name: &str,
    ) -> Result<Cow<'a, str>, Error> {
        let unserializable = || Error::UnserializableAttribute {
            path: path.clone(),
            name: name.to_string(),
        };
        match node {
            Node::Empty => Ok(Cow::Borrowed("")),
            Node::Scalar(scalar) => canonical(scalar).ok_or_else(unserializable),
            Node::Sequence(_) | Node::Mapping(_) => Err(unserializable()),
        }
    }
}

/// The canonical text of a scalar, or `None` if it has none.
pub(crate) fn canonical(scalar: &Scalar) -> Option<Cow<'_, str>> {
    match scalar {
        Scalar::Bool(true) => Some(Cow::Borrowed("true")),
        Scalar::Bool(false) => Some(Cow::Borrowed("false")),
        Scalar::Int(i) => Some(Cow::Owned(i.to_string())),
        Scalar::UInt(i) => Some(Cow::Owned(i.to_string())),
        Scalar::Float(f) => canonical_float(*f).map(Cow::Owned),
        Scalar::Text(text) => Some(Cow::Borrowed(text)),
    }
}

fn canonical_float(f: f64) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    // Display never uses exponent notation
    let s = f.to_string();
    if s.contains('.') {
        Some(s)
    } else {
        Some(format!("{}.0", s))
    }
}
