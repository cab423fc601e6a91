//! Lifting `@attrs` and `#text` out of a mapping.
use std::borrow::Cow;

use crate::entity::{needs_attribute_escape, serialize_attribute_value};
use crate::error::Error;
use crate::node::{Mapping, Node, ATTRS_KEY, TEXT_KEY};
use crate::output::xml::AttributeValues;
use crate::path::Path;
use crate::scalar::ScalarEncoder;

/// An attribute with its encoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, as given in `@attrs`.
    pub name: String,
    /// Encoded value, without the surrounding quotes.
    pub value: String,
}

impl Attribute {
    /// The attribute rendered as `name="value"`.
    pub fn rendered(&self) -> String {
        format!("{}=\"{}\"", self.name, self.value)
    }
}

/// The result of extracting attributes and text from a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    /// Attributes in ascending order of name.
    pub attributes: Vec<Attribute>,
    /// The `#text` value. `None` means the remaining keys render as child
    /// elements.
    pub text: Option<&'a Node>,
}

impl Extracted<'_> {
    /// The attributes rendered as `name="value"`, in order.
    pub fn rendered(&self) -> Vec<String> {
        self.attributes.iter().map(Attribute::rendered).collect()
    }
}

/// Extract the attributes and text of a mapping.
///
/// The mapping isn't modified. Attribute values are emitted verbatim; use
/// [`serialize_xml_string`](crate::serialize_xml_string) with
/// [`AttributeValues`] to control this.
///
/// ```rust
/// use xmldict::{extract, Mapping, Node};
///
/// let mapping = Mapping::new()
///     .with("@attrs", Mapping::new().with("site", "US").with("id", 1234))
///     .with("#text", 222);
/// let extracted = extract(&mapping).unwrap();
/// assert_eq!(extracted.rendered(), vec![r#"id="1234""#, r#"site="US""#]);
/// assert_eq!(extracted.text, Some(&Node::from(222)));
/// ```
pub fn extract(mapping: &Mapping) -> Result<Extracted<'_>, Error> {
    Extractor::default().extract_at(mapping, &Path::root())
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Extractor {
    encoder: ScalarEncoder,
    attribute_values: AttributeValues,
}

impl Extractor {
    pub(crate) fn new(attribute_values: AttributeValues) -> Self {
        Extractor {
            encoder: ScalarEncoder::default(),
            attribute_values,
        }
    }

    pub(crate) fn extract_at<'a>(
        &self,
        mapping: &'a Mapping,
        path: &Path,
    ) -> Result<Extracted<'a>, Error> {
        let attributes = match mapping.get(ATTRS_KEY) {
            Some(Node::Mapping(attrs)) => self.attributes(attrs, path)?,
            Some(_) => return Err(Error::MalformedAttributes(path.clone())),
            None => Vec::new(),
        };
        Ok(Extracted {
            attributes,
            text: mapping.get(TEXT_KEY),
        })
    }

    fn attributes(&self, attrs: &Mapping, path: &Path) -> Result<Vec<Attribute>, Error> {
        attrs
            .sorted()
            .into_iter()
            .map(|(name, value)| {
                let value = self.encoder.encode_attribute(value, path, name)?;
                let value = self.apply_policy(value, path, name)?;
                Ok(Attribute {
                    name: name.to_string(),
                    value: value.into_owned(),
                })
            })
            .collect()
    }

    fn apply_policy<'a>(
        &self,
        value: Cow<'a, str>,
        path: &Path,
        name: &str,
    ) -> Result<Cow<'a, str>, Error> {
        match self.attribute_values {
            AttributeValues::Verbatim => Ok(value),
            AttributeValues::Escape => Ok(serialize_attribute_value(value)),
            AttributeValues::Reject => {
                if needs_attribute_escape(&value) {
                    Err(Error::UnescapedAttributeValue {
                        path: path.clone(),
                        name: name.to_string(),
                    })
                } else {
                    Ok(value)
                }
            }
        }
    }
}
