//! XML output method.
//!
//! The main entry point is [`Parameters`], which you can pass into the
//! serialization functions to control the output. The default parameters
//! give compact output with unescaped text and verbatim attribute values.

pub use super::Indentation;

/// Parameters for XML fragment generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    /// Escape `& < > ' "` in element text. Text starting with `<![CDATA[` is
    /// always emitted verbatim.
    pub escape_text: bool,
    /// How attribute values are treated.
    pub attribute_values: AttributeValues,
    /// What happens when `#text` appears next to child keys.
    pub mixed_content: MixedContent,
    /// Pretty-print XML, and a list of elements where this is suppressed.
    pub indentation: Option<Indentation>,
}

impl Parameters {
    /// Parameters with text escaping switched on or off and everything else
    /// at its default.
    pub fn escaped(escape_text: bool) -> Self {
        Parameters {
            escape_text,
            ..Default::default()
        }
    }
}

/// Treatment of attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeValues {
    /// Emit values as they are between the double quotes. Callers that need
    /// escaping have to pre-escape.
    #[default]
    Verbatim,
    /// Escape `& < > ' "` in values. Tab, newline and carriage return are
    /// written as character references so they survive attribute value
    /// normalization.
    Escape,
    /// Fail with
    /// [`Error::UnescapedAttributeValue`](crate::Error::UnescapedAttributeValue)
    /// when a value contains `"`, `&` or `<`.
    Reject,
}

/// Treatment of a mapping that has `#text` as well as child keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixedContent {
    /// Emit the text and drop the child keys, logging a warning.
    #[default]
    DropChildren,
    /// Fail with [`Error::MixedContent`](crate::Error::MixedContent).
    Reject,
}
