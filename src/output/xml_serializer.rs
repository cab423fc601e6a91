use std::io;

use indextree::NodeId;

use crate::error::Error;
use crate::fragment::Fragment;
use crate::output::Normalizer;

use super::{Output, OutputToken, Pretty, PrettyOutputToken};

pub(crate) struct XmlSerializer<'a, N: Normalizer> {
    fragment: &'a Fragment,
    normalizer: N,
}

impl<'a, N: Normalizer> XmlSerializer<'a, N> {
    pub(crate) fn new(fragment: &'a Fragment, normalizer: N) -> Self {
        Self {
            fragment,
            normalizer,
        }
    }

    pub(crate) fn serialize<W: io::Write>(
        &mut self,
        w: &mut W,
        outputs: impl Iterator<Item = (NodeId, Output<'a>)>,
    ) -> Result<(), Error> {
        for (_, output) in outputs {
            self.serialize_output(w, &output)?;
        }
        Ok(())
    }

    pub(crate) fn serialize_pretty<W: io::Write>(
        &mut self,
        w: &mut W,
        outputs: impl Iterator<Item = (NodeId, Output<'a>)>,
        suppress: &[String],
    ) -> Result<(), Error> {
        let is_suppressed = |name: &str| suppress.iter().any(|s| s == name);
        let mut pretty = Pretty::new(self.fragment, is_suppressed);
        for (node, output) in outputs {
            let token = self.render_pretty_output(&mut pretty, node, &output);
            if token.indentation > 0 {
                w.write_all(" ".repeat(token.indentation * 2).as_bytes())?;
            }
            if token.space {
                w.write_all(b" ")?;
            }
            w.write_all(token.text.as_bytes())?;
            if token.newline {
                w.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn serialize_output<W: io::Write>(&mut self, w: &mut W, output: &Output<'a>) -> Result<(), Error> {
        let data = self.render_output(output);
        if data.space {
            w.write_all(b" ")?;
        }
        w.write_all(data.text.as_bytes())?;
        Ok(())
    }

    fn render_pretty_output<F: Fn(&str) -> bool>(
        &self,
        pretty: &mut Pretty<'a, F>,
        node: NodeId,
        output: &Output<'a>,
    ) -> PrettyOutputToken {
        let (indentation, newline) = pretty.prettify(node, output);
        let data = self.render_output(output);
        PrettyOutputToken {
            indentation,
            space: data.space,
            text: data.text,
            newline,
        }
    }

    pub(crate) fn render_output(&self, output: &Output<'a>) -> OutputToken {
        use Output::*;
        match output {
            StartTagOpen(element) => OutputToken {
                space: false,
                text: format!("<{}", element.name()),
            },
            Attribute(attribute) => OutputToken {
                space: true,
                text: format!(
                    "{}=\"{}\"",
                    attribute.name,
                    self.normalizer.normalize(attribute.value.as_str().into())
                ),
            },
            // no self-closing tags, not even for empty elements
            StartTagClose(_) => OutputToken {
                space: false,
                text: ">".to_string(),
            },
            Text(text) => OutputToken {
                space: false,
                text: self.normalizer.normalize((*text).into()).into_owned(),
            },
            EndTag(element) => OutputToken {
                space: false,
                text: format!("</{}>", element.name()),
            },
        }
    }
}
