use indextree::NodeId;

use crate::fragment::Fragment;
use crate::output::Output;

/// Pretty output token
///
/// Like [`OutputToken`](`crate::output::OutputToken`) but with extra information for
/// pretty printing.
pub struct PrettyOutputToken {
    /// indentation level.
    pub indentation: usize,
    /// Whether the token is prefixed by a space character.
    pub space: bool,
    /// The token
    ///
    /// This is a fragment of XML like `"<p"`, `a="A"` or `"</p>"`.
    pub text: String,
    /// Whether the token is suffixed by a newline character.
    pub newline: bool,
}

// We are either in a block element (only element children) where we can
// indent, or in an inline element (text content, or suppressed) in which case
// we don't do any indentation anymore, including for its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
    Block,
    Inline,
}

pub(crate) struct Pretty<'a, IsSuppressed>
where
    IsSuppressed: Fn(&str) -> bool,
{
    fragment: &'a Fragment,
    is_suppressed: IsSuppressed,
    stack: Vec<StackEntry>,
}

impl<'a, IsSuppressed> Pretty<'a, IsSuppressed>
where
    IsSuppressed: Fn(&str) -> bool,
{
    pub(crate) fn new(fragment: &'a Fragment, is_suppressed: IsSuppressed) -> Self {
        Pretty {
            fragment,
            is_suppressed,
            stack: Vec::new(),
        }
    }

    fn in_inline(&self) -> bool {
        self.stack.iter().any(|e| *e == StackEntry::Inline)
    }

    fn get_indentation(&self) -> usize {
        if self.in_inline() {
            0
        } else {
            self.stack.len()
        }
    }

    fn get_newline(&self) -> bool {
        !self.in_inline()
    }

    pub(crate) fn prettify(&mut self, node: NodeId, output_token: &Output) -> (usize, bool) {
        use Output::*;
        match output_token {
            StartTagOpen(_) => (self.get_indentation(), false),
            StartTagClose(element) => {
                if !self.fragment.has_children(node) {
                    return (0, false);
                }
                let block = self.fragment.has_element_child(node)
                    && !(self.is_suppressed)(element.name());
                if block {
                    self.stack.push(StackEntry::Block);
                    (0, self.get_newline())
                } else {
                    self.stack.push(StackEntry::Inline);
                    (0, false)
                }
            }
            EndTag(_) => {
                let indentation = if self.fragment.has_children(node) {
                    let no_indentation = self.in_inline();
                    self.stack.pop();
                    if !no_indentation {
                        self.get_indentation()
                    } else {
                        0
                    }
                } else {
                    0
                };
                (indentation, self.get_newline())
            }
            Attribute(_) | Text(_) => (0, false),
        }
    }
}
