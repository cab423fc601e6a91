//! Turning XML back into a node tree.
//!
//! This is the inverse of serialization, using the same conventions: child
//! elements become mapping keys, repeated siblings become a sequence,
//! attributes go under `@attrs` and the text of an element with attributes
//! under `#text`.
use ahash::HashSet;
use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::encoding::decode;
use crate::entity::parse_predefined_entities;
use crate::error::Error;
use crate::node::{Mapping, Node, ATTRS_KEY, TEXT_KEY};
use crate::path::Path;

/// Parse an XML fragment into a node tree.
///
/// A leading XML declaration and byte order mark are skipped, as are
/// comments and processing instructions.
///
/// ```rust
/// use xmldict::{parse, Mapping, Node};
///
/// let node = parse("<Items><ItemId>1234</ItemId><ItemId>2222</ItemId></Items>").unwrap();
/// assert_eq!(
///     node,
///     Node::from(Mapping::new().with("Items", Mapping::new().with("ItemId", vec!["1234", "2222"])))
/// );
/// ```
pub fn parse(xml: &str) -> Result<Node, Error> {
    parse_with(xml, &ParseParameters::default())
}

/// Parameters for reading XML into a node tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseParameters {
    /// Elements that always become a [`Node::Sequence`], even when they
    /// occur only once.
    ///
    /// Each entry is the dotted path of element names from the top-level
    /// element down, compared case-insensitively, e.g.
    /// `getitemresponse.item.paymentmethods`.
    pub list_nodes: HashSet<String>,
}

impl ParseParameters {
    /// Parameters with the given list node paths.
    pub fn list_nodes<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParseParameters {
            list_nodes: paths
                .into_iter()
                .map(|path| path.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn is_list(&self, dotted: &str) -> bool {
        self.list_nodes.contains(dotted)
    }
}

/// Parse an XML fragment into a node tree, with parameters.
///
/// ```rust
/// use xmldict::{parse_with, Mapping, Node, ParseParameters};
///
/// let parameters = ParseParameters::list_nodes(["items.itemid"]);
/// let node = parse_with("<Items><ItemId>1234</ItemId></Items>", &parameters).unwrap();
/// assert_eq!(
///     node,
///     Node::from(Mapping::new().with("Items", Mapping::new().with("ItemId", vec!["1234"])))
/// );
/// ```
pub fn parse_with(xml: &str, parameters: &ParseParameters) -> Result<Node, Error> {
    let xml = skip_declaration(xml.trim_start_matches('\u{feff}'));
    let mut builder = Builder::new(parameters);
    for token in Tokenizer::from_fragment(xml, 0..xml.len()) {
        builder.token(token?)?;
    }
    let node = builder.finish()?;
    tracing::debug!(kind = node.kind(), "parsed fragment");
    Ok(node)
}

/// Parse XML bytes into a node tree.
///
/// The encoding is detected from the byte order mark or the XML
/// declaration, defaulting to UTF-8.
pub fn parse_bytes(xml: &[u8]) -> Result<Node, Error> {
    parse_bytes_with(xml, &ParseParameters::default())
}

/// Parse XML bytes into a node tree, with parameters.
pub fn parse_bytes_with(xml: &[u8], parameters: &ParseParameters) -> Result<Node, Error> {
    parse_with(&decode(xml)?, parameters)
}

fn skip_declaration(xml: &str) -> &str {
    let trimmed = xml.trim_start();
    if trimmed.starts_with("<?xml ") || trimmed.starts_with("<?xml?") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    xml
}

#[derive(Debug, Default)]
struct Frame {
    name: String,
    attributes: Mapping,
    text: String,
    children: Vec<Child>,
}

#[derive(Debug)]
struct Child {
    name: String,
    node: Node,
    list: bool,
}

impl Frame {
    fn new(name: String) -> Self {
        Frame {
            name,
            ..Default::default()
        }
    }
}

struct Builder<'p> {
    parameters: &'p ParseParameters,
    // the bottom frame collects the top-level content
    stack: Vec<Frame>,
}

impl<'p> Builder<'p> {
    fn new(parameters: &'p ParseParameters) -> Self {
        Builder {
            parameters,
            stack: vec![Frame::default()],
        }
    }

    fn current(&mut self) -> &mut Frame {
        // the bottom frame is never popped
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn path(&self) -> Path {
        self.stack
            .iter()
            .skip(1)
            .fold(Path::root(), |path, frame| path.key(&frame.name))
    }

    fn token(&mut self, token: Token) -> Result<(), Error> {
        match token {
            Token::ElementStart { prefix, local, .. } => {
                self.stack.push(Frame::new(qualified(prefix, local)));
            }
            Token::Attribute {
                prefix,
                local,
                value,
                ..
            } => {
                let value = parse_predefined_entities(value.as_str().into())?;
                self.current()
                    .attributes
                    .insert(qualified(prefix, local), value.into_owned());
            }
            Token::ElementEnd { end, .. } => match end {
                ElementEnd::Open => {}
                ElementEnd::Empty => self.close()?,
                ElementEnd::Close(prefix, local) => {
                    let found = qualified(prefix, local);
                    let expected = &self.stack[self.stack.len() - 1].name;
                    if self.stack.len() == 1 || *expected != found {
                        return Err(Error::MismatchedEndTag {
                            expected: expected.clone(),
                            found,
                        });
                    }
                    self.close()?
                }
            },
            Token::Text { text } => {
                let text = parse_predefined_entities(text.as_str().into())?;
                self.current().text.push_str(&text);
            }
            Token::Cdata { text, .. } => {
                self.current().text.push_str(text.as_str());
            }
            // declarations, comments, processing instructions and DTD
            // content carry no data
            _ => {}
        }
        Ok(())
    }

    // the names from the top-level element down, lowercased and joined by
    // dots
    fn dotted(&self) -> String {
        self.stack
            .iter()
            .skip(1)
            .map(|frame| frame.name.to_lowercase())
            .collect::<Vec<_>>()
            .join(".")
    }

    fn close(&mut self) -> Result<(), Error> {
        let path = self.path();
        let list =
            !self.parameters.list_nodes.is_empty() && self.parameters.is_list(&self.dotted());
        // close is only called with an open element on the stack
        let frame = self.stack.pop().ok_or(Error::UnclosedElement(String::new()))?;
        let name = frame.name.clone();
        let node = element_node(frame, &path)?;
        self.current().children.push(Child { name, node, list });
        Ok(())
    }

    fn finish(mut self) -> Result<Node, Error> {
        if self.stack.len() > 1 {
            let frame = self.stack.pop().ok_or(Error::UnclosedElement(String::new()))?;
            return Err(Error::UnclosedElement(frame.name));
        }
        let frame = self.current();
        let frame = std::mem::take(frame);
        if frame.children.is_empty() {
            if frame.text.trim().is_empty() {
                return Ok(Node::Empty);
            }
            return Ok(Node::from(frame.text));
        }
        if !frame.text.trim().is_empty() {
            return Err(Error::MixedContent(Path::root()));
        }
        Ok(Node::Mapping(group(frame.children)))
    }
}

fn element_node(frame: Frame, path: &Path) -> Result<Node, Error> {
    let mut mapping = if frame.children.is_empty() {
        if frame.text.is_empty() {
            Mapping::new()
        } else if frame.attributes.is_empty() {
            return Ok(Node::from(frame.text));
        } else {
            Mapping::new().with(TEXT_KEY, frame.text)
        }
    } else {
        // whitespace between child elements is formatting
        if !frame.text.trim().is_empty() {
            return Err(Error::MixedContent(path.clone()));
        }
        group(frame.children)
    };
    if !frame.attributes.is_empty() {
        mapping.insert(ATTRS_KEY, frame.attributes);
    }
    Ok(Node::Mapping(mapping))
}

// repeated names and list nodes become a sequence in document order
fn group(children: Vec<Child>) -> Mapping {
    let mut mapping = Mapping::new();
    for Child { name, node, list } in children {
        match mapping.get_mut(&name) {
            Some(Node::Sequence(items)) => items.push(node),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Node::Sequence(vec![first, node]);
            }
            None if list => {
                mapping.insert(name, Node::Sequence(vec![node]));
            }
            None => {
                mapping.insert(name, node);
            }
        }
    }
    mapping
}

fn qualified(prefix: StrSpan, local: StrSpan) -> String {
    if prefix.as_str().is_empty() {
        local.as_str().to_string()
    } else {
        format!("{}:{}", prefix.as_str(), local.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element() {
        let node = parse("<a>A</a>").unwrap();
        assert_eq!(node, Node::from(Mapping::new().with("a", "A")));
    }

    #[test]
    fn test_group_keeps_order() {
        let node = parse("<a>1</a><b/><a>2</a><a>3</a>").unwrap();
        let mapping = node.as_mapping().unwrap();
        assert_eq!(mapping.get("a"), Some(&Node::from(vec!["1", "2", "3"])));
        assert_eq!(mapping.get("b"), Some(&Node::mapping()));
    }

    #[test]
    fn test_declaration_skipped() {
        let node = parse("<?xml version='1.0' encoding='utf-8'?><a>A</a>").unwrap();
        assert_eq!(node, Node::from(Mapping::new().with("a", "A")));
    }

    #[test]
    fn test_unclosed() {
        let err = parse("<a><b></b>").unwrap_err();
        assert!(matches!(err, Error::UnclosedElement(name) if name == "a"));
    }

    #[test]
    fn test_mismatched() {
        let err = parse("<a></b>").unwrap_err();
        match err {
            Error::MismatchedEndTag { expected, found } => {
                assert_eq!(expected, "a");
                assert_eq!(found, "b");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_mixed_content() {
        let err = parse("<p>Hello <em>world</em></p>").unwrap_err();
        assert!(matches!(err, Error::MixedContent(path) if path.to_string() == "/p"));
    }

    #[test]
    fn test_list_node_single_item() {
        let parameters = ParseParameters::list_nodes(["GetItemResponse.Item.PaymentMethods"]);
        let node = parse_with(
            "<GetItemResponse><Item><PaymentMethods>PayPal</PaymentMethods></Item></GetItemResponse>",
            &parameters,
        )
        .unwrap();
        assert_eq!(
            node,
            Node::from(Mapping::new().with(
                "GetItemResponse",
                Mapping::new().with("Item", Mapping::new().with("PaymentMethods", vec!["PayPal"]))
            ))
        );
    }

    #[test]
    fn test_list_node_only_matches_full_path() {
        let parameters = ParseParameters::list_nodes(["item.paymentmethods"]);
        let node = parse_with(
            "<Other><PaymentMethods>PayPal</PaymentMethods></Other>",
            &parameters,
        )
        .unwrap();
        assert_eq!(
            node,
            Node::from(Mapping::new().with("Other", Mapping::new().with("PaymentMethods", "PayPal")))
        );
    }

    #[test]
    fn test_list_node_repeated() {
        let parameters = ParseParameters::list_nodes(["a"]);
        let node = parse_with("<a>1</a><a>2</a>", &parameters).unwrap();
        assert_eq!(node, Node::from(Mapping::new().with("a", vec!["1", "2"])));
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse("").unwrap(), Node::Empty);
        assert_eq!(parse("  <!-- nothing -->  ").unwrap(), Node::Empty);
    }
}
