use std::io;

use crate::attributes::Extractor;
use crate::error::Error;
use crate::fragment::Fragment;
use crate::node::{Mapping, Node, ATTRS_KEY};
use crate::output::xml::Parameters;
use crate::output::NoopNormalizer;
use crate::path::Path;
use crate::write_fragment;

const DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";
const REQUESTER_CREDENTIALS: &str = "RequesterCredentials";

/// Credentials rendered as a `<RequesterCredentials>` block at the start of
/// a request document.
///
/// Requests authorized through an IAF token in the HTTP headers carry no
/// credentials block; leave them unset on the [`Envelope`] then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// An auth token, rendered as `<eBayAuthToken>`.
    Token(String),
    /// A user name, rendered as `<Username>`, followed by an optional
    /// `<Password>`.
    User {
        /// The user name.
        username: String,
        /// The password, if any.
        password: Option<String>,
    },
}

impl Credentials {
    /// Token credentials.
    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token(token.into())
    }

    /// User name credentials with an optional password.
    pub fn user(username: impl Into<String>, password: Option<String>) -> Self {
        Credentials::User {
            username: username.into(),
            password,
        }
    }

    fn entries(&self) -> Vec<(String, Node)> {
        match self {
            Credentials::Token(token) => {
                vec![("eBayAuthToken".to_string(), Node::from(token.as_str()))]
            }
            Credentials::User { username, password } => {
                let mut entries = vec![("Username".to_string(), Node::from(username.as_str()))];
                if let Some(password) = password {
                    entries.push(("Password".to_string(), Node::from(password.as_str())));
                }
                entries
            }
        }
    }
}

/// Wraps a fragment into a request document.
///
/// The serialized node tree becomes the content of a root element, with
/// optional attributes on the root and an optional XML declaration in front.
/// Credentials and header entries come before the body, in the order they
/// were added; only the body is sorted by key.
///
/// ```rust
/// use xmldict::{Envelope, Mapping, Node};
/// use xmldict::output::xml::Parameters;
///
/// let envelope = Envelope::new("GetItemRequest")
///     .namespace("urn:ebay:apis:eBLBaseComponents")
///     .declaration(true);
/// let node = Node::from(Mapping::new().with("ItemID", "1234"));
/// assert_eq!(
///     envelope.serialize(Parameters::default(), &node).unwrap(),
///     concat!(
///         "<?xml version='1.0' encoding='utf-8'?>",
///         r#"<GetItemRequest xmlns="urn:ebay:apis:eBLBaseComponents">"#,
///         "<ItemID>1234</ItemID>",
///         "</GetItemRequest>"
///     )
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    root: String,
    attributes: Mapping,
    declaration: bool,
    credentials: Option<Credentials>,
    header: Vec<(String, Node)>,
}

impl Envelope {
    /// An envelope with the given root element name, without attributes or
    /// declaration.
    pub fn new(root: impl Into<String>) -> Self {
        Envelope {
            root: root.into(),
            attributes: Mapping::new(),
            declaration: false,
            credentials: None,
            header: Vec::new(),
        }
    }

    /// Declare the default namespace on the root element.
    pub fn namespace(self, uri: impl Into<String>) -> Self {
        self.attribute("xmlns", uri.into())
    }

    /// Add an attribute to the root element.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Start the content with a `<RequesterCredentials>` block.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add an entry rendered before the body. Entries keep the order in
    /// which they are added; a value is serialized like any value under a
    /// key.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.header.push((key.into(), value.into()));
        self
    }

    /// Whether to start the document with an XML declaration.
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Serialize a node tree into an enveloped document string.
    pub fn serialize(&self, parameters: Parameters, node: &Node) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.write(parameters, node, &mut buf)?;
        // input is str and output is str, so this can't fail
        Ok(String::from_utf8(buf).unwrap())
    }

    /// Serialize a node tree into an enveloped document, written to `w`.
    pub fn write(
        &self,
        parameters: Parameters,
        node: &Node,
        w: &mut impl io::Write,
    ) -> Result<(), Error> {
        let fragment = self.fragment(&parameters, node)?;
        if self.declaration {
            w.write_all(DECLARATION.as_bytes())?;
            if parameters.indentation.is_some() {
                w.write_all(b"\n")?;
            }
        }
        write_fragment(&fragment, &parameters, w, NoopNormalizer)
    }

    fn fragment(&self, parameters: &Parameters, node: &Node) -> Result<Fragment, Error> {
        let mut fragment = Fragment::default();
        if let Some(credentials) = &self.credentials {
            fragment.push_ordered(REQUESTER_CREDENTIALS, &credentials.entries(), parameters)?;
        }
        for (key, value) in &self.header {
            fragment.push_entry(key, value, parameters)?;
        }
        fragment.push_node(node, parameters)?;
        let root_attributes = Mapping::new().with(ATTRS_KEY, self.attributes.clone());
        let extracted = Extractor::new(parameters.attribute_values)
            .extract_at(&root_attributes, &Path::root().key(&self.root))?;
        fragment.wrap(self.root.as_str(), extracted.attributes)?;
        Ok(fragment)
    }
}
