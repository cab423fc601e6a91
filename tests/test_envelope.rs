use xmldict::output::xml::{AttributeValues, Indentation, Parameters};
use xmldict::{Credentials, Envelope, Error, Mapping, Node};

fn body() -> Node {
    Node::from(
        Mapping::new()
            .with("ItemID", "110")
            .with("DetailLevel", "ReturnAll"),
    )
}

#[test]
fn test_request_document() {
    let xml = Envelope::new("GetItemRequest")
        .namespace("urn:ebay:apis:eBLBaseComponents")
        .declaration(true)
        .serialize(Parameters::default(), &body())
        .unwrap();
    assert_eq!(
        xml,
        concat!(
            "<?xml version='1.0' encoding='utf-8'?>",
            r#"<GetItemRequest xmlns="urn:ebay:apis:eBLBaseComponents">"#,
            "<DetailLevel>ReturnAll</DetailLevel><ItemID>110</ItemID>",
            "</GetItemRequest>"
        )
    );
}

#[test]
fn test_pretty_request_document() {
    let parameters = Parameters {
        indentation: Some(Indentation::default()),
        ..Default::default()
    };
    let xml = Envelope::new("GetItemRequest")
        .declaration(true)
        .serialize(parameters, &body())
        .unwrap();
    assert_eq!(
        xml,
        concat!(
            "<?xml version='1.0' encoding='utf-8'?>\n",
            "<GetItemRequest>\n",
            "  <DetailLevel>ReturnAll</DetailLevel>\n",
            "  <ItemID>110</ItemID>\n",
            "</GetItemRequest>\n"
        )
    );
}

#[test]
fn test_root_attribute_policy() {
    let parameters = Parameters {
        attribute_values: AttributeValues::Reject,
        ..Default::default()
    };
    let err = Envelope::new("doc")
        .attribute("title", "a & b")
        .serialize(parameters, &body())
        .unwrap_err();
    match err {
        Error::UnescapedAttributeValue { path, name } => {
            assert_eq!(path.to_string(), "/doc");
            assert_eq!(name, "title");
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_body_error_writes_nothing() {
    let mut buf = Vec::new();
    let body = Node::from(vec!["not", "a", "mapping"]);
    let result = Envelope::new("doc")
        .declaration(true)
        .write(Parameters::default(), &body, &mut buf);
    assert!(result.is_err());
    assert!(buf.is_empty());
}

#[test]
fn test_token_credentials_before_body() {
    let xml = Envelope::new("GetItemRequest")
        .namespace("urn:ebay:apis:eBLBaseComponents")
        .declaration(true)
        .credentials(Credentials::token("AgAAAA"))
        .serialize(Parameters::default(), &body())
        .unwrap();
    assert_eq!(
        xml,
        concat!(
            "<?xml version='1.0' encoding='utf-8'?>",
            r#"<GetItemRequest xmlns="urn:ebay:apis:eBLBaseComponents">"#,
            "<RequesterCredentials><eBayAuthToken>AgAAAA</eBayAuthToken></RequesterCredentials>",
            "<DetailLevel>ReturnAll</DetailLevel><ItemID>110</ItemID>",
            "</GetItemRequest>"
        )
    );
}

#[test]
fn test_user_credentials_keep_order() {
    let xml = Envelope::new("GetItemRequest")
        .namespace("urn:ebay:apis:eBLBaseComponents")
        .declaration(true)
        .credentials(Credentials::user("seller", Some("hunter2".to_string())))
        .serialize(Parameters::default(), &body())
        .unwrap();
    assert_eq!(
        xml,
        concat!(
            "<?xml version='1.0' encoding='utf-8'?>",
            r#"<GetItemRequest xmlns="urn:ebay:apis:eBLBaseComponents">"#,
            "<RequesterCredentials><Username>seller</Username><Password>hunter2</Password></RequesterCredentials>",
            "<DetailLevel>ReturnAll</DetailLevel><ItemID>110</ItemID>",
            "</GetItemRequest>"
        )
    );
}

#[test]
fn test_pretty_credentials() {
    let parameters = Parameters {
        indentation: Some(Indentation::default()),
        ..Default::default()
    };
    let xml = Envelope::new("GetItemRequest")
        .credentials(Credentials::token("AgAAAA"))
        .header("ErrorLanguage", "en_US")
        .serialize(parameters, &body())
        .unwrap();
    assert_eq!(
        xml,
        concat!(
            "<GetItemRequest>\n",
            "  <RequesterCredentials>\n",
            "    <eBayAuthToken>AgAAAA</eBayAuthToken>\n",
            "  </RequesterCredentials>\n",
            "  <ErrorLanguage>en_US</ErrorLanguage>\n",
            "  <DetailLevel>ReturnAll</DetailLevel>\n",
            "  <ItemID>110</ItemID>\n",
            "</GetItemRequest>\n"
        )
    );
}

#[test]
fn test_header_error_writes_nothing() {
    let mut buf = Vec::new();
    let result = Envelope::new("doc")
        .header("Bad", f64::INFINITY)
        .write(Parameters::default(), &body(), &mut buf);
    match result {
        Err(Error::UnsupportedScalar(path)) => assert_eq!(path.to_string(), "/Bad"),
        _ => unreachable!(),
    }
    assert!(buf.is_empty());
}
