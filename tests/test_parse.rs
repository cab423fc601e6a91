use xmldict::output::xml::{AttributeValues, Parameters};
use xmldict::{
    parse, parse_bytes, parse_bytes_with, parse_with, serialize, serialize_xml_string, Envelope,
    Error, Mapping, Node, ParseParameters,
};

#[test]
fn test_parse_attributes_and_text() {
    let node = parse(r#"<parent><child id="1234" site="US">222</child></parent>"#).unwrap();
    let expected = Node::from(Mapping::new().with(
        "parent",
        Mapping::new().with(
            "child",
            Mapping::new()
                .with("@attrs", Mapping::new().with("id", "1234").with("site", "US"))
                .with("#text", "222"),
        ),
    ));
    assert_eq!(node, expected);
}

#[test]
fn test_parse_attributes_only() {
    let node = parse(r#"<child site="US"/>"#).unwrap();
    assert_eq!(
        node,
        Node::from(Mapping::new().with(
            "child",
            Mapping::new().with("@attrs", Mapping::new().with("site", "US"))
        ))
    );
}

#[test]
fn test_parse_entities_and_cdata() {
    let node = parse(r#"<a q="&quot;x&quot;">1 &lt; 2</a><b><![CDATA[<raw>]]></b>"#).unwrap();
    let mapping = node.as_mapping().unwrap();
    let a = mapping.get("a").unwrap().as_mapping().unwrap();
    assert_eq!(a.get("#text").unwrap().as_text(), Some("1 < 2"));
    assert_eq!(
        a.get("@attrs").unwrap().as_mapping().unwrap().get("q"),
        Some(&Node::from("\"x\""))
    );
    assert_eq!(mapping.get("b").unwrap().as_text(), Some("<raw>"));
}

#[test]
fn test_parse_whitespace_between_elements() {
    let node = parse("<a>\n  <b>1</b>\n  <c>2</c>\n</a>\n").unwrap();
    assert_eq!(
        node,
        Node::from(Mapping::new().with("a", Mapping::new().with("b", "1").with("c", "2")))
    );
}

#[test]
fn test_parse_top_level_text() {
    assert_eq!(parse("just text").unwrap(), Node::from("just text"));
}

#[test]
fn test_parse_mixed_top_level() {
    let err = parse("text<a/>").unwrap_err();
    assert!(matches!(err, Error::MixedContent(path) if path.is_root()));
}

#[test]
fn test_parse_invalid_entity() {
    let err = parse("<a>&nbsp;</a>").unwrap_err();
    assert!(matches!(err, Error::InvalidEntity(entity) if entity == "nbsp"));
}

#[test]
fn test_parse_tokenizer_error() {
    let err = parse("<a><</a>").unwrap_err();
    assert!(matches!(err, Error::Parser(_)));
}

#[test]
fn test_parse_bytes_latin1() {
    let mut data = b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><Title>Caf".to_vec();
    data.push(0xe9);
    data.extend_from_slice(b"</Title>");
    let node = parse_bytes(&data).unwrap();
    assert_eq!(
        node,
        Node::from(Mapping::new().with("Title", "Caf\u{e9}"))
    );
}

#[test]
fn test_serialized_request_parses_back() {
    let node = Node::from(
        Mapping::new()
            .with(
                "paginationInput",
                Mapping::new().with("pageNumber", "1").with("pageSize", "25"),
            )
            .with("sortOrder", "Price & Shipping")
            .with(
                "searchFilter",
                Mapping::new().with(
                    "categoryId",
                    Mapping::new()
                        .with("#text", "222")
                        .with("@attrs", Mapping::new().with("site", "US \"main\"")),
                ),
            ),
    );
    let parameters = Parameters {
        escape_text: true,
        attribute_values: AttributeValues::Escape,
        ..Default::default()
    };
    let xml = serialize_xml_string(parameters, &node).unwrap();
    assert_eq!(parse(&xml).unwrap(), node);
}

#[test]
fn test_envelope_parses_back() {
    let body = Node::from(Mapping::new().with("ItemID", "1"));
    let xml = Envelope::new("GetItemRequest")
        .namespace("urn:ebay:apis:eBLBaseComponents")
        .declaration(true)
        .serialize(Parameters::default(), &body)
        .unwrap();
    let node = parse(&xml).unwrap();
    let request = node
        .as_mapping()
        .unwrap()
        .get("GetItemRequest")
        .unwrap()
        .as_mapping()
        .unwrap();
    assert_eq!(request.get("ItemID"), Some(&Node::from("1")));
    assert_eq!(
        request.get("@attrs"),
        Some(&Node::from(
            Mapping::new().with("xmlns", "urn:ebay:apis:eBLBaseComponents")
        ))
    );
}

#[test]
fn test_single_item_sequence_needs_list_node() {
    let node = Node::from(Mapping::new().with(
        "Items",
        Mapping::new().with("ItemId", vec!["1234"]),
    ));
    let xml = serialize(&node, false).unwrap();
    assert_eq!(xml, "<Items><ItemId>1234</ItemId></Items>");

    // without a list node the single item reads back as text
    assert_eq!(
        parse(&xml).unwrap(),
        Node::from(Mapping::new().with("Items", Mapping::new().with("ItemId", "1234")))
    );

    let parameters = ParseParameters::list_nodes(["items.itemid"]);
    assert_eq!(parse_with(&xml, &parameters).unwrap(), node);
}

#[test]
fn test_list_node_case_insensitive() {
    let parameters = ParseParameters::list_nodes(["GetMyMessagesResponse.AbstractRequest.DetailLevel"]);
    let node = parse_bytes_with(
        b"<GetMyMessagesResponse><AbstractRequest><DetailLevel>ReturnAll</DetailLevel></AbstractRequest></GetMyMessagesResponse>",
        &parameters,
    )
    .unwrap();
    let detail_level = node
        .as_mapping()
        .unwrap()
        .get("GetMyMessagesResponse")
        .unwrap()
        .as_mapping()
        .unwrap()
        .get("AbstractRequest")
        .unwrap()
        .as_mapping()
        .unwrap()
        .get("DetailLevel");
    assert_eq!(detail_level, Some(&Node::from(vec!["ReturnAll"])));
}

#[test]
fn test_list_node_with_attributes() {
    let node = Node::from(Mapping::new().with(
        "Fees",
        Mapping::new().with(
            "Fee",
            vec![Mapping::new()
                .with("@attrs", Mapping::new().with("currencyID", "USD"))
                .with("#text", "0.35")],
        ),
    ));
    let xml = serialize(&node, false).unwrap();
    let parameters = ParseParameters::list_nodes(["fees.fee"]);
    assert_eq!(parse_with(&xml, &parameters).unwrap(), node);
}
