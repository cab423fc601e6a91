use proptest::prelude::*;
use xmldict::output::xml::{AttributeValues, Parameters};
use xmldict::proptest::arb_node;
use xmldict::{parse, parse_with, serialize_xml_string, Mapping, Node, ParseParameters};

fn escaped() -> Parameters {
    Parameters {
        escape_text: true,
        attribute_values: AttributeValues::Escape,
        ..Default::default()
    }
}

// the element names of the top-level output, in order
fn top_level_names(xml: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut rest = xml;
    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];
        let end = rest.find('>').unwrap();
        let tag = &rest[..end];
        if tag.starts_with('/') {
            depth -= 1;
        } else {
            if depth == 0 {
                names.push(tag.split(' ').next().unwrap().to_string());
            }
            depth += 1;
        }
        rest = &rest[end + 1..];
    }
    names
}

proptest! {
    #[test]
    fn serialize_then_parse(node in arb_node()) {
        let xml = serialize_xml_string(escaped(), &node).unwrap();
        prop_assert_eq!(parse(&xml).unwrap(), node);
    }

    #[test]
    fn deterministic(node in arb_node()) {
        let first = serialize_xml_string(escaped(), &node).unwrap();
        let second = serialize_xml_string(escaped(), &node.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn text_keys_sorted(entries in prop::collection::vec(("[a-z]{1,6}", "[a-z0-9]{1,6}"), 0..8)) {
        let mapping: Mapping = entries.iter().cloned().collect();
        let xml = serialize_xml_string(Parameters::default(), &Node::from(mapping.clone())).unwrap();
        let mut keys = mapping.iter().map(|(k, _)| k.to_string()).collect::<Vec<_>>();
        keys.sort();
        prop_assert_eq!(top_level_names(&xml), keys);
    }

    #[test]
    fn sequence_items_in_order(items in prop::collection::vec("[a-z0-9]{1,6}", 1..8)) {
        let node = Node::from(Mapping::new().with("K", items.clone()));
        let xml = serialize_xml_string(Parameters::default(), &node).unwrap();
        let expected = items.iter().map(|item| format!("<K>{}</K>", item)).collect::<String>();
        prop_assert_eq!(xml, expected);
    }

    #[test]
    fn list_node_sequences_any_length(items in prop::collection::vec("[a-z0-9]{1,6}", 1..6)) {
        let node = Node::from(Mapping::new().with(
            "Items",
            Mapping::new().with("ItemId", items),
        ));
        let xml = serialize_xml_string(Parameters::default(), &node).unwrap();
        let parameters = ParseParameters::list_nodes(["items.itemid"]);
        prop_assert_eq!(parse_with(&xml, &parameters).unwrap(), node);
    }
}
