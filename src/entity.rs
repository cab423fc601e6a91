use std::borrow::Cow;

use crate::error::Error;

const CDATA_START: &str = "<![CDATA[";

pub(crate) fn parse_predefined_entities(content: Cow<'_, str>) -> Result<Cow<'_, str>, Error> {
    if !content.contains('&') {
        return Ok(content);
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            let mut entity = String::new();
            let mut is_complete = false;
            for c in chars.by_ref() {
                if c == ';' {
                    is_complete = true;
                    break;
                }
                entity.push(c);
            }
            if !is_complete {
                return Err(Error::UnclosedEntity(entity));
            }
            let c = match entity.as_str() {
                "amp" => '&',
                "apos" => '\'',
                "gt" => '>',
                "lt" => '<',
                "quot" => '"',
                _ => parse_char_reference(&entity)?,
            };
            result.push(c);
        } else {
            result.push(c);
        }
    }
    Ok(result.into())
}

fn parse_char_reference(entity: &str) -> Result<char, Error> {
    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidEntity(entity.to_string()))
}

fn predefined_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '\'' => Some("&apos;"),
        '>' => Some("&gt;"),
        '<' => Some("&lt;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

pub(crate) fn serialize_predefined_entities(content: Cow<'_, str>) -> Cow<'_, str> {
    escape_with(content, predefined_entity)
}

// whitespace other than space would be normalized away by a conforming
// parser, so it goes out as character references
fn attribute_entity(c: char) -> Option<&'static str> {
    match c {
        '\t' => Some("&#9;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => predefined_entity(c),
    }
}

/// Escape an attribute value for use between double quotes.
pub(crate) fn serialize_attribute_value(content: Cow<'_, str>) -> Cow<'_, str> {
    escape_with(content, attribute_entity)
}

fn escape_with(content: Cow<'_, str>, entity: fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !content.chars().any(|c| entity(c).is_some()) {
        return content;
    }
    let mut result = String::with_capacity(content.len() + 8);
    for c in content.chars() {
        match entity(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    result.into()
}

/// Escape element text, leaving text that opens a CDATA section untouched.
pub(crate) fn serialize_text(content: Cow<'_, str>) -> Cow<'_, str> {
    if content.starts_with(CDATA_START) {
        content
    } else {
        serialize_predefined_entities(content)
    }
}

/// Whether an attribute value would break out of its double quotes or
/// contain markup.
pub(crate) fn needs_attribute_escape(content: &str) -> bool {
    content.contains(['"', '&', '<'])
}
