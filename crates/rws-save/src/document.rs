use rws_codec::whitespace::strip_layout;
use rws_codec::{Canonicalize, CodecError};
use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, EmitterConfig, ParseError, XMLNode};

use crate::config::SaveConfig;
use crate::error::SaveError;

/// Parse save text after dropping its layout whitespace.
///
/// Line breaks and tabs are removed before parsing, so text content that
/// was indented in the file comes back without its indentation.
///
/// # Errors
///
/// Returns [`SaveError::Parse`] if the text is not well-formed XML.
pub fn load(text: &str) -> Result<Element, SaveError> {
    let stripped = strip_layout(text);
    Ok(parse_tree(&stripped)?)
}

/// Build an element tree from markup, keeping whitespace-only text.
///
/// A leaf such as `<label> </label>` keeps its `" "` value. Whitespace
/// between sibling elements is layout and is dropped, so the tree has the
/// same shape `Element::parse` would give.
fn parse_tree(markup: &str) -> Result<Element, ParseError> {
    let config = ParserConfig::new()
        .trim_whitespace(false)
        .whitespace_to_characters(true)
        .ignore_comments(false);
    let mut reader = EventReader::new_with_config(markup.as_bytes(), config);
    let mut open: Vec<Element> = Vec::new();

    loop {
        let node = match reader.next().map_err(ParseError::MalformedXml)? {
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let mut element = Element::new(&name.local_name);
                element.prefix = name.prefix;
                element.namespace = name.namespace;
                if !namespace.is_essentially_empty() {
                    element.namespaces = Some(namespace);
                }
                for attribute in attributes {
                    element
                        .attributes
                        .insert(attribute.name.local_name, attribute.value);
                }
                open.push(element);
                continue;
            }
            XmlEvent::EndElement { .. } => {
                let Some(mut element) = open.pop() else {
                    return Err(ParseError::CannotParse);
                };
                drop_layout_text(&mut element);
                if open.is_empty() {
                    return Ok(element);
                }
                XMLNode::Element(element)
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) | XmlEvent::CData(text) => {
                XMLNode::Text(text)
            }
            XmlEvent::Comment(text) => XMLNode::Comment(text),
            XmlEvent::ProcessingInstruction { name, data } => {
                XMLNode::ProcessingInstruction(name, data)
            }
            XmlEvent::StartDocument { .. } => continue,
            XmlEvent::EndDocument => return Err(ParseError::CannotParse),
        };
        // Nodes outside the root element are not part of the tree.
        if let Some(parent) = open.last_mut() {
            parent.children.push(node);
        }
    }
}

/// In an element with child elements, whitespace-only text is indentation.
fn drop_layout_text(element: &mut Element) {
    let has_child = element
        .children
        .iter()
        .any(|node| matches!(node, XMLNode::Element(_)));
    if has_child {
        element.children.retain(|node| match node {
            XMLNode::Text(text) => !text.trim().is_empty(),
            _ => true,
        });
    }
}

/// Serialize a document with an XML declaration and one element per line.
///
/// # Errors
///
/// Returns [`SaveError::Emit`] if the writer fails.
pub fn pretty_print(root: &Element, config: &SaveConfig) -> Result<String, SaveError> {
    let emitter = EmitterConfig::new()
        .perform_indent(true)
        .indent_string(config.indent.clone());
    let mut out = Vec::new();
    root.write_with_config(&mut out, emitter)?;
    Ok(String::from_utf8(out)?)
}

/// Canonical layout for the whitespace codec: parse, then pretty print.
pub struct XmlCanonicalizer<'a> {
    config: &'a SaveConfig,
}

impl<'a> XmlCanonicalizer<'a> {
    pub fn new(config: &'a SaveConfig) -> Self {
        Self { config }
    }
}

impl Canonicalize for XmlCanonicalizer<'_> {
    fn canonicalize(&self, markup: &str) -> Result<String, CodecError> {
        let root = parse_tree(markup).map_err(|e| CodecError::Canonicalize(e.to_string()))?;
        pretty_print(&root, self.config).map_err(|e| CodecError::Canonicalize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAVE: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<savegame>\r\n\t<meta>\r\n\t\t<gameVersion>1.4.3901 rev261</gameVersion>\r\n\t</meta>\r\n</savegame>\r\n";

    #[test]
    fn load_ignores_layout() {
        let root = load(SAVE).unwrap();
        assert_eq!(root.name, "savegame");
        let version = root.get_child("meta").and_then(|m| m.get_child("gameVersion"));
        assert_eq!(
            version.and_then(Element::get_text).as_deref(),
            Some("1.4.3901 rev261")
        );
    }

    #[test]
    fn malformed_save_is_parse_error() {
        assert!(matches!(load("<savegame><meta></savegame>"), Err(SaveError::Parse(_))));
    }

    #[test]
    fn pretty_print_puts_elements_on_lines() {
        let root = load(SAVE).unwrap();
        let text = pretty_print(&root, &SaveConfig::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("<?xml"));
        assert_eq!(lines[1], "<savegame>");
        assert_eq!(lines[2], "  <meta>");
        assert_eq!(lines[3], "    <gameVersion>1.4.3901 rev261</gameVersion>");
        assert_eq!(lines.last(), Some(&"</savegame>"));
    }

    #[test]
    fn whitespace_only_leaf_text_survives() {
        let root = load("<a> <x> </x> <y>1.5</y> </a>").unwrap();
        assert!(root.children.iter().all(|n| matches!(n, XMLNode::Element(_))));
        let x = root.get_child("x").and_then(Element::get_text);
        assert_eq!(x.as_deref(), Some(" "));

        let text = pretty_print(&root, &SaveConfig::default()).unwrap();
        assert!(text.contains("<x> </x>"), "{text}");
    }

    #[test]
    fn canonicalizer_keeps_whitespace_values() {
        let config = SaveConfig::default();
        let canon = XmlCanonicalizer::new(&config);
        let text = canon.canonicalize("<a><x> </x></a>").unwrap();
        assert!(text.contains("<x> </x>"), "{text}");
    }

    #[test]
    fn canonicalizer_reports_bad_markup() {
        let config = SaveConfig::default();
        let canon = XmlCanonicalizer::new(&config);
        assert!(matches!(
            canon.canonicalize("<a><b></a>"),
            Err(CodecError::Canonicalize(_))
        ));
    }
}
