use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

/// Display text plus optional target pulled out of an embedded `<a href>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Scalar(String),
    Link(Link),
}

impl Field {
    /// Scalar value, or the display text of a link.
    pub fn text(&self) -> &str {
        match self {
            Field::Scalar(value) => value,
            Field::Link(link) => &link.text,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Field::Link(link) => Some(link),
            Field::Scalar(_) => None,
        }
    }
}

pub type Section = BTreeMap<String, Node>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Field(Field),
    Section(Section),
    List(Vec<Node>),
}

impl Node {
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Node::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Node::Section(section) => Some(section),
            _ => None,
        }
    }
}

/// Parses a statistics document into a tree keyed by the document element's
/// children. Bodies that are not well-formed XML produce an empty tree.
///
/// Leaf text is kept exactly as written. Attributes are only kept on elements
/// that become sections; a leaf's attributes are dropped.
pub fn parse_document(body: &str) -> Section {
    let start_time = Instant::now();

    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = match roxmltree::Document::parse_with_options(body, options) {
        Ok(document) => document,
        Err(e) => {
            warn!(action = "parse", component = "xml_document", error = %e, "Response is not well-formed XML");
            return Section::new();
        }
    };

    let sections = match element_to_node(document.root_element()) {
        Node::Section(section) => section,
        _ => Section::new(),
    };

    info!(
        action = "complete",
        component = "xml_document",
        section_count = sections.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Parsed statistics document"
    );
    sections
}

fn element_to_node(element: roxmltree::Node) -> Node {
    let children: Vec<roxmltree::Node> = element.children().filter(|n| n.is_element()).collect();

    if children.is_empty() {
        return Node::Field(Field::Scalar(text_content(element)));
    }

    if let [only] = children.as_slice() {
        if only.tag_name().name() == "a" {
            return Node::Field(Field::Link(Link {
                text: link_text(element, *only),
                href: only.attribute("href").map(str::to_string),
            }));
        }
    }

    // Mixed content reads as one run of text
    if element.children().any(is_significant_text) {
        return Node::Field(Field::Scalar(text_content(element)));
    }

    let mut section = Section::new();
    for child in children {
        let node = element_to_node(child);
        match section.entry(child.tag_name().name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Node::List(items) => items.push(node),
                existing => {
                    let first = std::mem::replace(existing, Node::List(Vec::new()));
                    *existing = Node::List(vec![first, node]);
                }
            },
        }
    }

    // Child elements take precedence over attributes of the same name
    for attribute in element.attributes() {
        section
            .entry(attribute.name().to_string())
            .or_insert_with(|| Node::Field(Field::Scalar(attribute.value().to_string())));
    }

    Node::Section(section)
}

fn is_significant_text(node: roxmltree::Node) -> bool {
    node.is_text() && node.text().is_some_and(|text| !text.trim().is_empty())
}

fn text_content(element: roxmltree::Node) -> String {
    element
        .descendants()
        .filter_map(|n| if n.is_text() { n.text() } else { None })
        .collect()
}

/// Anchor text plus any non-blank text around the anchor, in document order.
fn link_text(element: roxmltree::Node, anchor: roxmltree::Node) -> String {
    element
        .children()
        .filter_map(|n| {
            if n.id() == anchor.id() {
                Some(text_content(n))
            } else if is_significant_text(n) {
                n.text().map(str::to_string)
            } else {
                None
            }
        })
        .collect()
}
