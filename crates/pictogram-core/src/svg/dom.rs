//! Minimal element tree built on top of `quick-xml`.
//!
//! Attribute values and text are kept in their raw (escaped) form so that
//! serialization reproduces the source without re-escaping.

use std::ops::Range;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{PictogramError, Result};

const PREDEFINED_ENTITIES: [&str; 5] = ["lt", "gt", "amp", "apos", "quot"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    /// Attributes in source order, values still escaped.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| PictogramError::invalid_markup(e.to_string()))?;
            attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                String::from_utf8_lossy(&attr.value).into_owned(),
            ));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    pub fn has_element_children(&self) -> bool {
        self.children.iter().any(|c| matches!(c, Node::Element(_)))
    }

    /// Text runs of this element that are not blank, trimmed.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|c| match c {
            Node::Text(t) if !t.trim().is_empty() => Some(t.trim()),
            _ => None,
        })
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

/// Parses `text` into its single root element.
///
/// Comments, processing instructions, the XML declaration and the doctype
/// are discarded. Fails on any well-formedness error, on a missing root, on
/// multiple roots and on non-blank text outside the root.
pub(crate) fn parse_document(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(multiple_roots());
                }
                stack.push(Element::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| PictogramError::invalid_markup("unmatched end tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                let raw = String::from_utf8_lossy(&t);
                push_text(&mut stack, &raw)?;
            }
            Event::CData(c) => {
                let raw = format!("<![CDATA[{}]]>", String::from_utf8_lossy(&c));
                push_text(&mut stack, &raw)?;
            }
            Event::GeneralRef(r) => {
                let name = String::from_utf8_lossy(&r).into_owned();
                if !name.starts_with('#') && !PREDEFINED_ENTITIES.contains(&name.as_str()) {
                    return Err(PictogramError::invalid_markup(format!(
                        "undefined entity &{name};"
                    )));
                }
                push_text(&mut stack, &format!("&{name};"))?;
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(PictogramError::invalid_markup(format!(
            "unclosed element <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| PictogramError::invalid_markup("document has no root element"))
}

/// The root start tag of a document, located by byte span.
///
/// Used to rewrite root attributes in place while leaving the rest of the
/// markup byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RootTag {
    pub span: Range<usize>,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub self_closing: bool,
    /// Attributes added by `set` go to the front, in insertion order.
    inserted: usize,
}

impl RootTag {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the value of `key`, or inserts the attribute when absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => {
                self.attributes.insert(self.inserted, (key.to_string(), value));
                self.inserted += 1;
            }
        }
    }

    /// Drops every attribute; later `set` calls start from the front.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.inserted = 0;
    }

    pub fn to_markup(&self) -> String {
        let mut out = format!("<{}", self.name);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {key}=\"{}\"", value.replace('"', "&quot;")));
        }
        out.push_str(if self.self_closing { "/>" } else { ">" });
        out
    }

    /// Returns `text` with the original root start tag replaced by this one.
    pub fn splice_into(&self, text: &str) -> String {
        format!(
            "{}{}{}",
            &text[..self.span.start],
            self.to_markup(),
            &text[self.span.end..]
        )
    }
}

/// Finds the first start tag of `text`, skipping the prolog and comments.
///
/// Only the markup up to and including the root start tag is read, so the
/// rest of the document is not checked for well-formedness.
pub(crate) fn find_root_tag(text: &str) -> Result<RootTag> {
    let mut reader = Reader::from_str(text);
    loop {
        let start = reader.buffer_position() as usize;
        let (tag, self_closing) = match reader.read_event()? {
            Event::Start(tag) => (tag, false),
            Event::Empty(tag) => (tag, true),
            Event::Eof => {
                return Err(PictogramError::invalid_markup(
                    "document has no root element",
                ));
            }
            _ => continue,
        };
        let end = reader.buffer_position() as usize;
        let element = Element::from_start(&tag)?;
        return Ok(RootTag {
            span: start..end,
            name: element.name,
            attributes: element.attributes,
            self_closing,
            inserted: 0,
        });
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => return Err(multiple_roots()),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_text(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(PictogramError::invalid_markup(
                "text content outside the root element",
            ));
        }
    }
    Ok(())
}

fn multiple_roots() -> PictogramError {
    PictogramError::invalid_markup("document has more than one root element")
}
