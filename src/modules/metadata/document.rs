//! Read-only element tree over a catalog metadata document.
//!
//! Only what the field extraction needs is kept: element local names, the
//! text that precedes the first child element, and children in document
//! order. Attributes, comments and processing instructions are dropped.

use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::domain::DomainError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: None,
            children: Vec::new(),
        }
    }

    /// Leading text content; empty for an element without text.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    fn push_text(&mut self, chunk: &str) {
        // Text after the first child is tail text of that child, not ours.
        if self.children.is_empty() {
            self.text.get_or_insert_with(String::new).push_str(chunk);
        }
    }

    fn find_path<'a>(&'a self, segments: &[&str]) -> Option<&'a Element> {
        let (first, rest) = segments.split_first()?;
        self.children
            .iter()
            .filter(|child| child.name == *first)
            .find_map(|child| {
                if rest.is_empty() {
                    Some(child)
                } else {
                    child.find_path(rest)
                }
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDocument {
    root: Element,
}

impl MetadataDocument {
    /// Decode raw document bytes and parse them.
    ///
    /// A byte order mark wins over the XML declaration's `encoding`, which
    /// wins over the UTF-8 default.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DomainError> {
        let encoding = declared_encoding(bytes).unwrap_or(UTF_8);
        let (xml, actual, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(DomainError::Parse(format!(
                "XML: document is not valid {}",
                actual.name()
            )));
        }
        Self::parse(&xml)
    }

    pub fn parse(xml: &str) -> Result<Self, DomainError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    stack.push(Element::new(name));
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    attach(&mut stack, &mut root, Element::new(name))?;
                }
                Event::Text(e) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e.unescape()?;
                        current.push_text(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::End(_) => {
                    let finished = stack.pop().ok_or_else(|| {
                        DomainError::Parse("XML: closing tag without an open element".to_string())
                    })?;
                    attach(&mut stack, &mut root, finished)?;
                }
                Event::Eof => break,
                _ => (),
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(DomainError::Parse(format!(
                "XML: document ended inside <{}>",
                stack.last().map(|e| e.name.as_str()).unwrap_or_default()
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| DomainError::Parse("XML: document has no root element".to_string()))
    }

    /// First element matching a slash-separated path of child names,
    /// relative to the root element.
    pub fn find(&self, path: &str) -> Option<&Element> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.root.find_path(&segments)
    }
}

/// Encoding named in the XML declaration, if any.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;
    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let label = &rest[1..][..rest[1..].find(quote)?];
    // A declaration readable as ASCII cannot be describing UTF-16 bytes
    Encoding::for_label(label.as_bytes()).filter(|e| e.is_ascii_compatible())
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DomainError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(DomainError::Parse(
                "XML: more than one root element".to_string(),
            ));
        }
    }
    Ok(())
}
