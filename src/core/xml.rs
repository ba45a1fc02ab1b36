//! Owned XML element tree.
//!
//! Manifests are loaded into a small mutable tree, edited in place by the
//! appx mutators, and serialized back with consistent indentation. The tree
//! keeps tag names exactly as written (including namespace prefixes such as
//! `uap:` or `m2:`), attribute order, child order and comments. Whitespace-only
//! text between elements is dropped and regenerated by the writer.

use std::borrow::Cow;
use std::cmp::Ordering;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Errors produced while reading or writing an XML tree.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("malformed XML: closing tag `{found}` does not match `{expected}`")]
    MismatchedTag { expected: String, found: String },

    #[error("malformed XML: unclosed element `{0}`")]
    Unclosed(String),

    #[error("malformed XML: document has no root element")]
    MissingRoot,

    #[error("malformed XML: content after the root element")]
    TrailingContent,

    #[error("serialized XML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Comment(String),
}

/// An XML element with its attributes, text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Tag name without any namespace prefix (`uap:Capability` -> `Capability`).
    pub fn local_name(&self) -> &str {
        local_name(&self.tag)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(idx).1)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Child elements, skipping comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Comment(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Comment(_) => None,
        })
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|e| e.tag == tag)
    }

    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.tag == tag)
    }

    /// First descendant (document order, excluding `self`) with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        for child in self.elements() {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find(tag) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, tag: &str) -> Option<&mut Element> {
        for child in self.elements_mut() {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find_mut(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Append a child element and return a reference to it.
    pub fn push(&mut self, element: Element) -> &mut Element {
        self.children.push(Node::Element(element));
        match self.children.last_mut() {
            Some(Node::Element(e)) => e,
            _ => unreachable!("just pushed an element"),
        }
    }

    /// Insert a child element directly after the first child with tag `after`,
    /// or append it when no such child exists.
    pub fn insert_after(&mut self, after: &str, element: Element) {
        let idx = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if e.tag == after));
        match idx {
            Some(idx) => self.children.insert(idx + 1, Node::Element(element)),
            None => self.children.push(Node::Element(element)),
        }
    }

    /// Remove every direct child with the given tag, returning how many were removed.
    pub fn remove_children(&mut self, tag: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(e) if e.tag == tag));
        before - self.children.len()
    }

    /// Remove all children and text.
    pub fn clear(&mut self) {
        self.children.clear();
        self.text = None;
    }

    /// Stable sort of the child elements.
    ///
    /// Comments travel with the element that follows them. Comments after the
    /// last element stay at the end.
    pub fn sort_elements_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Element, &Element) -> Ordering,
    {
        let mut groups: Vec<(Vec<Node>, Element)> = Vec::new();
        let mut leading = Vec::new();
        for node in self.children.drain(..) {
            match node {
                Node::Element(e) => groups.push((std::mem::take(&mut leading), e)),
                comment => leading.push(comment),
            }
        }
        groups.sort_by(|(_, a), (_, b)| compare(a, b));

        for (comments, element) in groups {
            self.children.extend(comments);
            self.children.push(Node::Element(element));
        }
        self.children.extend(leading);
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let text = self.text.as_deref().filter(|t| !t.is_empty());
        if text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.write(writer)?,
                Node::Comment(c) => {
                    writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?
                }
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }
}

/// Strip a namespace prefix from a qualified tag name.
pub fn local_name(tag: &str) -> &str {
    tag.rsplit(':').next().unwrap_or(tag)
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments that appear before the root element.
    pub prolog: Vec<String>,
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Document {
            prolog: Vec::new(),
            root,
        }
    }

    /// Parse a document, skipping anything before the first `<`.
    ///
    /// Files saved by Visual Studio usually start with a byte-order mark,
    /// which is not part of the XML grammar.
    pub fn parse(contents: &str) -> Result<Document, XmlError> {
        let contents = match contents.find('<') {
            Some(idx) => &contents[idx..],
            None => return Err(XmlError::MissingRoot),
        };

        let mut reader = Reader::from_str(contents);
        reader.trim_text(true);

        let mut prolog = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event()?;
            match event {
                Event::Start(e) => {
                    if root.is_some() {
                        return Err(XmlError::TrailingContent);
                    }
                    stack.push(element_from_start(&e)?);
                }
                Event::Empty(e) => {
                    if root.is_some() {
                        return Err(XmlError::TrailingContent);
                    }
                    let element = element_from_start(&e)?;
                    close_element(element, &mut stack, &mut root);
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let element = stack.pop().ok_or_else(|| XmlError::MismatchedTag {
                        expected: String::new(),
                        found: name.clone(),
                    })?;
                    if element.tag != name {
                        return Err(XmlError::MismatchedTag {
                            expected: element.tag,
                            found: name,
                        });
                    }
                    close_element(element, &mut stack, &mut root);
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    append_text(&mut stack, &text);
                }
                Event::CData(e) => {
                    append_text(&mut stack, &String::from_utf8_lossy(&e));
                }
                Event::Comment(e) => {
                    let comment = String::from_utf8_lossy(&e).into_owned();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Comment(comment)),
                        None if root.is_none() => prolog.push(comment),
                        None => {}
                    }
                }
                Event::Eof => break,
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed(open.tag));
        }

        let root = root.ok_or(XmlError::MissingRoot)?;
        Ok(Document { prolog, root })
    }

    /// Serialize with an XML declaration and the given indent width.
    pub fn to_xml(&self, indent: usize) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write_body(&mut writer)?;
        let mut xml = String::from_utf8(writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }

    /// Serialize without an XML declaration.
    pub fn to_xml_fragment(&self, indent: usize) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
        self.write_body(&mut writer)?;
        let mut xml = String::from_utf8(writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }

    fn write_body<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        for comment in &self.prolog {
            writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
        }
        self.root.write(writer)
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value: Cow<'_, str> = attr.unescape_value()?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn close_element(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn append_text(stack: &mut [Element], text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(current) = stack.last_mut() {
        match current.text {
            Some(ref mut existing) => existing.push_str(text),
            None => current.text = Some(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Package xmlns="http://schemas.microsoft.com/appx/2010/manifest" xmlns:m2="http://schemas.microsoft.com/appx/2013/manifest">
  <!-- identity -->
  <Identity Name="app" Version="1.0.0.0" Publisher="CN=me" />
  <Properties>
    <DisplayName>My &amp; App</DisplayName>
  </Properties>
  <Applications>
    <Application Id="io.app">
      <m2:VisualElements DisplayName="App" />
    </Application>
  </Applications>
</Package>
"#;

    #[test]
    fn test_parse_preserves_structure() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.root.tag, "Package");
        assert_eq!(
            doc.root.attr("xmlns:m2"),
            Some("http://schemas.microsoft.com/appx/2013/manifest")
        );
        assert!(matches!(doc.root.children[0], Node::Comment(_)));

        let identity = doc.root.find("Identity").unwrap();
        let keys: Vec<&str> = identity.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Name", "Version", "Publisher"]);

        let display = doc.root.find("DisplayName").unwrap();
        assert_eq!(display.text.as_deref(), Some("My & App"));

        let visual = doc.root.find("m2:VisualElements").unwrap();
        assert_eq!(visual.local_name(), "VisualElements");
    }

    #[test]
    fn test_parse_skips_byte_order_mark() {
        let with_bom = format!("\u{feff}{}", SAMPLE);
        let doc = Document::parse(&with_bom).unwrap();
        assert_eq!(doc.root.tag, "Package");
    }

    #[test]
    fn test_serialize_roundtrip_is_stable() {
        let doc = Document::parse(SAMPLE).unwrap();
        let first = doc.to_xml(4).unwrap();
        let second = Document::parse(&first).unwrap().to_xml(4).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(first.contains("<DisplayName>My &amp; App</DisplayName>"));
    }

    #[test]
    fn test_find_mut_and_attributes() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        let app = doc.root.find_mut("Application").unwrap();
        app.set_attr("Id", "other");
        app.set_attr("StartPage", "www/index.html");
        assert_eq!(app.remove_attr("Missing"), None);

        let app = doc.root.find("Application").unwrap();
        let attrs: Vec<(&str, &str)> = app.attributes().collect();
        assert_eq!(attrs, vec![("Id", "other"), ("StartPage", "www/index.html")]);
    }

    #[test]
    fn test_insert_and_remove_children() {
        let mut root = Element::new("Package");
        root.push(Element::new("Identity"));
        root.push(Element::new("Capabilities"));
        root.insert_after("Identity", Element::new("Dependencies"));

        let tags: Vec<&str> = root.elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["Identity", "Dependencies", "Capabilities"]);

        assert_eq!(root.remove_children("Dependencies"), 1);
        assert_eq!(root.remove_children("Dependencies"), 0);
        assert!(root.child("Dependencies").is_none());
    }

    #[test]
    fn test_sort_elements_keeps_comments_with_next_element() {
        let mut root = Element::new("Capabilities");
        root.children.push(Node::Comment(" camera ".to_string()));
        root.push(Element::new("b"));
        root.push(Element::new("a"));
        root.children.push(Node::Comment(" trailing ".to_string()));

        root.sort_elements_by(|x, y| x.tag.cmp(&y.tag));

        assert_eq!(
            root.children,
            vec![
                Node::Element(Element::new("a")),
                Node::Comment(" camera ".to_string()),
                Node::Element(Element::new("b")),
                Node::Comment(" trailing ".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Document::parse("not xml").is_err());
        assert!(Document::parse("<a><b></a>").is_err());
        assert!(Document::parse("<a>").is_err());
    }
}
