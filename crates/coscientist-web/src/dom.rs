//! Minimal document model: detached nodes, the `Document` trait the client
//! writes through, and an in-memory implementation.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("element #{0} is not a form field")]
    NotAField(String),
}

/// A detached node. Built by the card formatters, then appended to a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        class: Option<String>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn element(tag: &str) -> Self {
        Node::Element {
            tag: tag.to_string(),
            class: None,
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, name: &str) -> Self {
        if let Node::Element { class, .. } = &mut self {
            *class = Some(name.to_string());
        }
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Same as setting `textContent`: replaces children with one text node.
    pub fn with_text(mut self, text: &str) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.clear();
            if !text.is_empty() {
                children.push(Node::Text(text.to_string()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Node::Element { class, .. } => class.as_deref(),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children.as_slice(),
            Node::Text(_) => &[],
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Element { tag, class, children } => {
                out.push('<');
                out.push_str(tag);
                if let Some(class) = class {
                    out.push_str(&format!(" class=\"{}\"", escape_html(class)));
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The page surface the client reads from and writes into.
/// Elements are addressed by id; the document skeleton is owned elsewhere.
pub trait Document {
    /// Current value of a form field.
    fn value(&self, id: &str) -> Result<String, DomError>;

    /// Replace the element's children with a single text node (`textContent`).
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DomError>;

    fn set_class(&mut self, id: &str, class: &str) -> Result<(), DomError>;

    fn clear_children(&mut self, id: &str) -> Result<(), DomError>;

    fn append_child(&mut self, id: &str, node: Node) -> Result<(), DomError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    tag: String,
    class: String,
    value: Option<String>,
    children: Vec<Node>,
}

/// In-memory `Document`. Elements keep insertion order for serialisation.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeMap<String, Element>,
    order: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container element.
    pub fn insert(&mut self, id: &str, tag: &str, class: &str) {
        self.put(id, Element {
            tag: tag.to_string(),
            class: class.to_string(),
            value: None,
            children: Vec::new(),
        });
    }

    /// Register a form field with an initial value.
    pub fn insert_field(&mut self, id: &str, value: &str) {
        self.put(id, Element {
            tag: "input".to_string(),
            class: String::new(),
            value: Some(value.to_string()),
            children: Vec::new(),
        });
    }

    fn put(&mut self, id: &str, element: Element) {
        if self.elements.insert(id.to_string(), element).is_none() {
            self.order.push(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Type into a form field.
    pub fn set_value(&mut self, id: &str, value: &str) -> Result<(), DomError> {
        let element = self.get_mut(id)?;
        match &mut element.value {
            Some(v) => {
                *v = value.to_string();
                Ok(())
            }
            None => Err(DomError::NotAField(id.to_string())),
        }
    }

    pub fn children(&self, id: &str) -> Option<&[Node]> {
        self.elements.get(id).map(|e| e.children.as_slice())
    }

    pub fn class(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.class.as_str())
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.elements
            .get(id)
            .map(|e| e.children.iter().map(Node::text_content).collect())
    }

    /// Serialise one element, including its id.
    pub fn element_html(&self, id: &str) -> Option<String> {
        let e = self.elements.get(id)?;
        let mut out = format!("<{} id=\"{}\"", e.tag, escape_html(id));
        if !e.class.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&e.class)));
        }
        if let Some(value) = &e.value {
            out.push_str(&format!(" name=\"{}\" value=\"{}\" />", escape_html(id), escape_html(value)));
            return Some(out);
        }
        out.push('>');
        for child in &e.children {
            out.push_str(&child.to_html());
        }
        out.push_str(&format!("</{}>", e.tag));
        Some(out)
    }

    /// Element ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    fn get(&self, id: &str) -> Result<&Element, DomError> {
        self.elements
            .get(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }
}

impl Document for MemoryDocument {
    fn value(&self, id: &str) -> Result<String, DomError> {
        self.get(id)?
            .value
            .clone()
            .ok_or_else(|| DomError::NotAField(id.to_string()))
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DomError> {
        let element = self.get_mut(id)?;
        element.children.clear();
        if !text.is_empty() {
            element.children.push(Node::Text(text.to_string()));
        }
        Ok(())
    }

    fn set_class(&mut self, id: &str, class: &str) -> Result<(), DomError> {
        self.get_mut(id)?.class = class.to_string();
        Ok(())
    }

    fn clear_children(&mut self, id: &str) -> Result<(), DomError> {
        self.get_mut(id)?.children.clear();
        Ok(())
    }

    fn append_child(&mut self, id: &str, node: Node) -> Result<(), DomError> {
        self.get_mut(id)?.children.push(node);
        Ok(())
    }
}
