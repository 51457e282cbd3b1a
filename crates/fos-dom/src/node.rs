//! DOM Node
//!
//! Nodes link to each other by [`NodeId`]: parent, first/last child and
//! both siblings. `last_child` keeps append O(1).

use std::collections::HashMap;

use crate::{EventListener, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node
    pub parent: Option<NodeId>,
    /// First child
    pub first_child: Option<NodeId>,
    /// Last child (for O(1) append)
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            data,
        }
    }

    /// Create a new element node
    pub fn element(name: &str, namespace: Option<&str>) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(name, namespace)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a raw markup node
    pub fn raw_html(markup: impl Into<String>) -> Self {
        Self::with_data(NodeData::RawHtml(markup.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Unparsed markup assigned through `innerHTML`
    RawHtml(String),
}

/// Element-specific data
pub struct ElementData {
    /// Tag name, case preserved
    pub name: String,
    /// Namespace URI (`None` for plain HTML elements)
    pub namespace: Option<String>,
    /// Attributes in insertion order
    pub attrs: NamedNodeMap,
    /// Inline style
    pub style: StyleDeclaration,
    /// Listeners keyed by event name
    pub listeners: HashMap<String, Vec<EventListener>>,
}

impl ElementData {
    pub fn new(name: &str, namespace: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            attrs: NamedNodeMap::new(),
            style: StyleDeclaration::default(),
            listeners: HashMap::new(),
        }
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for ElementData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementData")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("attrs", &self.attrs)
            .field("style", &self.style)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Inline style declarations (`element.style`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: Vec<(String, String)>,
}

impl StyleDeclaration {
    /// Set a property, replacing an existing value in place.
    ///
    /// camelCase names (`backgroundColor`) are stored in their CSS form
    /// (`background-color`), custom properties (`--x`) verbatim.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = css_property_name(name);
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.properties.push((name, value.to_string())),
        }
    }

    /// Get a property value
    pub fn get_property(&self, name: &str) -> Option<&str> {
        let name = css_property_name(name);
        self.properties
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Serialize as a `style` attribute value
    pub fn css_text(&self) -> String {
        self.properties
            .iter()
            .map(|(n, v)| format!("{}: {};", n, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn css_property_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_camel_case() {
        let mut style = StyleDeclaration::default();
        style.set_property("backgroundColor", "red");
        style.set_property("color", "blue");
        style.set_property("background-color", "green");

        assert_eq!(style.get_property("backgroundColor"), Some("green"));
        assert_eq!(style.css_text(), "background-color: green; color: blue;");
    }

    #[test]
    fn test_custom_property_verbatim() {
        let mut style = StyleDeclaration::default();
        style.set_property("--accentColor", "#fff");
        assert_eq!(style.get_property("--accentColor"), Some("#fff"));
    }
}
