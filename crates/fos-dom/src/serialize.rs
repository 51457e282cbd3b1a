//! Markup serialization (`outerHTML` / `innerHTML` getters)

use crate::{DomTree, NodeData, NodeId};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

impl DomTree {
    /// Serialize `id` including itself
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize the children of `id`
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for (child, _) in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => {
                for (child, _) in self.children(id) {
                    self.write_node(child, out);
                }
            }
            NodeData::Text(text) => escape_text(text, out),
            NodeData::RawHtml(markup) => out.push_str(markup),
            NodeData::Element(elem) => {
                out.push('<');
                out.push_str(&elem.name);
                for attr in elem.attrs.iter() {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    escape_attr(&attr.value, out);
                    out.push('"');
                }
                if !elem.style.is_empty() && !elem.attrs.has_attribute("style") {
                    out.push_str(" style=\"");
                    escape_attr(&elem.style.css_text(), out);
                    out.push('"');
                }
                out.push('>');
                if elem.namespace.is_none() && VOID_ELEMENTS.contains(&elem.name.as_str()) {
                    return;
                }
                for (child, _) in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&elem.name);
                out.push('>');
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
