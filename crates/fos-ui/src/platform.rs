//! Platform seam
//!
//! The host document operations the runtime calls into. Every lifecycle
//! and materialization entry point takes the platform as an explicit
//! `&mut dyn Platform` argument.

use fos_dom::{DomResult, DomTree, EventListener, NodeId};

/// Host document capability
pub trait Platform {
    fn create_element(&mut self, tag: &str) -> NodeId;

    fn create_element_ns(&mut self, namespace: &str, tag: &str) -> NodeId;

    fn create_text_node(&mut self, text: &str) -> NodeId;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()>;

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()>;

    fn add_event_listener(
        &mut self,
        node: NodeId,
        event: &str,
        listener: EventListener,
    ) -> DomResult<()>;

    /// Replace the content of `node` with raw markup
    fn set_inner_html(&mut self, node: NodeId, markup: &str) -> DomResult<()>;

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()>;

    /// Insert `child` before `reference`, appending when `None`
    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()>;

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Swap `new` into the position of `old`
    fn replace_with(&mut self, old: NodeId, new: NodeId) -> DomResult<()>;

    /// Detach `node`; no-op when it has no parent
    fn remove(&mut self, node: NodeId);

    /// Element children of `node`, in document order
    fn child_elements(&self, node: NodeId) -> Vec<NodeId>;

    fn text_content(&self, node: NodeId) -> String;
}

impl Platform for DomTree {
    fn create_element(&mut self, tag: &str) -> NodeId {
        DomTree::create_element(self, tag)
    }

    fn create_element_ns(&mut self, namespace: &str, tag: &str) -> NodeId {
        DomTree::create_element_ns(self, namespace, tag)
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.create_text(text)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        DomTree::set_attribute(self, node, name, value)
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()> {
        DomTree::remove_attribute(self, node, name)
    }

    fn add_event_listener(
        &mut self,
        node: NodeId,
        event: &str,
        listener: EventListener,
    ) -> DomResult<()> {
        DomTree::add_event_listener(self, node, event, listener)
    }

    fn set_inner_html(&mut self, node: NodeId, markup: &str) -> DomResult<()> {
        DomTree::set_inner_html(self, node, markup)
    }

    fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        DomTree::set_style_property(self, node, name, value)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        DomTree::insert_before(self, parent, child, reference)
    }

    fn replace_with(&mut self, old: NodeId, new: NodeId) -> DomResult<()> {
        DomTree::replace_with(self, old, new)
    }

    fn remove(&mut self, node: NodeId) {
        DomTree::remove(self, node)
    }

    fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        DomTree::child_elements(self, node)
    }

    fn text_content(&self, node: NodeId) -> String {
        DomTree::text_content(self, node)
    }
}
