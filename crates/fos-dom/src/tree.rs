//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: a removed node keeps its id and can be
//! re-inserted anywhere.

use crate::{
    DomError, DomResult, ElementData, Event, EventListener, Node, NodeData, NodeId,
};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.node(id)?
            .as_element()
            .ok_or(DomError::InvalidNodeType(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Create a detached HTML element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag, None))
    }

    /// Create a detached element in `namespace`
    pub fn create_element_ns(&mut self, namespace: &str, tag: &str) -> NodeId {
        self.push(Node::element(tag, Some(namespace)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Parent of `id`, if linked
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Iterate over the child nodes of `id`
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).and_then(|n| n.first_child),
        }
    }

    /// Ids of all child nodes
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Ids of element children only (`ParentNode.children`)
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
            .collect()
    }

    /// True if `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Append `child` as last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference` (append when `None`).
    /// A linked `child` is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        match &self.node(parent)?.data {
            NodeData::Element(_) | NodeData::Document => {}
            _ => return Err(DomError::InvalidNodeType(parent)),
        }
        self.node(child)?;
        if let Some(reference) = reference {
            if self.node(reference)?.parent != Some(parent) {
                return Err(DomError::NotAChild { parent, child: reference });
            }
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(parent, child));
        }
        if reference == Some(child) {
            return Ok(());
        }

        self.unlink(child);

        let prev = match reference {
            Some(reference) => self.nodes[reference.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };
        {
            let node = &mut self.nodes[child.index()];
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = Some(child),
            None => self.nodes[parent.index()].first_child = Some(child),
        }
        match reference {
            Some(reference) => self.nodes[reference.index()].prev_sibling = Some(child),
            None => self.nodes[parent.index()].last_child = Some(child),
        }
        Ok(())
    }

    /// Detach `id` from its parent; no-op when already detached
    pub fn remove(&mut self, id: NodeId) {
        if id.index() < self.nodes.len() {
            self.unlink(id);
        }
    }

    /// Put `new` where `old` is. `old` ends detached; no-op when `old` has no parent.
    pub fn replace_with(&mut self, old: NodeId, new: NodeId) -> DomResult<()> {
        self.node(new)?;
        let Some(parent) = self.node(old)?.parent else {
            return Ok(());
        };
        if old == new {
            return Ok(());
        }
        if self.is_inclusive_ancestor(new, parent) {
            return Err(DomError::HierarchyRequest(parent, new));
        }
        self.unlink(new);
        let next = self.nodes[old.index()].next_sibling;
        self.unlink(old);
        self.insert_before(parent, new, next)
    }

    fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        let Some(parent) = parent else {
            return;
        };
        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = next,
            None => self.nodes[parent.index()].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next.index()].prev_sibling = prev,
            None => self.nodes[parent.index()].last_child = prev,
        }
        let node = &mut self.nodes[id.index()];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    // ------------------------------------------------------------------
    // Element data
    // ------------------------------------------------------------------

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.name.as_str())
    }

    /// Namespace URI of an element
    pub fn namespace(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element()?.namespace.as_deref()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.attrs.set_attribute(name, value);
        Ok(())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attrs.get_attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        self.element_mut(id)?.attrs.remove_attribute(name);
        Ok(())
    }

    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.style.set_property(name, value);
        Ok(())
    }

    pub fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.style.get_property(name)
    }

    /// Replace all children with a single raw markup node
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) -> DomResult<()> {
        self.element(id)?;
        for child in self.child_ids(id) {
            self.unlink(child);
        }
        if !markup.is_empty() {
            let raw = self.push(Node::raw_html(markup));
            self.append_child(id, raw)?;
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element(_)) | Some(NodeData::Document) => {
                for (child, _) in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        event: &str,
        listener: EventListener,
    ) -> DomResult<()> {
        self.element_mut(id)?
            .listeners
            .entry(event.to_string())
            .or_default()
            .push(listener);
        Ok(())
    }

    /// Dispatch `event` at `target`, bubbling through ancestors.
    /// Returns the number of listeners invoked.
    pub fn dispatch_event(&self, event: &Event) -> DomResult<usize> {
        self.node(event.target)?;
        let mut invoked = 0;
        let mut current = Some(event.target);
        while let Some(id) = current {
            let listeners: Vec<EventListener> = self
                .get(id)
                .and_then(Node::as_element)
                .and_then(|e| e.listeners.get(&event.event_type))
                .cloned()
                .unwrap_or_default();
            event.set_current_target(id);
            for listener in listeners {
                listener(event);
                invoked += 1;
            }
            if !event.bubbles || event.is_propagation_stopped() {
                break;
            }
            current = self.parent(id);
        }
        tracing::trace!("dispatched {} to {} listeners", event.event_type, invoked);
        Ok(invoked)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over child nodes
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_append_and_order() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("a");
        let b = tree.create_text("b");
        let c = tree.create_element("c");

        tree.append_child(div, a).unwrap();
        tree.append_child(div, c).unwrap();
        tree.insert_before(div, b, Some(c)).unwrap();

        assert_eq!(tree.child_ids(div), vec![a, b, c]);
        assert_eq!(tree.child_elements(div), vec![a, c]);
        assert_eq!(tree.parent(b), Some(div));
    }

    #[test]
    fn test_move_between_parents() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div");
        let second = tree.create_element("div");
        let child = tree.create_element("span");

        tree.append_child(first, child).unwrap();
        tree.append_child(second, child).unwrap();

        assert!(tree.child_ids(first).is_empty());
        assert_eq!(tree.child_ids(second), vec![child]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();

        tree.remove(span);
        tree.remove(span);

        assert_eq!(tree.parent(span), None);
        assert!(tree.get(div).unwrap().first_child.is_none());
        assert!(tree.get(div).unwrap().last_child.is_none());
    }

    #[test]
    fn test_replace_with() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();

        tree.replace_with(a, c).unwrap();

        assert_eq!(tree.child_ids(div), vec![c, b]);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_replace_with_next_sibling() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();

        tree.replace_with(a, b).unwrap();

        assert_eq!(tree.child_ids(div), vec![b]);
    }

    #[test]
    fn test_hierarchy_errors() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        let stranger = tree.create_element("p");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest(inner, outer))
        );
        assert_eq!(
            tree.insert_before(outer, stranger, Some(stranger)),
            Err(DomError::NotAChild { parent: outer, child: stranger })
        );
        let text = tree.create_text("x");
        assert_eq!(
            tree.append_child(text, stranger),
            Err(DomError::InvalidNodeType(text))
        );
    }

    #[test]
    fn test_dispatch_bubbles() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("button");
        tree.append_child(outer, inner).unwrap();

        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        tree.add_event_listener(outer, "click", Rc::new(move |e: &Event| {
            assert_eq!(e.current_target(), outer);
            counter.set(counter.get() + 1);
        }))
        .unwrap();

        assert_eq!(tree.dispatch_event(&Event::new("click", inner)).unwrap(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(tree.dispatch_event(&Event::non_bubbling("click", inner)).unwrap(), 0);
    }

    #[test]
    fn test_inner_html_replaces_children() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();

        tree.set_inner_html(div, "<b>x</b>").unwrap();

        let children = tree.child_ids(div);
        assert_eq!(children.len(), 1);
        assert!(matches!(tree.get(children[0]).unwrap().data, NodeData::RawHtml(_)));
        assert_eq!(tree.parent(span), None);
    }
}
