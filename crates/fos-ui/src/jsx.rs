//! Materialization
//!
//! Turns node descriptions into live nodes. Dispatch happens once per
//! description on its [`ElementType`]; children are resolved before the
//! element that holds them is created, so the document is built inside-out.

use fos_dom::NodeId;

use crate::{
    flatten, h, Child, ComponentType, Element, ElementType, Error, FunctionComponent, Platform,
    Prop, Props, RefTarget, Result, Runtime, Slot,
};

/// Namespace context inherited by descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Html,
    Svg,
}

impl Runtime {
    /// Materialize `(type, props)`
    pub fn jsx(
        &mut self,
        dom: &mut dyn Platform,
        ty: impl Into<ElementType>,
        props: Props,
    ) -> Result<Child> {
        self.materialize(dom, h(ty, props))
    }

    /// Materialize `(type, props, ...children)`; `children` replace any
    /// children already in `props`
    pub fn create_element(
        &mut self,
        dom: &mut dyn Platform,
        ty: impl Into<ElementType>,
        mut props: Props,
        children: Vec<Child>,
    ) -> Result<Child> {
        props.set_children(children);
        self.jsx(dom, ty, props)
    }

    /// Materialize every description in `child`.
    ///
    /// Returns the same shape with descriptions replaced by live nodes:
    /// sequences stay sequences, text stays text, slots stay slots (with
    /// their value materialized).
    pub fn materialize(&mut self, dom: &mut dyn Platform, child: Child) -> Result<Child> {
        self.resolve(dom, child, Namespace::Html)
    }

    fn resolve(&mut self, dom: &mut dyn Platform, child: Child, ns: Namespace) -> Result<Child> {
        match child {
            Child::Element(element) => self.materialize_element(dom, *element, ns),
            Child::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.resolve(dom, item, ns)?);
                }
                Ok(Child::List(out))
            }
            Child::Slot(mut slot) => match slot.take() {
                Some(value) => {
                    let value = self.resolve(dom, value, ns)?;
                    Ok(Child::Slot(Slot::new(slot.name(), value)))
                }
                None => Ok(Child::Slot(slot)),
            },
            other => Ok(other),
        }
    }

    fn materialize_element(
        &mut self,
        dom: &mut dyn Platform,
        element: Element,
        ns: Namespace,
    ) -> Result<Child> {
        let Element { ty, mut props } = element;
        tracing::trace!("materializing {} {:?}", ty.kind(), ty);
        match ty {
            ElementType::Text => self.materialize_text(dom, props, ns).map(Child::Node),
            ElementType::Intrinsic(tag) => {
                self.materialize_intrinsic(dom, &tag, props, ns).map(Child::Node)
            }
            ElementType::Component(ty) => {
                self.materialize_component(dom, &ty, props, ns).map(Child::Node)
            }
            ElementType::Function(f) => self.materialize_function(dom, &f, props, ns),
            ElementType::Fragment => self.resolve(dom, props.take_children(), ns),
        }
    }

    /// Text sentinel: one text node from the concatenated children, or the
    /// `value` prop when there are none
    fn materialize_text(
        &mut self,
        dom: &mut dyn Platform,
        mut props: Props,
        ns: Namespace,
    ) -> Result<NodeId> {
        let node_ref = props.take_ref();
        let leaves = flatten(self.resolve(dom, props.take_children(), ns)?);

        let mut text = String::new();
        if leaves.is_empty() {
            if let Some(value) = props.get("value").and_then(text_of) {
                text = value;
            }
        }
        for leaf in leaves {
            match leaf {
                Child::Text(s) => text.push_str(&s),
                Child::Node(node) => text.push_str(&dom.text_content(node)),
                Child::Slot(slot) => return Err(Error::UnextractedSlot(slot.name().to_string())),
                Child::Empty | Child::Element(_) | Child::List(_) => {}
            }
        }

        let node = dom.create_text_node(&text);
        if let Some(node_ref) = node_ref {
            self.apply_ref(dom, &node_ref, RefTarget::Node(node))?;
        }
        Ok(node)
    }

    fn materialize_intrinsic(
        &mut self,
        dom: &mut dyn Platform,
        tag: &str,
        mut props: Props,
        ns: Namespace,
    ) -> Result<NodeId> {
        let ns = if self.config().is_svg_tag(tag) {
            Namespace::Svg
        } else {
            ns
        };
        let child_ns = if tag == "foreignObject" {
            Namespace::Html
        } else {
            ns
        };

        let node_ref = props.take_ref();
        let children = flatten(self.resolve(dom, props.take_children(), child_ns)?);

        let element = match ns {
            Namespace::Svg => dom.create_element_ns(&self.config().svg_namespace, tag),
            Namespace::Html => dom.create_element(tag),
        };
        self.apply_props(dom, element, props)?;
        if let Some(node_ref) = node_ref {
            self.apply_ref(dom, &node_ref, RefTarget::Node(element))?;
        }

        for child in children {
            let node = match child {
                Child::Node(node) => node,
                Child::Text(text) => dom.create_text_node(&text),
                Child::Slot(slot) => return Err(Error::UnextractedSlot(slot.name().to_string())),
                Child::Empty | Child::Element(_) | Child::List(_) => continue,
            };
            dom.append_child(element, node)?;
        }
        Ok(element)
    }

    /// Construct and build. The ref receives the component itself; a
    /// component that fails to build is destroyed. One left unbound by its
    /// ref is adopted by the component being built.
    fn materialize_component(
        &mut self,
        dom: &mut dyn Platform,
        ty: &ComponentType,
        mut props: Props,
        ns: Namespace,
    ) -> Result<NodeId> {
        let node_ref = props.take_ref();
        let children = self.resolve(dom, props.take_children(), ns)?;
        props.set_children(children);

        let id = self.instantiate_boxed(ty.construct(props), ty.name());
        let root = match self.build(dom, id) {
            Ok(root) => root,
            Err(err) => {
                self.destroy(dom, id);
                return Err(err);
            }
        };
        if let Some(node_ref) = node_ref {
            if let Err(err) = self.apply_ref(dom, &node_ref, RefTarget::Component(id)) {
                self.destroy(dom, id);
                return Err(err);
            }
        }
        if self.parent(id).is_none() {
            self.adopt(id);
        }
        Ok(root)
    }

    fn materialize_function(
        &mut self,
        dom: &mut dyn Platform,
        f: &FunctionComponent,
        mut props: Props,
        ns: Namespace,
    ) -> Result<Child> {
        let node_ref = props.take_ref();
        let output = self.resolve(dom, f(props), ns)?;
        if let Some(node_ref) = node_ref {
            let target = match output.node() {
                Some(node) => RefTarget::Node(node),
                None => RefTarget::Nodes(output.nodes()),
            };
            self.apply_ref(dom, &node_ref, target)?;
        }
        Ok(output)
    }

    // ------------------------------------------------------------------
    // Props
    // ------------------------------------------------------------------

    fn apply_props(&self, dom: &mut dyn Platform, element: NodeId, props: Props) -> Result<()> {
        for (key, value) in props.into_entries() {
            if let Some(event) = key.strip_prefix("on").filter(|e| !e.is_empty()) {
                match value {
                    Prop::Handler(listener) => {
                        dom.add_event_listener(element, &event.to_ascii_lowercase(), listener)?
                    }
                    other => tracing::debug!("skipping {} = {:?}: not a handler", key, other),
                }
                continue;
            }

            match key.as_str() {
                "innerHTML" => {
                    if let Some(markup) = text_of(&value) {
                        dom.set_inner_html(element, &markup)?;
                    }
                }
                "class" => apply_class(dom, element, value)?,
                "style" => apply_style(dom, element, value)?,
                _ => {
                    let name = self.config().attribute_name(&key);
                    apply_attribute(dom, element, &name, value)?;
                }
            }
        }
        Ok(())
    }
}

/// Text of a content prop: `null` and `false` read as empty, `undefined`
/// as absent
fn text_of(value: &Prop) -> Option<String> {
    match value {
        Prop::Null | Prop::Bool(false) => Some(String::new()),
        other => other.to_text(),
    }
}

/// A literal string is set verbatim; a sequence is flattened and
/// space-joined, and sets nothing when empty
fn apply_class(dom: &mut dyn Platform, element: NodeId, value: Prop) -> Result<()> {
    let class = match value {
        Prop::Str(s) => s,
        Prop::List(items) => {
            let names: Vec<String> = flatten(Prop::List(items))
                .iter()
                .filter_map(Prop::to_text)
                .filter(|name| !name.is_empty())
                .collect();
            if names.is_empty() {
                tracing::debug!("class flattened to nothing");
                return Ok(());
            }
            names.join(" ")
        }
        Prop::Undefined | Prop::Null | Prop::Bool(false) => return Ok(()),
        other => match other.to_text() {
            Some(text) => text,
            None => return Ok(()),
        },
    };
    dom.set_attribute(element, "class", &class)?;
    Ok(())
}

fn apply_style(dom: &mut dyn Platform, element: NodeId, value: Prop) -> Result<()> {
    match value {
        Prop::Style(declarations) => {
            for (name, value) in &declarations {
                dom.set_style_property(element, name, value)?;
            }
        }
        Prop::Str(css) => dom.set_attribute(element, "style", &css)?,
        other => tracing::debug!("skipping style = {:?}", other),
    }
    Ok(())
}

fn apply_attribute(dom: &mut dyn Platform, element: NodeId, name: &str, value: Prop) -> Result<()> {
    match value {
        Prop::Bool(true) => dom.set_attribute(element, name, "")?,
        Prop::Bool(false) | Prop::Null => dom.remove_attribute(element, name)?,
        Prop::Str(s) => dom.set_attribute(element, name, &s)?,
        Prop::Number(_) | Prop::List(_) => {
            if let Some(text) = value.to_text() {
                dom.set_attribute(element, name, &text)?;
            }
        }
        Prop::Undefined => {}
        other => tracing::debug!("skipping {} = {:?}", name, other),
    }
    Ok(())
}
