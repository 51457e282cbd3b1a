//! Component lifecycle
//!
//! Components live in a generational arena and point at each other by
//! [`ComponentId`]. Parent links are back-references only: the arena owns
//! every component, and `destroy` releases it.
//!
//! A component materialized during another component's build without being
//! bound (no ref, or a callback ref) is owned by the component being built
//! and released with it. Outside of any build it is kept on the runtime's
//! unowned list until [`Runtime::release_unowned`].
//!
//! ```text
//! Unbuilt --build--> Built --bind--> Bound --attach--> Attached
//!                      \________bind(self)___________/
//! any --destroy--> Detached (hook) --> Destroyed
//! ```

use std::collections::HashMap;
use std::fmt;

use fos_dom::NodeId;

use crate::arena::GenArena;
use crate::{
    flatten, Child, Component, ComponentId, Config, Error, Lifecycle, Platform, Ref, RefTarget,
    Result, Scope,
};

struct ComponentNode {
    /// Taken out while one of its methods runs
    behavior: Option<Box<dyn Component>>,
    type_name: &'static str,
    root: Option<NodeId>,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
    /// Built during this component's render but never bound
    owned: Vec<ComponentId>,
    owner: Option<ComponentId>,
    refs: HashMap<String, RefTarget>,
    attached: bool,
    state: Lifecycle,
}

/// Where `create` inserts a component's root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    /// The component's root
    Component(ComponentId),
}

impl From<NodeId> for Target {
    fn from(node: NodeId) -> Self {
        Target::Node(node)
    }
}

impl From<ComponentId> for Target {
    fn from(id: ComponentId) -> Self {
        Target::Component(id)
    }
}

/// Reference point for `create`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Before {
    Node(NodeId),
    /// The component's root
    Component(ComponentId),
    /// Index into the target's element children; past the end appends
    Index(usize),
}

impl From<NodeId> for Before {
    fn from(node: NodeId) -> Self {
        Before::Node(node)
    }
}

impl From<ComponentId> for Before {
    fn from(id: ComponentId) -> Self {
        Before::Component(id)
    }
}

impl From<usize> for Before {
    fn from(index: usize) -> Self {
        Before::Index(index)
    }
}

/// Component arena plus runtime configuration.
///
/// The host document is not stored here; every operation that touches it
/// takes it as `dom`.
pub struct Runtime {
    components: GenArena<ComponentNode>,
    /// Components whose render is in progress, innermost last
    building: Vec<ComponentId>,
    unowned: Vec<ComponentId>,
    config: Config,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            components: GenArena::new(),
            building: Vec::new(),
            unowned: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add an unbuilt component
    pub fn instantiate<C: Component>(&mut self, component: C) -> ComponentId {
        self.instantiate_boxed(Box::new(component), std::any::type_name::<C>())
    }

    pub(crate) fn instantiate_boxed(
        &mut self,
        behavior: Box<dyn Component>,
        type_name: &'static str,
    ) -> ComponentId {
        let id = ComponentId(self.components.insert(ComponentNode {
            behavior: Some(behavior),
            type_name,
            root: None,
            parent: None,
            children: Vec::new(),
            owned: Vec::new(),
            owner: None,
            refs: HashMap::new(),
            attached: false,
            state: Lifecycle::Unbuilt,
        }));
        tracing::trace!("instantiated {} as {:?}", type_name, id);
        id
    }

    fn node(&self, id: ComponentId) -> Result<&ComponentNode> {
        self.components.get(id.0).ok_or(Error::Destroyed(id))
    }

    fn node_mut(&mut self, id: ComponentId) -> Result<&mut ComponentNode> {
        self.components.get_mut(id.0).ok_or(Error::Destroyed(id))
    }

    fn root_of(&self, id: ComponentId) -> Result<NodeId> {
        self.node(id)?.root.ok_or(Error::NotRendered(id))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self, id: ComponentId) -> Lifecycle {
        self.components
            .get(id.0)
            .map_or(Lifecycle::Destroyed, |n| n.state)
    }

    pub fn is_attached(&self, id: ComponentId) -> bool {
        self.components.get(id.0).is_some_and(|n| n.attached)
    }

    pub fn root(&self, id: ComponentId) -> Option<NodeId> {
        self.components.get(id.0).and_then(|n| n.root)
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.components.get(id.0).and_then(|n| n.parent)
    }

    /// Bound child components in binding order
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.components
            .get(id.0)
            .map_or(&[][..], |n| n.children.as_slice())
    }

    pub fn get_ref(&self, id: ComponentId, key: &str) -> Option<&RefTarget> {
        self.components.get(id.0)?.refs.get(key)
    }

    pub fn is_self_bound(&self, id: ComponentId) -> bool {
        self.parent(id) == Some(id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains(id.0)
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Unbound components materialized outside of any build
    pub fn unowned(&self) -> &[ComponentId] {
        &self.unowned
    }

    /// Run `f` with the component's behavior and a scope over the runtime.
    /// `None` if the component is gone or already running.
    fn with_component<R>(
        &mut self,
        dom: &mut dyn Platform,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Component, &mut Scope<'_>) -> R,
    ) -> Option<R> {
        let mut behavior = self.components.get_mut(id.0)?.behavior.take()?;
        let result = {
            let mut scope = Scope::new(self, dom, id);
            f(behavior.as_mut(), &mut scope)
        };
        if let Some(node) = self.components.get_mut(id.0) {
            node.behavior = Some(behavior);
        }
        Some(result)
    }

    // ------------------------------------------------------------------
    // Build / bind
    // ------------------------------------------------------------------

    /// Render the component and assign its root
    pub fn build(&mut self, dom: &mut dyn Platform, id: ComponentId) -> Result<NodeId> {
        if self.node(id)?.root.is_some() {
            return Err(Error::AlreadyBuilt(id));
        }

        self.with_component(dom, id, |c, scope| c.on_before_render(scope));

        let mark = self.node(id)?.children.len();
        self.building.push(id);
        let result = self.render_root(dom, id);
        self.building.pop();
        let root = match result {
            Ok(root) => root,
            Err(err) => {
                self.release_pass(dom, id, mark);
                return Err(err);
            }
        };

        let node = self.node_mut(id)?;
        node.root = Some(root);
        if node.state == Lifecycle::Unbuilt {
            node.state = Lifecycle::Built;
        }
        tracing::debug!("built {} {:?} with root {:?}", node.type_name, id, root);

        self.with_component(dom, id, |c, scope| c.on_render(scope));
        Ok(root)
    }

    fn render_root(&mut self, dom: &mut dyn Platform, id: ComponentId) -> Result<NodeId> {
        let output = self
            .with_component(dom, id, |c, scope| c.render(scope))
            .flatten()
            .ok_or(Error::Render(id))?;
        let rendered = self.materialize(dom, output)?;
        single_root(dom, id, rendered)
    }

    /// Release what a failed render pass left behind: children bound after
    /// `mark` and every owned component
    fn release_pass(&mut self, dom: &mut dyn Platform, id: ComponentId, mark: usize) {
        let Some(node) = self.components.get_mut(id.0) else {
            return;
        };
        let mut dropped = node.children.split_off(mark.min(node.children.len()));
        dropped.append(&mut node.owned);
        tracing::debug!("releasing {} components of failed build {:?}", dropped.len(), id);
        for component in dropped {
            self.release(dom, component);
        }
    }

    /// Hand an unbound, freshly built component to the component being
    /// built, or to the unowned list when there is none
    pub(crate) fn adopt(&mut self, id: ComponentId) {
        match self.building.last().copied() {
            Some(owner) => {
                if let Some(node) = self.components.get_mut(owner.0) {
                    node.owned.push(id);
                }
                if let Some(node) = self.components.get_mut(id.0) {
                    node.owner = Some(owner);
                }
            }
            None => self.unowned.push(id),
        }
    }

    /// Drop `id` from whichever owned or unowned list holds it
    fn disown(&mut self, id: ComponentId) {
        let owner = self.components.get_mut(id.0).and_then(|n| n.owner.take());
        if let Some(owner) = owner.and_then(|o| self.components.get_mut(o.0)) {
            owner.owned.retain(|c| *c != id);
        }
        self.unowned.retain(|c| *c != id);
    }

    /// Destroy every component on the unowned list
    pub fn release_unowned(&mut self, dom: &mut dyn Platform) {
        for id in std::mem::take(&mut self.unowned) {
            self.destroy(dom, id);
        }
    }

    /// Bind under `parent`, attaching right away if the parent is attached.
    /// `parent == id` self-binds a root component and attaches it.
    pub fn bind(&mut self, dom: &mut dyn Platform, id: ComponentId, parent: ComponentId) -> Result<()> {
        if self.node(id)?.parent.is_some() {
            return Err(Error::AlreadyBound(id));
        }

        if parent == id {
            if self.node(id)?.root.is_none() {
                return Err(Error::NotRendered(id));
            }
            self.disown(id);
            self.node_mut(id)?.parent = Some(id);
            tracing::debug!("self-bound {:?}", id);
            self.attach(dom, id);
            return Ok(());
        }

        let parent_attached = self.node(parent)?.attached;
        if self.is_ancestor(id, parent) {
            return Err(Error::Cycle { child: id, parent });
        }
        self.disown(id);
        self.node_mut(parent)?.children.push(id);
        let node = self.node_mut(id)?;
        node.parent = Some(parent);
        node.state = Lifecycle::Bound;
        tracing::debug!("bound {:?} under {:?}", id, parent);

        if parent_attached {
            self.attach(dom, id);
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: ComponentId, mut id: ComponentId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) if parent != id => id = parent,
                _ => return false,
            }
        }
    }

    // ------------------------------------------------------------------
    // Composite operations
    // ------------------------------------------------------------------

    /// Build, insert the root into `target` (default: the parent's root)
    /// before `before` (default: append), then bind under `parent`
    pub fn create(
        &mut self,
        dom: &mut dyn Platform,
        id: ComponentId,
        parent: ComponentId,
        target: Option<Target>,
        before: Option<Before>,
    ) -> Result<()> {
        let target = match target {
            None => self.root_of(parent)?,
            Some(Target::Node(node)) => node,
            Some(Target::Component(component)) => self.root_of(component)?,
        };
        let before = match before {
            None => None,
            Some(Before::Node(node)) => Some(node),
            Some(Before::Component(component)) => Some(self.root_of(component)?),
            Some(Before::Index(index)) => dom.child_elements(target).get(index).copied(),
        };

        let root = self.build(dom, id)?;
        dom.insert_before(target, root, before)?;
        self.bind(dom, id, parent)
    }

    /// Build, swap the root in for `target`, then bind under `parent`.
    /// A component target is destroyed after the swap.
    pub fn replace(
        &mut self,
        dom: &mut dyn Platform,
        id: ComponentId,
        parent: ComponentId,
        target: Target,
    ) -> Result<()> {
        match target {
            Target::Component(old) => {
                let old_root = self.root_of(old)?;
                let root = self.build(dom, id)?;
                dom.replace_with(old_root, root)?;
                self.destroy(dom, old);
            }
            Target::Node(old_root) => {
                let root = self.build(dom, id)?;
                dom.replace_with(old_root, root)?;
            }
        }
        self.bind(dom, id, parent)
    }

    /// Build, append the root under `target` and self-bind.
    /// Meant for the one root component of a tree.
    pub fn create_orphanized(
        &mut self,
        dom: &mut dyn Platform,
        id: ComponentId,
        target: NodeId,
    ) -> Result<()> {
        let root = self.build(dom, id)?;
        dom.append_child(target, root)?;
        self.bind(dom, id, id)
    }

    /// Remove the root from the document, unlink from the parent, detach
    /// the subtree and release the component. Safe to repeat.
    pub fn destroy(&mut self, dom: &mut dyn Platform, id: ComponentId) {
        let Some(node) = self.components.get(id.0) else {
            tracing::trace!("destroy of released component {:?}", id);
            return;
        };
        let (root, parent) = (node.root, node.parent);

        if let Some(root) = root {
            dom.remove(root);
        }
        if let Some(parent) = parent.filter(|p| *p != id) {
            if let Some(parent) = self.components.get_mut(parent.0) {
                if let Some(index) = parent.children.iter().position(|c| *c == id) {
                    parent.children.remove(index);
                }
            }
        }
        self.disown(id);
        self.detach(dom, id);
        self.components.remove(id.0);
        tracing::debug!("destroyed {:?}", id);
    }

    // ------------------------------------------------------------------
    // Attach / detach
    // ------------------------------------------------------------------

    /// Post-order: every child is attached before this component is marked
    /// and notified
    fn attach(&mut self, dom: &mut dyn Platform, id: ComponentId) {
        let Some(children) = self.components.get(id.0).map(|n| n.children.clone()) else {
            return;
        };
        for child in children {
            if !self.is_attached(child) {
                self.attach(dom, child);
            }
        }

        let Some(node) = self.components.get_mut(id.0) else {
            return;
        };
        node.attached = true;
        node.state = Lifecycle::Attached;
        tracing::debug!("attached {} {:?}", node.type_name, id);
        self.with_component(dom, id, |c, scope| c.on_attach(scope));
    }

    /// Detach every child (attached or not) and every owned component,
    /// then reset this component and notify it. Children and owned
    /// components are released; the caller releases `id`.
    fn detach(&mut self, dom: &mut dyn Platform, id: ComponentId) {
        let Some((children, owned)) = self
            .components
            .get_mut(id.0)
            .map(|n| (std::mem::take(&mut n.children), std::mem::take(&mut n.owned)))
        else {
            return;
        };
        for component in children.into_iter().chain(owned) {
            self.release(dom, component);
        }

        let Some(node) = self.components.get_mut(id.0) else {
            return;
        };
        node.attached = false;
        node.refs.clear();
        node.state = Lifecycle::Detached;
        tracing::debug!("detached {} {:?}", node.type_name, id);
        self.with_component(dom, id, |c, scope| c.on_detach(scope));

        if let Some(node) = self.components.get_mut(id.0) {
            node.root = None;
            node.parent = None;
        }
    }

    fn release(&mut self, dom: &mut dyn Platform, id: ComponentId) {
        self.detach(dom, id);
        self.components.remove(id.0);
    }

    // ------------------------------------------------------------------
    // Refs
    // ------------------------------------------------------------------

    /// Invoke a ref setter. Owner refs bind components before recording.
    pub(crate) fn apply_ref(
        &mut self,
        dom: &mut dyn Platform,
        node_ref: &Ref,
        target: RefTarget,
    ) -> Result<()> {
        match node_ref {
            Ref::Owner { owner, key } => {
                if let RefTarget::Component(child) = &target {
                    self.bind(dom, *child, *owner)?;
                }
                if let Some(key) = key {
                    self.node_mut(*owner)?.refs.insert(key.clone(), target);
                }
            }
            Ref::Callback(callback) => callback(target),
        }
        Ok(())
    }
}

/// The single live node a render produced
fn single_root(dom: &mut dyn Platform, id: ComponentId, rendered: Child) -> Result<NodeId> {
    let mut leaves = flatten(rendered);
    if leaves.len() > 1 {
        return Err(Error::MultipleRoots(id, leaves.len()));
    }
    match leaves.pop() {
        Some(Child::Node(node)) => Ok(node),
        Some(Child::Text(text)) => Ok(dom.create_text_node(&text)),
        Some(Child::Slot(slot)) => Err(Error::UnextractedSlot(slot.name().to_string())),
        // descriptions and sequences are gone after materialize + flatten
        Some(Child::Element(_)) | Some(Child::List(_)) | Some(Child::Empty) | None => {
            Err(Error::Render(id))
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("components", &self.components.len())
            .field("unowned", &self.unowned.len())
            .field("config", &self.config)
            .finish()
    }
}
