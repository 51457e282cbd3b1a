//! Component trait and the scope handed to it
//!
//! A concrete component owns its props and implements `render`. The
//! runtime owns everything else: root, parent, children, refs and the
//! attached flag.

use fos_dom::NodeId;

use crate::arena::GenIndex;
use crate::{Child, Platform, Ref, RefTarget, Runtime};

/// Handle to a component in a [`Runtime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub(crate) GenIndex);

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, no root yet
    Unbuilt,
    /// Root assigned, not bound
    Built,
    /// Listed under a parent that is not attached
    Bound,
    /// Attach notification delivered to it and all its children
    Attached,
    /// Inside its detach notification
    Detached,
    /// Released; the handle no longer resolves
    Destroyed,
}

/// A stateful node with a root element and a lifecycle.
///
/// Hooks are no-ops by default. `on_attach` and `on_detach` fire exactly
/// once per cycle, children strictly before their ancestors on attach.
pub trait Component: 'static {
    /// Produce the description (or live node) that becomes the root.
    /// `None` fails the build.
    fn render(&mut self, scope: &mut Scope<'_>) -> Option<Child>;

    /// Called in build before `render`
    fn on_before_render(&mut self, _scope: &mut Scope<'_>) {}

    /// Called in build after the root is set
    fn on_render(&mut self, _scope: &mut Scope<'_>) {}

    /// Called once this component and all its children are attached
    fn on_attach(&mut self, _scope: &mut Scope<'_>) {}

    /// Called after children are detached and refs cleared
    fn on_detach(&mut self, _scope: &mut Scope<'_>) {}
}

/// The runtime as seen from inside one component
pub struct Scope<'a> {
    runtime: &'a mut Runtime,
    dom: &'a mut dyn Platform,
    id: ComponentId,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(runtime: &'a mut Runtime, dom: &'a mut dyn Platform, id: ComponentId) -> Self {
        Self { runtime, dom, id }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.runtime.root(self.id)
    }

    pub fn is_attached(&self) -> bool {
        self.runtime.is_attached(self.id)
    }

    /// Ref setter recording its target under `key` in this component's refs.
    /// Components passed to it are bound as children first.
    pub fn node_ref(&self, key: &str) -> Ref {
        Ref::Owner {
            owner: self.id,
            key: Some(key.to_string()),
        }
    }

    /// Ref setter that only binds components as children
    pub fn bind_ref(&self) -> Ref {
        Ref::Owner {
            owner: self.id,
            key: None,
        }
    }

    pub fn get_ref(&self, key: &str) -> Option<&RefTarget> {
        self.runtime.get_ref(self.id, key)
    }

    /// Node stored under `key`
    pub fn ref_node(&self, key: &str) -> Option<NodeId> {
        self.get_ref(key).and_then(RefTarget::as_node)
    }

    /// Component stored under `key`
    pub fn ref_component(&self, key: &str) -> Option<ComponentId> {
        self.get_ref(key).and_then(RefTarget::as_component)
    }

    pub fn runtime(&mut self) -> &mut Runtime {
        &mut *self.runtime
    }

    pub fn dom(&mut self) -> &mut dyn Platform {
        &mut *self.dom
    }

    /// Both halves at once, for calling runtime operations from a hook
    pub fn parts(&mut self) -> (&mut Runtime, &mut dyn Platform) {
        (&mut *self.runtime, &mut *self.dom)
    }
}
