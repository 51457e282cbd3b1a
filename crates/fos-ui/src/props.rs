//! Props: the key/value payload of a node description
//!
//! Intrinsic elements interpret the entries as attributes, listeners and
//! styles. Components and function components receive them untouched.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use fos_dom::{Event, EventListener, NodeId};

use crate::{Child, Collect, ComponentId};

/// A single prop value
#[derive(Clone)]
pub enum Prop {
    Undefined,
    Null,
    Bool(bool),
    Str(String),
    Number(f64),
    /// Nested sequence (`class={["a", cond && "b"]}`)
    List(Vec<Prop>),
    /// Style declarations copied onto `element.style`
    Style(Vec<(String, String)>),
    /// Event handler (for `on*` keys)
    Handler(EventListener),
    /// Opaque value for component props
    Any(Rc<dyn Any>),
}

impl Prop {
    pub fn handler(f: impl Fn(&Event) + 'static) -> Self {
        Prop::Handler(Rc::new(f))
    }

    pub fn style<K, V>(declarations: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Prop::Style(
            declarations
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn any<T: Any>(value: T) -> Self {
        Prop::Any(Rc::new(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Prop::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Prop::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Prop::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Prop::Any(value) => value.downcast_ref(),
            _ => None,
        }
    }

    /// String form used when the value lands in an attribute.
    /// `None` for values that have no textual form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Prop::Str(s) => Some(s.clone()),
            Prop::Number(n) => Some(format_number(*n)),
            Prop::Bool(b) => Some(b.to_string()),
            Prop::Null => Some("null".to_string()),
            Prop::List(items) => Some(
                items
                    .iter()
                    .map(|item| match item {
                        Prop::Undefined | Prop::Null => String::new(),
                        other => other.to_text().unwrap_or_default(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Prop::Undefined | Prop::Style(_) | Prop::Handler(_) | Prop::Any(_) => None,
        }
    }
}

/// Number formatting that matches how a browser stringifies numbers
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else {
        n.to_string()
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Undefined => write!(f, "Undefined"),
            Prop::Null => write!(f, "Null"),
            Prop::Bool(b) => write!(f, "Bool({})", b),
            Prop::Str(s) => write!(f, "Str({:?})", s),
            Prop::Number(n) => write!(f, "Number({})", n),
            Prop::List(items) => f.debug_tuple("List").field(items).finish(),
            Prop::Style(decls) => f.debug_tuple("Style").field(decls).finish(),
            Prop::Handler(_) => write!(f, "Handler(..)"),
            Prop::Any(_) => write!(f, "Any(..)"),
        }
    }
}

impl Collect for Prop {
    fn is_hole(&self) -> bool {
        matches!(self, Prop::Undefined | Prop::Null | Prop::Bool(false))
    }

    fn into_items(self) -> Result<Vec<Self>, Self> {
        match self {
            Prop::List(items) => Ok(items),
            other => Err(other),
        }
    }
}

impl From<&str> for Prop {
    fn from(s: &str) -> Self {
        Prop::Str(s.to_string())
    }
}

impl From<String> for Prop {
    fn from(s: String) -> Self {
        Prop::Str(s)
    }
}

impl From<bool> for Prop {
    fn from(b: bool) -> Self {
        Prop::Bool(b)
    }
}

macro_rules! number_prop {
    ($($t:ty),*) => {
        $(impl From<$t> for Prop {
            fn from(n: $t) -> Self {
                Prop::Number(n as f64)
            }
        })*
    };
}

number_prop!(f64, f32, i32, i64, u32, u64, usize);

impl<T: Into<Prop>> From<Vec<T>> for Prop {
    fn from(items: Vec<T>) -> Self {
        Prop::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Prop>> From<Option<T>> for Prop {
    fn from(value: Option<T>) -> Self {
        value.map_or(Prop::Undefined, Into::into)
    }
}

/// What a ref receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    Node(NodeId),
    /// The component instance, not its root
    Component(ComponentId),
    /// Fragment-shaped output of a function component
    Nodes(Vec<NodeId>),
}

impl RefTarget {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            RefTarget::Node(node) => Some(*node),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<ComponentId> {
        match self {
            RefTarget::Component(id) => Some(*id),
            _ => None,
        }
    }
}

/// A ref setter attached to a description through the `ref` prop
#[derive(Clone)]
pub enum Ref {
    /// Bound to an owning component (see `Scope::node_ref`). Components are
    /// bound under `owner`; with a key the target is recorded in its refs.
    Owner {
        owner: ComponentId,
        key: Option<String>,
    },
    /// Arbitrary callback
    Callback(Rc<dyn Fn(RefTarget)>),
}

impl Ref {
    pub fn callback(f: impl Fn(RefTarget) + 'static) -> Self {
        Ref::Callback(Rc::new(f))
    }
}

impl fmt::Debug for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ref::Owner { owner, key } => f
                .debug_struct("Owner")
                .field("owner", owner)
                .field("key", key)
                .finish(),
            Ref::Callback(_) => write!(f, "Callback(..)"),
        }
    }
}

/// Ordered prop entries plus the `children` and `ref` slots
#[derive(Debug, Clone, Default)]
pub struct Props {
    entries: Vec<(String, Prop)>,
    children: Child,
    node_ref: Option<Ref>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Props::set`]
    pub fn with(mut self, key: &str, value: impl Into<Prop>) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key`, replacing an existing entry in place
    pub fn set(&mut self, key: &str, value: impl Into<Prop>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Register an event handler under `key` (`"onClick"`)
    pub fn on(self, key: &str, f: impl Fn(&Event) + 'static) -> Self {
        self.with(key, Prop::handler(f))
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Prop::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Prop> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Prop)> {
        self.entries
    }

    pub fn children(&self) -> &Child {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Child {
        &mut self.children
    }

    pub fn set_children(&mut self, children: impl Into<Child>) {
        self.children = children.into();
    }

    pub fn with_children(mut self, children: impl Into<Child>) -> Self {
        self.set_children(children);
        self
    }

    /// Take the children, leaving [`Child::Empty`]
    pub fn take_children(&mut self) -> Child {
        std::mem::take(&mut self.children)
    }

    pub fn node_ref(&self) -> Option<&Ref> {
        self.node_ref.as_ref()
    }

    pub fn with_ref(mut self, node_ref: Ref) -> Self {
        self.node_ref = Some(node_ref);
        self
    }

    pub fn take_ref(&mut self) -> Option<Ref> {
        self.node_ref.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut props = Props::new().with("a", 1_i32).with("b", "two");
        props.set("a", true);

        let keys: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(props.get("a").and_then(Prop::as_bool), Some(true));
        assert_eq!(props.get_str("b"), Some("two"));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Prop::from(3_i32).to_text().as_deref(), Some("3"));
        assert_eq!(Prop::from(0.5_f64).to_text().as_deref(), Some("0.5"));
        assert_eq!(Prop::Number(f64::INFINITY).to_text().as_deref(), Some("Infinity"));
        assert_eq!(Prop::from(vec![1_i32, 2]).to_text().as_deref(), Some("1,2"));
        assert_eq!(Prop::Undefined.to_text(), None);
        assert_eq!(Prop::handler(|_| {}).to_text(), None);
    }

    #[test]
    fn test_option_prop() {
        assert!(matches!(Prop::from(None::<&str>), Prop::Undefined));
        assert_eq!(Prop::from(Some("x")).as_str(), Some("x"));
    }

    #[test]
    fn test_any_downcast() {
        #[derive(Debug, PartialEq)]
        struct Model(u8);

        let props = Props::new().with("model", Prop::any(Model(7)));
        assert_eq!(props.get("model").and_then(Prop::downcast_ref::<Model>), Some(&Model(7)));
        assert_eq!(props.get("model").and_then(Prop::downcast_ref::<u8>), None);
    }

    #[test]
    fn test_take_children_and_ref() {
        let mut props = Props::new()
            .with_children("hi")
            .with_ref(Ref::callback(|_| {}));

        assert!(matches!(props.take_children(), Child::Text(t) if t == "hi"));
        assert!(matches!(props.children(), Child::Empty));
        assert!(props.take_ref().is_some());
        assert!(props.node_ref().is_none());
    }
}
