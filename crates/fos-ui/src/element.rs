//! Node descriptions
//!
//! What a compiled call site hands to the runtime: a node type plus its
//! props. Descriptions stay inert until materialized.

use std::fmt;
use std::rc::Rc;

use fos_dom::NodeId;

use crate::{Collect, Component, Props, Slot};

/// Plain function component
pub type FunctionComponent = Rc<dyn Fn(Props) -> Child>;

/// A component class: constructs a fresh [`Component`] from props
#[derive(Clone)]
pub struct ComponentType {
    name: &'static str,
    construct: Rc<dyn Fn(Props) -> Box<dyn Component>>,
}

impl ComponentType {
    pub fn new<C, F>(ctor: F) -> Self
    where
        C: Component,
        F: Fn(Props) -> C + 'static,
    {
        Self {
            name: std::any::type_name::<C>(),
            construct: Rc::new(move |props| -> Box<dyn Component> { Box::new(ctor(props)) }),
        }
    }

    /// Type name of the constructed component
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn construct(&self, props: Props) -> Box<dyn Component> {
        (self.construct)(props)
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({})", self.name)
    }
}

/// Kind of a node description, decided once when the description is made
#[derive(Clone)]
pub enum ElementType {
    /// Text node sentinel
    Text,
    /// Host element by tag name
    Intrinsic(String),
    Component(ComponentType),
    Function(FunctionComponent),
    /// Children pass through without a node of their own
    Fragment,
}

impl ElementType {
    /// Host element, even for tags that would otherwise map to a sentinel
    /// (SVG `<text>`)
    pub fn intrinsic(tag: impl Into<String>) -> Self {
        ElementType::Intrinsic(tag.into())
    }

    pub fn component<C, F>(ctor: F) -> Self
    where
        C: Component,
        F: Fn(Props) -> C + 'static,
    {
        ElementType::Component(ComponentType::new(ctor))
    }

    pub fn function(f: impl Fn(Props) -> Child + 'static) -> Self {
        ElementType::Function(Rc::new(f))
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Intrinsic(_) => "intrinsic",
            ElementType::Component(_) => "component",
            ElementType::Function(_) => "function",
            ElementType::Fragment => "fragment",
        }
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => ElementType::Text,
            tag => ElementType::Intrinsic(tag.to_string()),
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        if tag == "text" {
            ElementType::Text
        } else {
            ElementType::Intrinsic(tag)
        }
    }
}

impl From<ComponentType> for ElementType {
    fn from(ty: ComponentType) -> Self {
        ElementType::Component(ty)
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Text => write!(f, "Text"),
            ElementType::Intrinsic(tag) => write!(f, "Intrinsic({:?})", tag),
            ElementType::Component(ty) => write!(f, "{:?}", ty),
            ElementType::Function(_) => write!(f, "Function(..)"),
            ElementType::Fragment => write!(f, "Fragment"),
        }
    }
}

/// An unmaterialized node description
#[derive(Debug, Clone)]
pub struct Element {
    pub ty: ElementType,
    pub props: Props,
}

impl Element {
    pub fn new(ty: impl Into<ElementType>, props: Props) -> Self {
        Self {
            ty: ty.into(),
            props,
        }
    }
}

/// A child value: live node, text, description, nested sequence or slot
#[derive(Debug, Clone, Default)]
pub enum Child {
    /// `undefined`, `null` or `false`
    #[default]
    Empty,
    Text(String),
    /// Already materialized node
    Node(NodeId),
    Element(Box<Element>),
    List(Vec<Child>),
    Slot(Slot),
}

impl Child {
    /// The node, if this is a single live node
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Child::Node(node) => Some(*node),
            _ => None,
        }
    }

    /// All live nodes in order, descending into sequences
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_nodes(&mut out);
        out
    }

    fn collect_nodes(&self, out: &mut Vec<NodeId>) {
        match self {
            Child::Node(node) => out.push(*node),
            Child::List(items) => {
                for item in items {
                    item.collect_nodes(out);
                }
            }
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Child::Empty)
    }
}

impl Collect for Child {
    fn is_hole(&self) -> bool {
        matches!(self, Child::Empty)
    }

    fn into_items(self) -> Result<Vec<Self>, Self> {
        match self {
            Child::List(items) => Ok(items),
            other => Err(other),
        }
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::Text(s.to_string())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::Text(s)
    }
}

impl From<NodeId> for Child {
    fn from(node: NodeId) -> Self {
        Child::Node(node)
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Element(Box::new(element))
    }
}

impl From<Slot> for Child {
    fn from(slot: Slot) -> Self {
        Child::Slot(slot)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Child::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Child::Empty, Into::into)
    }
}

macro_rules! number_child {
    ($($t:ty),*) => {
        $(impl From<$t> for Child {
            fn from(n: $t) -> Self {
                Child::Text(n.to_string())
            }
        })*
    };
}

number_child!(i32, i64, u32, u64, usize);

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Text(crate::props::format_number(n))
    }
}

/// Build a description: `h("div", props)`
pub fn h(ty: impl Into<ElementType>, props: Props) -> Child {
    Element::new(ty, props).into()
}

/// Fragment pass-through: the children, unchanged
pub fn fragment(children: impl Into<Child>) -> Child {
    children.into()
}
