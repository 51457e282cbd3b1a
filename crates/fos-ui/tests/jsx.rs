//! Materialization tests for fos-ui
//!
//! Descriptions in, live nodes out: text sentinel, intrinsic tags,
//! components, function components, fragments and slots.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fos_ui::{
    extract, fragment, h, slot, Child, Component, ComponentType, Config, DomTree, ElementType,
    Error, Event, NodeId, Prop, Props, Ref, RefTarget, Runtime, Scope,
};

fn setup() -> (DomTree, Runtime) {
    (DomTree::new(), Runtime::new())
}

fn node(child: Child) -> NodeId {
    child.node().expect("single node")
}

/// Places its `title` slot in a header and the rest in a section
struct Card {
    props: Props,
}

impl Component for Card {
    fn render(&mut self, _scope: &mut Scope<'_>) -> Option<Child> {
        let mut slots = extract(self.props.children_mut());
        Some(h(
            "article",
            Props::new().with_children(vec![
                h("header", Props::new().with_children(slots.take("title"))),
                h("section", Props::new().with_children(self.props.take_children())),
            ]),
        ))
    }
}

fn card() -> ComponentType {
    ComponentType::new(|props| Card { props })
}

/// Renders a `<p>` from its `text` prop
struct Para {
    props: Props,
}

impl Component for Para {
    fn render(&mut self, _scope: &mut Scope<'_>) -> Option<Child> {
        let text = self.props.get_str("text").unwrap_or_default().to_string();
        Some(h("p", Props::new().with_children(text)))
    }
}

// ============================================================================
// TEXT SENTINEL
// ============================================================================

#[test]
fn test_text_concatenates_children() {
    let (mut dom, mut runtime) = setup();
    let text = runtime
        .create_element(
            &mut dom,
            "text",
            Props::new(),
            vec!["a".into(), Child::Empty, vec![Child::from("b"), 3_i32.into()].into()],
        )
        .unwrap();

    assert_eq!(dom.text_content(node(text)), "ab3");
}

#[test]
fn test_text_value_fallback() {
    let (mut dom, mut runtime) = setup();
    let text = runtime
        .jsx(&mut dom, "text", Props::new().with("value", "fallback"))
        .unwrap();

    assert_eq!(dom.text_content(node(text)), "fallback");
}

#[test]
fn test_text_falsy_value_is_empty() {
    for value in [Prop::Null, Prop::Bool(false), Prop::Undefined] {
        let (mut dom, mut runtime) = setup();
        let text = runtime
            .jsx(&mut dom, "text", Props::new().with("value", value))
            .unwrap();

        assert_eq!(dom.text_content(node(text)), "");
    }
}

#[test]
fn test_text_ref_receives_node() {
    let (mut dom, mut runtime) = setup();
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let text = runtime
        .jsx(
            &mut dom,
            "text",
            Props::new()
                .with_children("hi")
                .with_ref(Ref::callback(move |target| *sink.borrow_mut() = Some(target))),
        )
        .unwrap();

    assert_eq!(*seen.borrow(), Some(RefTarget::Node(node(text))));
}

// ============================================================================
// INTRINSIC ELEMENTS
// ============================================================================

#[test]
fn test_intrinsic_children_in_order() {
    let (mut dom, mut runtime) = setup();
    let existing = dom.create_element("hr");
    let ul = runtime
        .create_element(
            &mut dom,
            "ul",
            Props::new().with("id", "list"),
            vec![
                h("li", Props::new().with_children("one")),
                false.then(|| h("li", Props::new())).into(),
                vec![h("li", Props::new().with_children(2_i32))].into(),
                existing.into(),
            ],
        )
        .unwrap();

    assert_eq!(
        dom.outer_html(node(ul)),
        r#"<ul id="list"><li>one</li><li>2</li><hr></ul>"#
    );
}

#[test]
fn test_attribute_coercion() {
    let (mut dom, mut runtime) = setup();
    let input = node(
        runtime
            .jsx(
                &mut dom,
                "input",
                Props::new()
                    .with("checked", true)
                    .with("disabled", false)
                    .with("placeholder", Prop::Null)
                    .with("title", Prop::Undefined)
                    .with("maxLength", 8_i32)
                    .with("class", vec![Prop::from("a"), false.into(), "b".into()]),
            )
            .unwrap(),
    );

    assert_eq!(dom.get_attribute(input, "checked"), Some(""));
    assert!(!dom.has_attribute(input, "disabled"));
    assert!(!dom.has_attribute(input, "placeholder"));
    assert!(!dom.has_attribute(input, "title"));
    assert_eq!(dom.get_attribute(input, "maxlength"), Some("8"));
    assert_eq!(dom.get_attribute(input, "class"), Some("a b"));
}

#[test]
fn test_class_string_verbatim() {
    let (mut dom, mut runtime) = setup();
    let div = node(
        runtime
            .jsx(&mut dom, "div", Props::new().with("class", "  spaced  out "))
            .unwrap(),
    );

    assert_eq!(dom.get_attribute(div, "class"), Some("  spaced  out "));
}

#[test]
fn test_event_handler_registered_lowercase() {
    let (mut dom, mut runtime) = setup();
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let button = node(
        runtime
            .jsx(
                &mut dom,
                "button",
                Props::new().on("onClick", move |_event| counter.set(counter.get() + 1)),
            )
            .unwrap(),
    );

    dom.dispatch_event(&Event::new("click", button)).unwrap();
    dom.dispatch_event(&Event::new("Click", button)).unwrap();

    assert_eq!(clicks.get(), 1);
    assert!(!dom.has_attribute(button, "onclick"));
}

#[test]
fn test_style_declarations() {
    let (mut dom, mut runtime) = setup();
    let div = node(
        runtime
            .jsx(
                &mut dom,
                "div",
                Props::new().with(
                    "style",
                    Prop::style([("backgroundColor", "red"), ("--gap", "2px")]),
                ),
            )
            .unwrap(),
    );

    assert_eq!(dom.style_property(div, "background-color"), Some("red"));
    assert_eq!(dom.style_property(div, "--gap"), Some("2px"));
}

#[test]
fn test_inner_html() {
    let (mut dom, mut runtime) = setup();
    let div = node(
        runtime
            .jsx(&mut dom, "div", Props::new().with("innerHTML", "<b>raw</b>"))
            .unwrap(),
    );

    assert_eq!(dom.inner_html(div), "<b>raw</b>");
}

#[test]
fn test_inner_html_null_is_empty() {
    let (mut dom, mut runtime) = setup();
    let div = node(
        runtime
            .jsx(&mut dom, "div", Props::new().with("innerHTML", Prop::Null))
            .unwrap(),
    );
    let untouched = node(
        runtime
            .create_element(
                &mut dom,
                "div",
                Props::new().with("innerHTML", Prop::Undefined),
                vec![h("i", Props::new())],
            )
            .unwrap(),
    );

    assert_eq!(dom.inner_html(div), "");
    assert_eq!(dom.inner_html(untouched), "<i></i>");
}

#[test]
fn test_class_name_is_a_plain_attribute() {
    let (mut dom, mut runtime) = setup();
    let div = node(
        runtime
            .jsx(&mut dom, "div", Props::new().with("className", "x"))
            .unwrap(),
    );

    assert_eq!(dom.get_attribute(div, "classname"), Some("x"));
    assert!(!dom.has_attribute(div, "class"));
}

#[test]
fn test_intrinsic_ref_receives_element() {
    let (mut dom, mut runtime) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let div = node(
        runtime
            .jsx(
                &mut dom,
                "div",
                Props::new().with_ref(Ref::callback(move |target| sink.borrow_mut().push(target))),
            )
            .unwrap(),
    );

    assert_eq!(*seen.borrow(), vec![RefTarget::Node(div)]);
}

// ============================================================================
// SVG NAMESPACE
// ============================================================================

#[test]
fn test_svg_namespace_inherited() {
    let (mut dom, mut runtime) = setup();
    let svg = node(
        runtime
            .create_element(
                &mut dom,
                "svg",
                Props::new().with("viewBox", "0 0 10 10"),
                vec![
                    h(ElementType::intrinsic("text"), Props::new().with_children("label")),
                    h(
                        "foreignObject",
                        Props::new().with_children(h("div", Props::new())),
                    ),
                ],
            )
            .unwrap(),
    );

    assert_eq!(dom.namespace(svg), Some(fos_dom::SVG_NAMESPACE));
    assert_eq!(dom.get_attribute(svg, "viewBox"), Some("0 0 10 10"));

    let children = dom.child_elements(svg);
    assert_eq!(dom.tag_name(children[0]), Some("text"));
    assert_eq!(dom.namespace(children[0]), Some(fos_dom::SVG_NAMESPACE));
    assert_eq!(dom.namespace(children[1]), Some(fos_dom::SVG_NAMESPACE));

    let div = dom.child_elements(children[1])[0];
    assert_eq!(dom.namespace(div), None);
}

#[test]
fn test_svg_tags_from_config() {
    let mut dom = DomTree::new();
    let config = Config::from_json(r#"{ "svg_tags": ["scene"] }"#).unwrap();
    let mut runtime = Runtime::with_config(config);

    let scene = node(runtime.jsx(&mut dom, "scene", Props::new()).unwrap());
    let svg = node(runtime.jsx(&mut dom, "svg", Props::new()).unwrap());

    assert_eq!(dom.namespace(scene), Some(fos_dom::SVG_NAMESPACE));
    assert_eq!(dom.namespace(svg), None);
}

// ============================================================================
// COMPONENTS
// ============================================================================

#[test]
fn test_component_returns_root_and_ref_gets_component() {
    let (mut dom, mut runtime) = setup();
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let para = ComponentType::new(|props| Para { props });

    let p = node(
        runtime
            .jsx(
                &mut dom,
                para,
                Props::new()
                    .with("text", "hello")
                    .with_ref(Ref::callback(move |target| *sink.borrow_mut() = Some(target))),
            )
            .unwrap(),
    );

    assert_eq!(dom.outer_html(p), "<p>hello</p>");
    let id = seen.borrow().as_ref().and_then(RefTarget::as_component).unwrap();
    assert_eq!(runtime.root(id), Some(p));
}

#[test]
fn test_component_slots() {
    let (mut dom, mut runtime) = setup();
    let article = runtime
        .create_element(
            &mut dom,
            card(),
            Props::new(),
            vec![
                h("p", Props::new().with_children("body")),
                slot("title", "Hello"),
            ],
        )
        .unwrap();

    assert_eq!(
        dom.outer_html(node(article)),
        "<article><header>Hello</header><section><p>body</p></section></article>"
    );
}

#[test]
fn test_slot_function_form() {
    let (mut dom, mut runtime) = setup();
    let title = h(
        ElementType::slot(),
        Props::new().with("name", "title").with_children(h("em", Props::new().with_children("T"))),
    );
    let article = runtime
        .create_element(&mut dom, card(), Props::new(), vec![title])
        .unwrap();

    assert_eq!(
        dom.outer_html(node(article)),
        "<article><header><em>T</em></header><section></section></article>"
    );
}

#[test]
fn test_unextracted_slot_fails() {
    let (mut dom, mut runtime) = setup();
    let err = runtime
        .create_element(&mut dom, "div", Props::new(), vec![slot("stray", "x")])
        .unwrap_err();

    assert!(matches!(err, Error::UnextractedSlot(name) if name == "stray"));
}

#[test]
fn test_failed_component_is_released() {
    struct Broken;

    impl Component for Broken {
        fn render(&mut self, _scope: &mut Scope<'_>) -> Option<Child> {
            None
        }
    }

    let (mut dom, mut runtime) = setup();
    let err = runtime
        .jsx(&mut dom, ComponentType::new(|_| Broken), Props::new())
        .unwrap_err();

    assert!(matches!(err, Error::Render(_)));
    assert!(runtime.is_empty());
}

// ============================================================================
// FUNCTIONS AND FRAGMENTS
// ============================================================================

#[test]
fn test_function_component() {
    let (mut dom, mut runtime) = setup();
    let emphasis = ElementType::function(|props: Props| {
        h("em", Props::new().with_children(props.children().clone()))
    });

    let em = node(
        runtime
            .create_element(&mut dom, emphasis, Props::new(), vec!["x".into()])
            .unwrap(),
    );

    assert_eq!(dom.outer_html(em), "<em>x</em>");
}

#[test]
fn test_function_fragment_ref_receives_nodes() {
    let (mut dom, mut runtime) = setup();
    let pair = ElementType::function(|_props: Props| {
        fragment(vec![h("dt", Props::new()), h("dd", Props::new())])
    });
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();

    let out = runtime
        .jsx(
            &mut dom,
            pair,
            Props::new().with_ref(Ref::callback(move |target| *sink.borrow_mut() = Some(target))),
        )
        .unwrap();

    let nodes = out.nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(*seen.borrow(), Some(RefTarget::Nodes(nodes)));
}

#[test]
fn test_fragment_passes_children_through() {
    let (mut dom, mut runtime) = setup();
    let out = runtime
        .create_element(
            &mut dom,
            ElementType::Fragment,
            Props::new(),
            vec![h("a", Props::new()), "tail".into()],
        )
        .unwrap();

    let Child::List(items) = out else {
        panic!("expected a sequence");
    };
    assert_eq!(items.len(), 2);
    assert!(items[0].node().is_some());
    assert!(matches!(&items[1], Child::Text(t) if t == "tail"));
}

#[test]
fn test_fragment_inside_element_is_flattened() {
    let (mut dom, mut runtime) = setup();
    let div = node(
        runtime
            .create_element(
                &mut dom,
                "div",
                Props::new(),
                vec![fragment(vec![h("b", Props::new()), h("i", Props::new())])],
            )
            .unwrap(),
    );

    assert_eq!(dom.outer_html(div), "<div><b></b><i></i></div>");
}
