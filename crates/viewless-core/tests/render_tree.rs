use std::cell::Cell;
use std::rc::Rc;

use viewless_core::testing::TestApp;
use viewless_core::{
    render_component, to_children, use_viewless_component, Adaptor, AdaptorMap, Child, EventHandler,
    FlatOption, FlatValue, PropValue, Reactive, RenderContext, RenderOptions, SlotContent, Target,
    UiComponent, VNode,
};

fn leaves(children: &[Child]) -> Vec<String> {
    children
        .iter()
        .map(|child| match child {
            Child::Text(text) => text.clone(),
            Child::Node(node) => format!("<{}>", node.target.name()),
        })
        .collect()
}

#[test]
fn div_with_text_slot() {
    let node = render_component(
        UiComponent::new("div").slot("default", "hello"),
        &RenderContext::new(),
    );
    assert_eq!(node.target, Target::from("div"));
    let children = node.slot("default").unwrap_or_default();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].as_text(), Some("hello"));
}

#[test]
fn deep_nesting_flattens_depth_first() {
    let content = SlotContent::List(vec![
        "a".into(),
        SlotContent::List(vec![
            SlotContent::List(vec![1.into(), SlotContent::List(vec!["b".into()])]),
            SlotContent::produce(|| SlotContent::List(vec!["c".into(), SlotContent::Empty])),
        ]),
        "d".into(),
    ]);
    let out = to_children(&content, &RenderContext::new());
    assert_eq!(leaves(&out), ["a", "1", "b", "c", "d"]);
}

#[test]
fn mixed_arrays_keep_order() {
    let prebuilt: VNode = render_component(UiComponent::new("hr"), &RenderContext::new());
    let content = SlotContent::List(vec![
        "text".into(),
        UiComponent::new("span").into(),
        2.5.into(),
        prebuilt.into(),
        SlotContent::produce(|| UiComponent::new("em").into()),
        SlotContent::Value(PropValue::from(true)),
    ]);
    let out = to_children(&content, &RenderContext::new());
    assert_eq!(leaves(&out), ["text", "<span>", "2.5", "<hr>", "<em>", "true"]);
}

#[test]
fn produce_sequence_is_associative_and_repeatable() {
    let a: SlotContent = vec![UiComponent::new("i"), UiComponent::new("b")].into();
    let b = SlotContent::produce(|| "tail".into());
    let cx = RenderContext::new();

    let joined = leaves(&to_children(&SlotContent::List(vec![a.clone(), b.clone()]), &cx));
    let mut separate = leaves(&to_children(&SlotContent::List(vec![a]), &cx));
    separate.extend(leaves(&to_children(&SlotContent::List(vec![b]), &cx)));
    assert_eq!(joined, separate);

    let content = SlotContent::List(vec!["x".into(), 3.into()]);
    assert_eq!(
        leaves(&to_children(&content, &cx)),
        leaves(&to_children(&content, &cx))
    );
}

#[test]
fn events_render_with_the_configured_prefix() {
    let ui = UiComponent::new("input").on("update:modelValue", EventHandler::new(|_| {}));
    let node = render_component(ui.clone(), &RenderContext::new());
    assert!(node.prop("onUpdate:modelValue").is_some());

    let cx = RenderContext::new().with_options(RenderOptions::new().with_event_prefix("handle"));
    let node = render_component(ui, &cx);
    assert!(node.prop("handleUpdate:modelValue").is_some());
    assert!(node.prop("onUpdate:modelValue").is_none());
}

#[test]
fn visibility_static_and_boxed() {
    let hidden = render_component(UiComponent::new("p").visible(false), &RenderContext::new());
    assert!(hidden.is_hidden());

    let shown = Reactive::new(true);
    let ui = UiComponent::new("p")
        .prop("style", PropValue::map([("color", "red")]))
        .visible(shown.clone());
    let node = render_component(ui.clone(), &RenderContext::new());
    assert!(!node.is_hidden());
    assert_eq!(
        node.style().and_then(|s| s.get("color")).cloned(),
        Some(PropValue::from("red"))
    );

    shown.set(false);
    let node = render_component(ui, &RenderContext::new());
    assert!(node.is_hidden());
    assert_eq!(node.style().map(|s| s.len()), Some(2));
}

#[test]
fn adaptor_runs_for_every_node_in_slots() {
    let adaptor = Adaptor::from_map(
        AdaptorMap::new()
            .with("Box", |mut option| {
                option.target = Target::from("section");
                option
            })
            .with("Label", |mut option| {
                option.target = Target::from("span");
                option
            }),
    );
    let tree = UiComponent::new("Box").slot(
        "default",
        vec![
            UiComponent::new("Label").slot("default", "one"),
            UiComponent::new("Box").slot("default", UiComponent::new("Label").slot("default", "two")),
        ],
    );
    let mut app = TestApp::new(tree).with_environment({
        let mut env = viewless_core::Environment::default();
        env.adaptor = Some(adaptor);
        env
    });
    app.mount().unwrap();
    assert_eq!(app.find_all("section").len(), 2);
    assert_eq!(app.find_all("span").len(), 2);
    assert_eq!(app.find("section").map(|n| n.text()).as_deref(), Some("onetwo"));
}

#[test]
fn flat_options_drive_the_whole_pipeline() {
    let clicks = Rc::new(Cell::new(0));
    let c = Rc::clone(&clicks);
    let (label, label_value) = PropValue::reactive("before");
    let button = use_viewless_component(
        "button",
        FlatOption::new()
            .set("$key", "submit")
            .set("type", "primary")
            .set("onClick", FlatValue::handler(move |_| c.set(c.get() + 1)))
            .set("defaultSlot", label_value),
    );

    let mut app = TestApp::new(button);
    app.mount().unwrap();
    let node = app.find("button").unwrap();
    assert_eq!(node.text(), "before");
    assert_eq!(node.prop("type"), Some(&PropValue::from("primary")));
    assert!(node.emit("click", &[]));
    assert_eq!(clicks.get(), 1);

    label.set("after".into());
    app.rerender().unwrap();
    assert_eq!(app.find("button").map(|n| n.text()).as_deref(), Some("after"));
}
