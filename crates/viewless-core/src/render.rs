//! The option-tree renderer.
//!
//! [`render_component`] turns one [`UiComponent`] into a host [`VNode`]:
//!
//! 1. If an adaptor is in context, record the option's ref against its
//!    pre-adaptation target, then let the adaptor rewrite the option.
//! 2. Merge the structural attributes (key, ref, visibility and the `show`
//!    directive) and the ambient class/style into the props.  Other
//!    directives ride on the node.
//! 3. Rename defined events to host event props (`click` -> `onClick`).
//! 4. Wrap every slot in a thunk that renders its content lazily under a
//!    context with the ambient attrs cleared.
//! 5. Create the host node with [`h`].
//!
//! Slot content is expanded by [`to_children`], depth-first and left to
//! right, re-evaluating producers on every call.

use std::rc::Rc;
use tracing::{trace, warn};

use crate::context::{Attrs, RenderContext};
use crate::option::{Directive, Events, Key, SlotContent, Slots, UiComponent};
use crate::value::{format_number, unref, PropMap, PropValue};
use crate::vnode::{h, Child, SlotFns, VNode};

/// Upper-case the first character: `update:modelValue` -> `Update:modelValue`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Host prop name for an event.
pub fn host_event_name(prefix: &str, event: &str) -> String {
    format!("{prefix}{}", capitalize(event))
}

/// Render one option into a host node.
pub fn render_component(option: UiComponent, cx: &RenderContext) -> VNode {
    let mut option = option;
    if let Some(adaptor) = &cx.adaptor {
        if let (Some(name), Some(ref_map)) = (&option.ref_name, &cx.ref_map) {
            ref_map.record(name.clone(), option.target.clone());
        }
        option = adaptor.apply(option);
    }

    let UiComponent {
        target,
        props,
        events,
        slots,
        key,
        visible,
        ref_name,
        directives,
    } = option;

    let hidden = visible.is_some_and(|v| !v.is_visible()) || directives.iter().any(Directive::hides);
    let mut host = merge_props(props, key, ref_name, hidden, &cx.attrs);
    host.extend(transform_events(events, &cx.options.event_prefix));
    let slot_fns = transform_slots(slots, &cx.for_slots());

    trace!(target_name = target.name(), props = host.len(), "render node");
    let mut node = h(target, host, slot_fns);
    node.owner = cx.ref_owner.clone();
    node.directives = directives
        .into_iter()
        .filter(|d| d.name != Directive::SHOW)
        .collect();
    node
}

fn merge_props(
    mut props: PropMap,
    key: Option<Key>,
    ref_name: Option<String>,
    hidden: bool,
    attrs: &Attrs,
) -> PropMap {
    if let Some(key) = key {
        props.insert("key".into(), key.into());
    }
    if let Some(ref_name) = ref_name {
        props.insert("ref".into(), ref_name.into());
    }

    // Always a fresh map: local entries first, ambient entries override.
    let mut style = PropMap::new();
    if let Some(local) = props.shift_remove("style") {
        style.extend(parse_style(&local));
    }
    if let Some(ambient) = &attrs.style {
        style.extend(parse_style(ambient));
    }
    if hidden {
        style.insert("display".into(), "none".into());
    }
    if !style.is_empty() {
        props.insert("style".into(), PropValue::Map(style));
    }

    // Ambient class replaces the local one; without it the local class stays.
    if let Some(class) = attrs.class.as_ref().map(unref).filter(|c| !c.is_null()) {
        props.insert("class".into(), class);
    }
    props
}

/// Read a style value into a map.  Accepts a map or a `"a: b; c: d"` string;
/// anything else contributes nothing.
pub fn parse_style(value: &PropValue) -> PropMap {
    match unref(value) {
        PropValue::Map(map) => map,
        PropValue::Str(css) => css
            .split(';')
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_string(), PropValue::from(value.trim())))
            })
            .collect(),
        PropValue::Null => PropMap::new(),
        other => {
            warn!(style = %other, "ignoring style that is neither a map nor a string");
            PropMap::new()
        }
    }
}

/// Host event props for every defined handler.  Undefined handlers are
/// dropped.
pub fn transform_events(events: Events, prefix: &str) -> PropMap {
    events
        .into_iter()
        .filter_map(|(name, handler)| {
            let handler = handler?;
            Some((host_event_name(prefix, &name), PropValue::Handler(handler)))
        })
        .collect()
}

/// One lazy thunk per slot, rendering under `cx`.
pub fn transform_slots(slots: Slots, cx: &RenderContext) -> SlotFns {
    slots
        .into_iter()
        .map(|(name, content)| {
            let cx = cx.clone();
            let thunk: Rc<dyn Fn() -> Vec<Child>> = Rc::new(move || to_children(&content, &cx));
            (name, thunk)
        })
        .collect()
}

/// Expand slot content into a flat, ordered sequence of host children.
pub fn to_children(content: &SlotContent, cx: &RenderContext) -> Vec<Child> {
    let mut out = Vec::new();
    produce_into(content, cx, &mut out);
    out
}

fn produce_into(content: &SlotContent, cx: &RenderContext, out: &mut Vec<Child>) {
    match content {
        SlotContent::Empty => {}
        SlotContent::Text(text) => out.push(Child::Text(text.clone())),
        SlotContent::Number(n) => out.push(Child::Text(format_number(*n))),
        SlotContent::Component(component) => {
            out.push(Child::Node(render_component((**component).clone(), cx)));
        }
        SlotContent::List(items) => {
            for item in items {
                produce_into(item, cx, out);
            }
        }
        SlotContent::Producer(producer) => produce_into(&producer.produce(), cx, out),
        SlotContent::Node(node) => out.push(Child::Node(node.clone())),
        SlotContent::Value(value) => match SlotContent::from(unref(value)) {
            SlotContent::Value(plain) => out.push(Child::Text(plain.to_string())),
            converted => produce_into(&converted, cx, out),
        },
    }
}
