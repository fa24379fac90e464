//! Host-native nodes and the `h` creation primitive.

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

use crate::option::{Directive, Key, Target};
use crate::template_ref::RefOwner;
use crate::value::{unref, PropMap, PropValue};

/// A slot thunk: evaluates slot content into host children when invoked.
pub type SlotFn = Rc<dyn Fn() -> Vec<Child>>;

/// Named slot thunks of a host node.
pub type SlotFns = IndexMap<String, SlotFn>;

/// One host-renderable leaf produced by a slot.
#[derive(Clone, Debug)]
pub enum Child {
    Text(String),
    Node(VNode),
}

impl Child {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&VNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Text(_) => None,
        }
    }
}

/// A host node: target, merged props (including `on*` handlers), and slot
/// thunks.  `key` and `ref` are lifted out of the props by [`h`].
#[derive(Clone)]
pub struct VNode {
    pub target: Target,
    pub key: Option<Key>,
    pub ref_name: Option<String>,
    pub props: PropMap,
    pub slots: SlotFns,
    /// The instance whose template refs this node's `ref` binds into.
    pub owner: Option<RefOwner>,
    /// Directives left for the host to apply.
    pub directives: Vec<Directive>,
}

/// Create a host node.
///
/// `key` and `ref` entries are removed from `props` and stored on the node.
pub fn h(target: impl Into<Target>, mut props: PropMap, slots: SlotFns) -> VNode {
    let key = props.shift_remove("key").and_then(|k| Key::from_value(&k));
    let ref_name = props
        .shift_remove("ref")
        .map(|r| unref(&r))
        .filter(|r| !r.is_null())
        .map(|r| r.to_string());
    VNode {
        target: target.into(),
        key,
        ref_name,
        props,
        slots,
        owner: None,
        directives: Vec::new(),
    }
}

impl VNode {
    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// Evaluate a slot.  Every call re-runs the thunk.
    pub fn slot(&self, name: &str) -> Option<Vec<Child>> {
        self.slots.get(name).map(|slot| slot())
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// The merged style map, if any.
    pub fn style(&self) -> Option<&PropMap> {
        self.props.get("style").and_then(PropValue::as_map)
    }

    /// Whether the merged style hides this node.
    pub fn is_hidden(&self) -> bool {
        self.style()
            .and_then(|style| style.get("display"))
            .is_some_and(|display| display.as_str() == Some("none"))
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNode")
            .field("target", &self.target.name())
            .field("key", &self.key)
            .field("ref", &self.ref_name)
            .field("props", &self.props)
            .field("slots", &self.slots.keys().collect::<Vec<_>>())
            .field("directives", &self.directives)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_lifts_key_and_ref() {
        let mut props = PropMap::new();
        props.insert("key".into(), "k1".into());
        props.insert("ref".into(), "formRef".into());
        props.insert("id".into(), "x".into());
        let node = h("div", props, SlotFns::new());
        assert_eq!(node.key, Some(Key::from("k1")));
        assert_eq!(node.ref_name.as_deref(), Some("formRef"));
        assert!(node.prop("key").is_none());
        assert!(node.prop("ref").is_none());
        assert_eq!(node.prop("id"), Some(&PropValue::from("x")));
    }

    #[test]
    fn slots_are_reevaluated() {
        let counter = Rc::new(std::cell::Cell::new(0));
        let mut slots = SlotFns::new();
        let c = Rc::clone(&counter);
        slots.insert(
            "default".into(),
            Rc::new(move || {
                c.set(c.get() + 1);
                vec![Child::Text(c.get().to_string())]
            }),
        );
        let node = h("span", PropMap::new(), slots);
        node.slot("default");
        let children = node.slot("default").unwrap_or_default();
        assert_eq!(children[0].as_text(), Some("2"));
    }
}
