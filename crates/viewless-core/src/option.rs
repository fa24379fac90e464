//! The component-option model: the plain data describing one UI node.

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

use crate::component::ComponentRef;
use crate::value::{unref, Computed, PropMap, PropValue, Reactive};
use crate::vnode::VNode;

/// A callable event handler.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&[PropValue])>);

impl EventHandler {
    pub fn new(f: impl Fn(&[PropValue]) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler with the given arguments.
    pub fn call(&self, args: &[PropValue]) {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler(..)")
    }
}

/// Event map.  A `None` handler is an explicitly undefined event; the
/// renderer drops it.
pub type Events = IndexMap<String, Option<EventHandler>>;

/// Named slot contents.
pub type Slots = IndexMap<String, SlotContent>;

/// Identity key used by the host to match nodes across renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Int(i64),
}

impl Key {
    /// Derive a key from a property value.  `null` yields no key.
    pub fn from_value(value: &PropValue) -> Option<Key> {
        match unref(value) {
            PropValue::Null => None,
            PropValue::Str(s) => Some(Key::Str(s)),
            PropValue::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(Key::Int(n as i64)),
            other => Some(Key::Str(other.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n.into())
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Int(n as i64)
    }
}

impl From<Key> for PropValue {
    fn from(key: Key) -> Self {
        match key {
            Key::Str(s) => PropValue::Str(s),
            Key::Int(n) => PropValue::Number(n as f64),
        }
    }
}

/// Visibility of a node: a plain flag or a live value read at render time.
#[derive(Clone, Debug)]
pub enum Visibility {
    Static(bool),
    Reactive(Reactive<bool>),
    Computed(Computed<bool>),
}

impl Visibility {
    /// Current visibility.  Boxed flags are dereferenced on every call.
    pub fn is_visible(&self) -> bool {
        match self {
            Visibility::Static(visible) => *visible,
            Visibility::Reactive(cell) => cell.get(),
            Visibility::Computed(derived) => derived.get(),
        }
    }

    /// Interpret a property value as a visibility flag.
    ///
    /// Booleans are taken as-is and boxed values track the truthiness of their
    /// current contents.  Any other plain value leaves the node visible.
    pub fn from_value(value: &PropValue) -> Visibility {
        match value {
            PropValue::Bool(b) => Visibility::Static(*b),
            PropValue::Reactive(_) | PropValue::Computed(_) => {
                let value = value.clone();
                Visibility::Computed(Computed::new(move || unref(&value).is_truthy()))
            }
            _ => Visibility::Static(true),
        }
    }

    /// The flag as a property value; boxed flags stay live.
    pub fn into_value(self) -> PropValue {
        match self {
            Visibility::Static(visible) => PropValue::Bool(visible),
            Visibility::Reactive(cell) => {
                PropValue::Computed(Computed::new(move || PropValue::Bool(cell.get())))
            }
            Visibility::Computed(derived) => {
                PropValue::Computed(Computed::new(move || PropValue::Bool(derived.get())))
            }
        }
    }
}

/// A directive applied to the rendered node.
///
/// `show` is applied by the renderer like visibility; any other directive
/// is carried on the host node for the host to apply.
#[derive(Clone, Debug)]
pub struct Directive {
    pub name: String,
    pub value: PropValue,
    pub arg: Option<String>,
}

impl Directive {
    pub const SHOW: &'static str = "show";

    pub fn new(name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            arg: None,
        }
    }

    /// `show` bound to a flag.
    pub fn show(visible: impl Into<Visibility>) -> Self {
        Self::new(Self::SHOW, visible.into().into_value())
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    /// Read a `{ name, value, arg }` map.  `None` without a name.
    pub fn from_value(value: &PropValue) -> Option<Directive> {
        let map = value.as_map()?;
        let name = map.get("name").map(unref).filter(|n| !n.is_null())?.to_string();
        let arg = map
            .get("arg")
            .map(unref)
            .filter(|a| !a.is_null())
            .map(|a| a.to_string());
        Some(Directive {
            name,
            value: map.get("value").cloned().unwrap_or_default(),
            arg,
        })
    }

    /// Whether this is a `show` directive currently holding a falsy value.
    pub fn hides(&self) -> bool {
        self.name == Self::SHOW && !unref(&self.value).is_truthy()
    }
}

impl From<Directive> for PropValue {
    fn from(directive: Directive) -> Self {
        let mut map = PropMap::new();
        map.insert("name".into(), directive.name.into());
        map.insert("value".into(), directive.value);
        if let Some(arg) = directive.arg {
            map.insert("arg".into(), arg.into());
        }
        PropValue::Map(map)
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        Visibility::Static(visible)
    }
}

impl From<Reactive<bool>> for Visibility {
    fn from(cell: Reactive<bool>) -> Self {
        Visibility::Reactive(cell)
    }
}

impl From<Computed<bool>> for Visibility {
    fn from(derived: Computed<bool>) -> Self {
        Visibility::Computed(derived)
    }
}

/// A lazily evaluated slot producer.
#[derive(Clone)]
pub struct Producer(Rc<dyn Fn() -> SlotContent>);

impl Producer {
    pub fn new(f: impl Fn() -> SlotContent + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn produce(&self) -> SlotContent {
        (self.0)()
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

/// Content of a named slot.
///
/// The variant is fixed when the content is built, so the renderer never
/// has to inspect a value to find out whether it describes a component.
#[derive(Clone, Debug, Default)]
pub enum SlotContent {
    /// Explicitly empty.
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Component(Box<UiComponent>),
    /// Flattened depth-first, left to right.
    List(Vec<SlotContent>),
    /// Invoked on every render; the result is not memoized.
    Producer(Producer),
    /// An already-built host node, passed through unchanged.
    Node(VNode),
    /// Any other value, coerced to text.
    Value(PropValue),
}

impl SlotContent {
    /// Wrap a zero-argument producer.
    pub fn produce(f: impl Fn() -> SlotContent + 'static) -> Self {
        SlotContent::Producer(Producer::new(f))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SlotContent::Empty)
    }
}

impl From<&str> for SlotContent {
    fn from(s: &str) -> Self {
        SlotContent::Text(s.to_string())
    }
}

impl From<String> for SlotContent {
    fn from(s: String) -> Self {
        SlotContent::Text(s)
    }
}

impl From<f64> for SlotContent {
    fn from(n: f64) -> Self {
        SlotContent::Number(n)
    }
}

impl From<i32> for SlotContent {
    fn from(n: i32) -> Self {
        SlotContent::Number(n.into())
    }
}

impl From<UiComponent> for SlotContent {
    fn from(component: UiComponent) -> Self {
        SlotContent::Component(Box::new(component))
    }
}

impl From<Vec<UiComponent>> for SlotContent {
    fn from(components: Vec<UiComponent>) -> Self {
        SlotContent::List(components.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<SlotContent>> for SlotContent {
    fn from(items: Vec<SlotContent>) -> Self {
        SlotContent::List(items)
    }
}

impl From<VNode> for SlotContent {
    fn from(node: VNode) -> Self {
        SlotContent::Node(node)
    }
}

impl From<Producer> for SlotContent {
    fn from(producer: Producer) -> Self {
        SlotContent::Producer(producer)
    }
}

impl From<PropValue> for SlotContent {
    fn from(value: PropValue) -> Self {
        match value {
            PropValue::Null => SlotContent::Empty,
            PropValue::Str(s) => SlotContent::Text(s),
            PropValue::Number(n) => SlotContent::Number(n),
            PropValue::List(items) => {
                SlotContent::List(items.into_iter().map(SlotContent::from).collect())
            }
            other => SlotContent::Value(other),
        }
    }
}

/// Canonical, nested component option.
#[derive(Clone, Debug, Default)]
pub struct ComponentOption {
    pub props: PropMap,
    pub events: Events,
    pub slots: Slots,
    pub key: Option<Key>,
    pub visible: Option<Visibility>,
    pub ref_name: Option<String>,
    pub directives: Vec<Directive>,
}

impl ComponentOption {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What a [`UiComponent`] renders.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    /// A string name: either an abstract component identifier (`"Input"`)
    /// that an adaptor resolves, or a native element tag (`"div"`).
    Named(String),
    /// A concrete, mountable component.
    Component(ComponentRef),
}

impl Target {
    /// Display name of the target.
    pub fn name(&self) -> &str {
        match self {
            Target::Named(name) => name,
            Target::Component(component) => component.name(),
        }
    }

    /// The string identifier, if this target is still a name.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Target::Named(name) => Some(name),
            Target::Component(_) => None,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, Target::Component(_))
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Named(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Named(name)
    }
}

impl From<ComponentRef> for Target {
    fn from(component: ComponentRef) -> Self {
        Target::Component(component)
    }
}

impl From<&ComponentRef> for Target {
    fn from(component: &ComponentRef) -> Self {
        Target::Component(component.clone())
    }
}

/// A renderable node description: a [`ComponentOption`] plus its target.
#[derive(Clone, Debug)]
pub struct UiComponent {
    pub target: Target,
    pub props: PropMap,
    pub events: Events,
    pub slots: Slots,
    pub key: Option<Key>,
    pub visible: Option<Visibility>,
    pub ref_name: Option<String>,
    pub directives: Vec<Directive>,
}

impl UiComponent {
    /// An empty option for the given target.
    pub fn new(target: impl Into<Target>) -> Self {
        Self::from_option(target, ComponentOption::default())
    }

    pub fn from_option(target: impl Into<Target>, option: ComponentOption) -> Self {
        let ComponentOption {
            props,
            events,
            slots,
            key,
            visible,
            ref_name,
            directives,
        } = option;
        Self {
            target: target.into(),
            props,
            events,
            slots,
            key,
            visible,
            ref_name,
            directives,
        }
    }

    /// Split off the target, returning the remaining option.
    pub fn into_parts(self) -> (Target, ComponentOption) {
        let UiComponent {
            target,
            props,
            events,
            slots,
            key,
            visible,
            ref_name,
            directives,
        } = self;
        (
            target,
            ComponentOption {
                props,
                events,
                slots,
                key,
                visible,
                ref_name,
                directives,
            },
        )
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn on(mut self, event: impl Into<String>, handler: EventHandler) -> Self {
        self.events.insert(event.into(), Some(handler));
        self
    }

    pub fn slot(mut self, name: impl Into<String>, content: impl Into<SlotContent>) -> Self {
        self.slots.insert(name.into(), content.into());
        self
    }

    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn visible(mut self, visible: impl Into<Visibility>) -> Self {
        self.visible = Some(visible.into());
        self
    }

    pub fn ref_name(mut self, name: impl Into<String>) -> Self {
        self.ref_name = Some(name.into());
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

impl From<&str> for UiComponent {
    fn from(target: &str) -> Self {
        UiComponent::new(target)
    }
}

impl From<ComponentRef> for UiComponent {
    fn from(component: ComponentRef) -> Self {
        UiComponent::new(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_value() {
        assert_eq!(Key::from_value(&"a".into()), Some(Key::from("a")));
        assert_eq!(Key::from_value(&3.into()), Some(Key::Int(3)));
        assert_eq!(Key::from_value(&PropValue::Null), None);
        assert_eq!(Key::from_value(&1.5.into()), Some(Key::from("1.5")));
    }

    #[test]
    fn visibility_tracks_reactive_value() {
        let (cell, value) = PropValue::reactive(true);
        let visibility = Visibility::from_value(&value);
        assert!(visibility.is_visible());
        cell.set(false.into());
        assert!(!visibility.is_visible());
    }

    #[test]
    fn non_boolean_visibility_stays_visible() {
        assert!(Visibility::from_value(&"".into()).is_visible());
        assert!(!Visibility::from_value(&false.into()).is_visible());
    }

    #[test]
    fn prop_value_converts_to_slot_content() {
        assert!(SlotContent::from(PropValue::Null).is_empty());
        assert!(matches!(SlotContent::from(PropValue::from("hi")), SlotContent::Text(s) if s == "hi"));
        assert!(matches!(
            SlotContent::from(PropValue::list([1, 2])),
            SlotContent::List(items) if items.len() == 2
        ));
        assert!(matches!(SlotContent::from(PropValue::from(true)), SlotContent::Value(_)));
    }

    #[test]
    fn parts_round_trip() {
        let ui = UiComponent::new("Input")
            .prop("placeholder", "name")
            .key("k")
            .ref_name("input");
        let (target, option) = ui.into_parts();
        assert_eq!(target, Target::from("Input"));
        let rebuilt = UiComponent::from_option(target, option);
        assert_eq!(rebuilt.key, Some(Key::from("k")));
        assert_eq!(rebuilt.ref_name.as_deref(), Some("input"));
        assert_eq!(rebuilt.props.get("placeholder"), Some(&PropValue::from("name")));
    }
}
