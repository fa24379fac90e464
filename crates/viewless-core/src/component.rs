//! Mountable components and the viewless component-definition wrapper.

use std::fmt;
use std::rc::Rc;

use crate::adaptor::{use_provide_adaptor, AdaptorMap, AdaptorSet};
use crate::context::{Attrs, Environment, RenderContext, RenderOptions};
use crate::handle::Handle;
use crate::option::{Target, UiComponent};
use crate::render::{host_event_name, render_component};
use crate::template_ref::{RefOwner, TemplateRef};
use crate::value::{PropMap, PropValue};
use crate::vnode::{SlotFns, VNode};

/// A concrete component the host can mount.
///
/// The host calls [`instantiate`](Component::instantiate) once per mounted
/// occurrence and keeps the instance across re-renders for as long as the
/// node keeps its position and key.
pub trait Component {
    /// Display name, used in diagnostics and by [`TestApp::find`].
    ///
    /// [`TestApp::find`]: crate::testing::TestApp::find
    fn name(&self) -> &str;

    /// Create a fresh instance.
    fn instantiate(&self) -> Box<dyn ComponentInstance>;
}

/// What an instance sees when it renders.
pub struct InstanceContext<'a> {
    /// Host props, including `on*` handlers, class and style.
    pub props: &'a PropMap,
    /// Slot thunks passed by the parent.
    pub slots: &'a SlotFns,
    /// The environment built by the instance's ancestors.
    pub injected: &'a Environment,
    /// The environment the instance's descendants will see.  Starts as a
    /// copy of `injected`.
    pub provided: &'a mut Environment,
}

/// A live, mounted component.
pub trait ComponentInstance {
    /// Produce this instance's host node for the current props.
    fn render(&mut self, cx: &mut InstanceContext<'_>) -> VNode;

    /// The public handle template refs resolve to.
    fn expose(&self) -> Option<Handle> {
        None
    }
}

/// Shared reference to a concrete component.  Compares by identity.
#[derive(Clone)]
pub struct ComponentRef(Rc<dyn Component>);

impl ComponentRef {
    pub fn new(component: impl Component + 'static) -> Self {
        Self(Rc::new(component))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn instantiate(&self) -> Box<dyn ComponentInstance> {
        self.0.instantiate()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentRef").field(&self.name()).finish()
    }
}

/// Fires the parent's `on*` handlers.  Cheap to clone into event closures.
#[derive(Clone)]
pub struct Emitter {
    props: PropMap,
    options: Rc<RenderOptions>,
}

impl Emitter {
    fn new(props: &PropMap, options: Rc<RenderOptions>) -> Self {
        let props = props
            .iter()
            .filter(|(_, value)| value.as_handler().is_some())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self { props, options }
    }

    /// Call the parent's handler for `event`.  Returns whether one was bound.
    pub fn emit(&self, event: &str, args: &[PropValue]) -> bool {
        let name = host_event_name(&self.options.event_prefix, event);
        match self.props.get(&name).and_then(PropValue::as_handler) {
            Some(handler) => {
                handler.call(args);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.props.keys()).finish()
    }
}

/// Services available to a viewless component's setup function.
pub struct SetupContext<'a> {
    owner: &'a RefOwner,
    emitter: Emitter,
    injected: &'a Environment,
    provided: &'a mut Environment,
}

impl SetupContext<'_> {
    /// The instance's template ref for `key`; stable across renders.
    pub fn template_ref(&self, key: impl Into<String>) -> TemplateRef {
        self.owner.template_ref(key)
    }

    /// Install an adaptor set for this component's descendants.
    pub fn provide_adaptor(&mut self, factory: impl FnOnce() -> AdaptorSet) -> AdaptorMap {
        use_provide_adaptor(self.provided, factory)
    }

    /// Emit `event` to the parent right away.
    pub fn emit(&self, event: &str, args: &[PropValue]) -> bool {
        self.emitter.emit(event, args)
    }

    /// An owned emitter for use inside event handlers.
    pub fn emitter(&self) -> Emitter {
        self.emitter.clone()
    }

    /// What the ancestors provided.
    pub fn injected(&self) -> &Environment {
        self.injected
    }

    /// Provide a keyed value to descendants.
    pub fn provide_value<T: 'static>(&mut self, key: impl Into<String>, value: Rc<T>) {
        self.provided.provide_value(key, value);
    }

    /// A keyed value provided by an ancestor.
    pub fn inject_value<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        self.injected.inject_value(key)
    }
}

type SetupFn = Rc<dyn Fn(&PropMap, &mut SetupContext<'_>) -> UiComponent>;

/// A component whose render output is an option tree.
///
/// Built with [`define_viewless_component`].
#[derive(Clone)]
pub struct ViewlessComponent {
    name: String,
    defaults: PropMap,
    setup: SetupFn,
}

/// Define a component from a setup function.
///
/// On every render the setup function receives the component's props (with
/// declared defaults filled in and `class`/`style` moved to the ambient
/// attrs) and returns the option tree to render.  `style` and `class` set
/// on the returned top-level option are always discarded; only the parent
/// controls them.
pub fn define_viewless_component(
    name: impl Into<String>,
    setup: impl Fn(&PropMap, &mut SetupContext<'_>) -> UiComponent + 'static,
) -> ViewlessComponent {
    ViewlessComponent {
        name: name.into(),
        defaults: PropMap::new(),
        setup: Rc::new(setup),
    }
}

impl ViewlessComponent {
    /// Declare a prop default.
    pub fn with_default(mut self, prop: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.defaults.insert(prop.into(), value.into());
        self
    }
}

impl Component for ViewlessComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn instantiate(&self) -> Box<dyn ComponentInstance> {
        Box::new(ViewlessInstance {
            component: self.clone(),
            owner: RefOwner::new(),
        })
    }
}

impl From<ViewlessComponent> for ComponentRef {
    fn from(component: ViewlessComponent) -> Self {
        ComponentRef::new(component)
    }
}

impl From<ViewlessComponent> for Target {
    fn from(component: ViewlessComponent) -> Self {
        Target::Component(component.into())
    }
}

impl fmt::Debug for ViewlessComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewlessComponent")
            .field("name", &self.name)
            .field("defaults", &self.defaults)
            .finish()
    }
}

struct ViewlessInstance {
    component: ViewlessComponent,
    owner: RefOwner,
}

impl ComponentInstance for ViewlessInstance {
    fn render(&mut self, cx: &mut InstanceContext<'_>) -> VNode {
        let mut props = self.component.defaults.clone();
        props.extend(cx.props.iter().map(|(k, v)| (k.clone(), v.clone())));
        let attrs = Attrs {
            class: props.shift_remove("class"),
            style: props.shift_remove("style"),
        };

        let mut setup_cx = SetupContext {
            owner: &self.owner,
            emitter: Emitter::new(&props, Rc::clone(&cx.injected.options)),
            injected: cx.injected,
            provided: &mut *cx.provided,
        };
        let mut option = (self.component.setup)(&props, &mut setup_cx);
        option.props.shift_remove("style");
        option.props.shift_remove("class");

        self.owner.begin_render(cx.injected.handle_adaptor.clone());
        let render_cx = RenderContext {
            adaptor: cx.injected.adaptor.clone(),
            handle_adaptor: cx.injected.handle_adaptor.clone(),
            options: Rc::clone(&cx.injected.options),
            ..RenderContext::new()
        }
        .with_ref_owner(self.owner.clone())
        .with_attrs(attrs);
        render_component(option, &render_cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::EventHandler;
    use std::cell::RefCell;

    fn render_once(component: &ComponentRef, props: PropMap) -> (VNode, Environment) {
        let mut instance = component.instantiate();
        let injected = Environment::new();
        let mut provided = injected.clone();
        let slots = SlotFns::new();
        let node = instance.render(&mut InstanceContext {
            props: &props,
            slots: &slots,
            injected: &injected,
            provided: &mut provided,
        });
        (node, provided)
    }

    #[test]
    fn defaults_fill_missing_props() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let component: ComponentRef = define_viewless_component("Titled", move |props, _| {
            s.borrow_mut().push(props.get("title").cloned().unwrap_or_default());
            UiComponent::new("h1")
        })
        .with_default("title", "untitled")
        .into();

        render_once(&component, PropMap::new());
        let mut props = PropMap::new();
        props.insert("title".into(), "given".into());
        render_once(&component, props);
        assert_eq!(*seen.borrow(), [PropValue::from("untitled"), PropValue::from("given")]);
    }

    #[test]
    fn own_class_and_style_are_stripped_and_parent_attrs_applied() {
        let component: ComponentRef = define_viewless_component("Boxed", |_, _| {
            UiComponent::new("div")
                .prop("class", "mine")
                .prop("style", "color: red")
        })
        .into();
        let mut props = PropMap::new();
        props.insert("class".into(), "parent".into());
        let (node, _) = render_once(&component, props);
        assert_eq!(node.prop("class"), Some(&PropValue::from("parent")));
        assert!(node.prop("style").is_none());
    }

    #[test]
    fn emit_reaches_the_parent_handler() {
        let received = Rc::new(RefCell::new(None));
        let r = Rc::clone(&received);
        let component: ComponentRef = define_viewless_component("Emitting", |_, cx| {
            cx.emit("formChange", &[PropValue::from("payload")]);
            UiComponent::new("div")
        })
        .into();
        let mut props = PropMap::new();
        props.insert(
            "onFormChange".into(),
            EventHandler::new(move |args| *r.borrow_mut() = args.first().cloned()).into(),
        );
        render_once(&component, props);
        assert_eq!(*received.borrow(), Some(PropValue::from("payload")));
    }

    #[test]
    fn provides_go_to_descendants_only() {
        let component: ComponentRef = define_viewless_component("Provider", |_, cx| {
            cx.provide_adaptor(|| AdaptorSet::from_map(AdaptorMap::new()));
            assert!(cx.injected().adaptor.is_none());
            UiComponent::new("div")
        })
        .into();
        let (_, provided) = render_once(&component, PropMap::new());
        assert!(provided.adaptor.is_some());
    }
}
