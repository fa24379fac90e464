//! Rendering context and the ambient provide/inject environment.

use indexmap::IndexMap;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::adaptor::{Adaptor, AdaptorSet, HandleAdaptor};
use crate::option::Target;
use crate::template_ref::RefOwner;
use crate::value::PropValue;

/// Ref name -> pre-adaptation target, accumulated during one render pass.
///
/// Clones share the same table.  The owning instance clears it at the start
/// of every pass, so entries never survive from a previous render.
#[derive(Clone, Debug, Default)]
pub struct RefMap(Rc<RefCell<IndexMap<String, Target>>>);

impl RefMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: impl Into<String>, target: Target) {
        self.0.borrow_mut().insert(name.into(), target);
    }

    pub fn get(&self, name: &str) -> Option<Target> {
        self.0.borrow().get(name).cloned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Class and style forwarded by a wrapper component to its rendered child.
#[derive(Clone, Debug, Default)]
pub struct Attrs {
    pub class: Option<PropValue>,
    pub style: Option<PropValue>,
}

impl Attrs {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.style.is_none()
    }
}

/// Renderer configuration shared by every node of a tree.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Prefix of host event props: `click` renders as `{prefix}Click`.
    pub event_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            event_prefix: "on".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.event_prefix = prefix.into();
        self
    }
}

/// Everything [`render_component`](crate::render::render_component) needs
/// besides the option itself.
///
/// Passed explicitly down the render call chain.  Slot thunks capture a
/// copy made with [`for_slots`](RenderContext::for_slots).
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    pub adaptor: Option<Adaptor>,
    pub handle_adaptor: Option<HandleAdaptor>,
    pub ref_map: Option<RefMap>,
    pub ref_owner: Option<RefOwner>,
    pub attrs: Attrs,
    pub options: Rc<RenderOptions>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_adaptor(mut self, adaptor: Adaptor) -> Self {
        self.adaptor = Some(adaptor);
        self
    }

    pub fn with_handle_adaptor(mut self, handle_adaptor: HandleAdaptor) -> Self {
        self.handle_adaptor = Some(handle_adaptor);
        self
    }

    pub fn with_ref_map(mut self, ref_map: RefMap) -> Self {
        self.ref_map = Some(ref_map);
        self
    }

    /// Bind refs created under this context to `owner`, recording them into
    /// its ref map.
    pub fn with_ref_owner(mut self, owner: RefOwner) -> Self {
        self.ref_map = Some(owner.ref_map());
        self.ref_owner = Some(owner);
        self
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = Rc::new(options);
        self
    }

    /// The context slot content renders under: identical, minus the ambient
    /// attrs, which apply to the top-level node only.
    pub fn for_slots(&self) -> Self {
        Self {
            attrs: Attrs::default(),
            ..self.clone()
        }
    }
}

/// Values a component makes available to all of its descendants.
///
/// There are two named channels, the adaptor and the handle adaptor, plus
/// the render options and arbitrary keyed values.  An instance reads the
/// environment its ancestors built and writes to a copy that only its
/// descendants see.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub adaptor: Option<Adaptor>,
    pub handle_adaptor: Option<HandleAdaptor>,
    pub options: Rc<RenderOptions>,
    values: IndexMap<String, Rc<dyn Any>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an adaptor set into both channels.
    pub fn with_adaptor_set(mut self, set: &AdaptorSet) -> Self {
        self.provide(set);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = Rc::new(options);
        self
    }

    /// Install an adaptor set into both channels.  A set without a handle
    /// adaptor clears the handle channel.
    pub fn provide(&mut self, set: &AdaptorSet) {
        self.adaptor = Some(set.adaptor.clone());
        self.handle_adaptor = set.handle_adaptor.clone();
    }

    /// Make `value` available to descendants under `key`.
    pub fn provide_value<T: 'static>(&mut self, key: impl Into<String>, value: Rc<T>) {
        self.values.insert(key.into(), value);
    }

    /// The nearest ancestor's value for `key`, if it has type `T`.
    pub fn inject_value<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        Rc::clone(self.values.get(key)?).downcast::<T>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptor::AdaptorMap;

    #[test]
    fn ref_map_clones_share_entries() {
        let map = RefMap::new();
        let alias = map.clone();
        alias.record("formRef", Target::from("Form"));
        assert_eq!(map.get("formRef"), Some(Target::from("Form")));
        map.clear();
        assert!(alias.is_empty());
    }

    #[test]
    fn slot_context_drops_attrs_only() {
        let cx = RenderContext::new()
            .with_adaptor(Adaptor::from_map(AdaptorMap::new()))
            .with_attrs(Attrs {
                class: Some("wide".into()),
                style: None,
            });
        let inner = cx.for_slots();
        assert!(inner.attrs.is_empty());
        assert!(inner.adaptor.is_some());
    }

    #[test]
    fn keyed_values_are_typed() {
        let mut env = Environment::new();
        env.provide_value("count", Rc::new(3_u32));
        assert_eq!(env.inject_value::<u32>("count").as_deref(), Some(&3));
        assert!(env.inject_value::<String>("count").is_none());
        assert!(env.inject_value::<u32>("missing").is_none());
    }
}
