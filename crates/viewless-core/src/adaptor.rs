//! The adaptor protocol.
//!
//! An adaptor rewrites an abstract option (`target: "Input"`) into a concrete
//! one for a particular UI kit: it substitutes the target, renames props and
//! events, and may synthesize derived props.  Adaptors are looked up by
//! abstract identifier in an [`AdaptorMap`] and distributed to a subtree
//! through the [`Environment`](crate::context::Environment).
//!
//! A [`HandleAdaptor`] does the same for imperative access: it translates a
//! member read on a mounted component's handle (`validate`) into whatever the
//! concrete component offers.

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

use crate::context::Environment;
use crate::handle::{Handle, HandleValue};
use crate::option::{Target, UiComponent};

/// A per-kind rewrite function.
pub type RewriteFn = Rc<dyn Fn(UiComponent) -> UiComponent>;

/// Abstract component identifier -> rewrite function.
#[derive(Clone, Default)]
pub struct AdaptorMap {
    entries: IndexMap<String, RewriteFn>,
}

impl AdaptorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with(
        mut self,
        kind: impl Into<String>,
        rewrite: impl Fn(UiComponent) -> UiComponent + 'static,
    ) -> Self {
        self.insert(kind, rewrite);
        self
    }

    pub fn insert(
        &mut self,
        kind: impl Into<String>,
        rewrite: impl Fn(UiComponent) -> UiComponent + 'static,
    ) {
        self.entries.insert(kind.into(), Rc::new(rewrite));
    }

    pub fn get(&self, kind: &str) -> Option<&RewriteFn> {
        self.entries.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Registered identifiers, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for AdaptorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}

/// The dispatching closure installed into a subtree.
///
/// [`apply`](Adaptor::apply) never touches an option whose target is already a
/// concrete component, whatever closure the adaptor wraps.
#[derive(Clone)]
pub struct Adaptor {
    dispatch: Rc<dyn Fn(UiComponent) -> UiComponent>,
}

impl Adaptor {
    /// Wrap an arbitrary rewrite closure.  It only ever sees named targets.
    pub fn new(dispatch: impl Fn(UiComponent) -> UiComponent + 'static) -> Self {
        Self {
            dispatch: Rc::new(dispatch),
        }
    }

    /// Dispatch on the target name through `map`.  Unknown names pass
    /// through unchanged.
    pub fn from_map(map: AdaptorMap) -> Self {
        Self::new(move |option| {
            let Some(rewrite) = option.target.as_named().and_then(|kind| map.get(kind)) else {
                debug!(target_name = option.target.name(), "adaptor miss");
                return option;
            };
            debug!(target_name = option.target.name(), "adaptor hit");
            rewrite(option)
        })
    }

    /// Rewrite one option.
    pub fn apply(&self, option: UiComponent) -> UiComponent {
        if option.target.is_component() {
            return option;
        }
        (self.dispatch)(option)
    }
}

impl fmt::Debug for Adaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Adaptor(..)")
    }
}

/// Translates one member of a raw handle.  `None` means "not available".
pub type Translator = Rc<dyn Fn(&Handle) -> Option<HandleValue>>;

/// Abstract identifier -> member name -> translator.
///
/// Lookups that have no registered translation fall back to the raw handle.
#[derive(Clone, Default)]
pub struct HandleAdaptor {
    kinds: Rc<IndexMap<String, IndexMap<String, Translator>>>,
}

impl HandleAdaptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a translation for `kind.member`.
    pub fn with(
        mut self,
        kind: impl Into<String>,
        member: impl Into<String>,
        translate: impl Fn(&Handle) -> Option<HandleValue> + 'static,
    ) -> Self {
        Rc::make_mut(&mut self.kinds)
            .entry(kind.into())
            .or_default()
            .insert(member.into(), Rc::new(translate));
        self
    }

    pub fn has_translation(&self, kind: &Target, member: &str) -> bool {
        self.translator(kind, member).is_some()
    }

    fn translator(&self, kind: &Target, member: &str) -> Option<&Translator> {
        self.kinds.get(kind.as_named()?)?.get(member)
    }

    /// Run the registered translation, if any.
    pub fn translate(&self, raw: &Handle, kind: &Target, member: &str) -> Option<HandleValue> {
        let translate = self.translator(kind, member)?;
        debug!(kind = kind.name(), member, "handle adaptor translation");
        translate(raw)
    }

    /// Read `member` of `raw`, translated when a translation exists for
    /// `kind`, otherwise straight from the raw handle.
    pub fn get(&self, raw: &Handle, kind: &Target, member: &str) -> Option<HandleValue> {
        if self.has_translation(kind, member) {
            self.translate(raw, kind, member)
        } else {
            raw.get(member)
        }
    }
}

impl fmt::Debug for HandleAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, members) in self.kinds.iter() {
            map.entry(kind, &members.keys().collect::<Vec<_>>());
        }
        map.finish()
    }
}

/// What a UI-kit integration hands out: its rewrite table plus the two
/// values installed into the environment.
#[derive(Clone, Debug)]
pub struct AdaptorSet {
    pub adaptor_map: AdaptorMap,
    pub adaptor: Adaptor,
    pub handle_adaptor: Option<HandleAdaptor>,
}

impl AdaptorSet {
    /// A set whose adaptor dispatches through `map`.
    pub fn from_map(map: AdaptorMap) -> Self {
        Self {
            adaptor: Adaptor::from_map(map.clone()),
            adaptor_map: map,
            handle_adaptor: None,
        }
    }

    pub fn with_handle_adaptor(mut self, handle_adaptor: HandleAdaptor) -> Self {
        self.handle_adaptor = Some(handle_adaptor);
        self
    }
}

/// Build an adaptor set and install it into `env` for every descendant.
/// Returns the set's rewrite table.
pub fn use_provide_adaptor(env: &mut Environment, factory: impl FnOnce() -> AdaptorSet) -> AdaptorMap {
    let set = factory();
    env.provide(&set);
    set.adaptor_map
}
