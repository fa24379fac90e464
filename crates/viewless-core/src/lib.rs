//! Core runtime for **viewless** component trees.
//!
//! `viewless-core` lets authors describe UI as plain data instead of
//! templates.  A tree of [`UiComponent`] options names what to render
//! (an abstract identifier such as `"Input"`, a native tag, or a concrete
//! [`Component`]) together with its props, events and slots.  The renderer
//! walks that tree and produces host [`VNode`]s, asking the [`Adaptor`] in
//! scope to rewrite each abstract node into a concrete UI-kit component on
//! the way.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`UiComponent`] / [`ComponentOption`] | One node of an option tree |
//! | [`FlatOption`] | Flat authoring sugar (`onClick`, `defaultSlot`, `$key`) |
//! | [`PropValue`], [`Reactive`], [`Computed`] | Prop values and live boxes, read through [`unref`] |
//! | [`render_component`] | Option tree -> host [`VNode`] |
//! | [`AdaptorMap`], [`Adaptor`], [`HandleAdaptor`] | Per-kit rewriting of options and handles |
//! | [`Environment`] | Adaptors provided to a subtree |
//! | [`define_viewless_component`] | Components whose render output is an option tree |
//! | [`TemplateRef`] | Imperative access to a mounted component, through the handle adaptor |
//! | [`TestApp`](testing::TestApp) | Headless host for mounting trees in tests and demos |
//!
//! # Flow
//!
//! 1. **describe** -- build a [`UiComponent`] tree, directly or from a
//!    [`FlatOption`].
//! 2. **adapt** -- [`render_component`] lets the adaptor in the
//!    [`RenderContext`] rewrite each abstract node, recording `$ref` names
//!    against their abstract identity first.
//! 3. **render** -- structural attributes become host props, events become
//!    `on*` props and slots become lazy thunks.
//! 4. **mount** -- the host instantiates concrete components and binds refs.
//! 5. **call** -- [`TemplateRef::call`] routes `validate()` and friends through
//!    the [`HandleAdaptor`] of the kit actually mounted.

pub mod adaptor;
pub mod component;
pub mod context;
pub mod error;
pub mod flat;
pub mod handle;
pub mod log;
pub mod option;
pub mod render;
pub mod template_ref;
pub mod testing;
pub mod value;
pub mod vnode;

pub use adaptor::{use_provide_adaptor, Adaptor, AdaptorMap, AdaptorSet, HandleAdaptor, RewriteFn, Translator};
pub use component::{
    define_viewless_component, Component, ComponentInstance, ComponentRef, Emitter, InstanceContext,
    SetupContext, ViewlessComponent,
};
pub use context::{Attrs, Environment, RefMap, RenderContext, RenderOptions};
pub use error::{HandleError, LogError, MountError, OptionError};
pub use flat::{classify_key, use_viewless_component, FlatMode, FlatOption, FlatValue, KeyKind, DIRECTIVES_KEY};
pub use handle::{ComponentHandle, Handle, HandleTable, HandleValue, Method, MethodFuture};
pub use log::{init_logging, LogConfig, LogLevel};
pub use option::{
    ComponentOption, Directive, EventHandler, Events, Key, Producer, SlotContent, Slots, Target, UiComponent,
    Visibility,
};
pub use render::{capitalize, render_component, to_children};
pub use template_ref::{RefOwner, RefValue, TemplateRef};
pub use value::{unref, Computed, PropMap, PropValue, Reactive};
pub use vnode::{h, Child, SlotFn, SlotFns, VNode};
