//! Adaptor factories for the supported UI kits.
//!
//! Each factory returns an [`AdaptorSet`](viewless_core::AdaptorSet): a table
//! rewriting the abstract vocabulary of [`components`](crate::components)
//! onto that kit's components, and a handle adaptor translating the abstract
//! form handle onto the kit's native one.  Install one with
//! [`SetupContext::provide_adaptor`](viewless_core::SetupContext::provide_adaptor)
//! or [`Environment::provide`](viewless_core::Environment::provide).

pub mod ant_design;
pub mod element_plus;
pub mod naive_ui;

use futures::FutureExt;
use tracing::debug;
use viewless_core::{ComponentRef, Handle, HandleValue, Method, PropValue, Target, UiComponent};

/// Point `option` at a concrete component, keeping everything else.
pub(crate) fn retarget(option: UiComponent, component: &ComponentRef) -> UiComponent {
    UiComponent {
        target: Target::from(component),
        ..option
    }
}

/// Wrap the raw `validate` so that it always resolves to a boolean.
///
/// A rejection settles as `false`; a resolved value is judged by `passed`.
pub(crate) fn settle_validate(raw: &Handle, passed: fn(&PropValue) -> bool) -> Option<HandleValue> {
    let validate = raw.get("validate")?.as_method()?.clone();
    let component = raw.name().to_string();
    Some(HandleValue::Method(Method::new(move |args| {
        let pending = validate.call(args);
        let component = component.clone();
        async move {
            match pending.await {
                Ok(resolved) => Ok(PropValue::from(passed(&resolved))),
                Err(err) => {
                    debug!(component, %err, "native validate rejected");
                    Ok(PropValue::from(false))
                }
            }
        }
        .boxed_local()
    })))
}

/// Expose the raw member `native` under another name.
pub(crate) fn alias(raw: &Handle, native: &str) -> Option<HandleValue> {
    raw.get(native)
}
