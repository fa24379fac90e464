//! Template refs: imperative access to mounted components.
//!
//! A [`TemplateRef`] starts unresolved and resolves when the host first
//! mounts the node carrying the matching `ref`.  From then on it follows
//! whichever instance is mounted there, so a remounted component (new key
//! or position) replaces the handle of the one it displaced.  Member reads go through
//! [`RefValue`], which consults the handle adaptor using the ref's
//! pre-adaptation target recorded in the owner's [`RefMap`].  A caller can
//! therefore ask for `validate` on an abstract `Form` no matter which kit
//! component ended up mounted.

use futures::future::{self, FutureExt};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::adaptor::HandleAdaptor;
use crate::context::RefMap;
use crate::error::HandleError;
use crate::handle::{Handle, HandleValue, MethodFuture};
use crate::option::Target;
use crate::value::PropValue;

type RefCellSlot = Rc<RefCell<Option<Handle>>>;

#[derive(Default)]
struct OwnerState {
    cells: RefCell<IndexMap<String, RefCellSlot>>,
    ref_map: RefMap,
    handle_adaptor: RefCell<Option<HandleAdaptor>>,
}

/// Per-instance ref storage: the template-ref cells, the ref map of the
/// latest render pass and the handle adaptor injected into the instance.
#[derive(Clone, Default)]
pub struct RefOwner(Rc<OwnerState>);

impl RefOwner {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &str) -> RefCellSlot {
        let mut cells = self.0.cells.borrow_mut();
        Rc::clone(cells.entry(key.to_string()).or_default())
    }

    /// The ref for `key`.  Repeated calls return refs sharing one cell.
    pub fn template_ref(&self, key: impl Into<String>) -> TemplateRef {
        let key = key.into();
        TemplateRef {
            cell: self.cell(&key),
            key,
            owner: self.clone(),
        }
    }

    /// Start a render pass: drop last pass's ref map entries and pick up the
    /// handle adaptor currently injected.
    pub fn begin_render(&self, handle_adaptor: Option<HandleAdaptor>) {
        self.0.ref_map.clear();
        *self.0.handle_adaptor.borrow_mut() = handle_adaptor;
    }

    pub fn ref_map(&self) -> RefMap {
        self.0.ref_map.clone()
    }

    /// Point `key` at `handle`, the latest mount carrying that ref.
    /// Returns whether the ref now sees a different handle than before.
    pub fn bind(&self, key: &str, handle: Handle) -> bool {
        let cell = self.cell(key);
        let mut slot = cell.borrow_mut();
        let changed = !slot.as_ref().is_some_and(|current| Rc::ptr_eq(current, &handle));
        *slot = Some(handle);
        changed
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RefOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefOwner")
            .field("refs", &self.0.cells.borrow().keys().collect::<Vec<_>>())
            .field("ref_map", &self.0.ref_map)
            .finish()
    }
}

/// A ref to a mounted component, keyed by the `$ref` name used in the
/// owner's option tree.
#[derive(Clone)]
pub struct TemplateRef {
    key: String,
    cell: RefCellSlot,
    owner: RefOwner,
}

impl TemplateRef {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.borrow().is_some()
    }

    /// The proxied handle, or `None` before mount.
    pub fn value(&self) -> Option<RefValue> {
        let raw = self.cell.borrow().clone()?;
        Some(RefValue {
            raw,
            kind: self.owner.0.ref_map.get(&self.key),
            handle_adaptor: self.owner.0.handle_adaptor.borrow().clone(),
        })
    }

    /// Read a member.  `None` before mount or if the member is missing.
    pub fn get(&self, member: &str) -> Option<HandleValue> {
        self.value()?.get(member)
    }

    /// Call a method.  Before mount this resolves to `None` without faulting.
    pub async fn call(
        &self,
        method: &str,
        args: Vec<PropValue>,
    ) -> Option<Result<PropValue, HandleError>> {
        let value = self.value()?;
        Some(value.call(method, args).await)
    }
}

impl fmt::Debug for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRef")
            .field("key", &self.key)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// A resolved handle seen through the handle adaptor.
#[derive(Clone)]
pub struct RefValue {
    raw: Handle,
    kind: Option<Target>,
    handle_adaptor: Option<HandleAdaptor>,
}

impl RefValue {
    /// The untranslated handle of the mounted component.
    pub fn raw(&self) -> &Handle {
        &self.raw
    }

    /// The abstract target recorded for this ref in the latest render pass.
    pub fn kind(&self) -> Option<&Target> {
        self.kind.as_ref()
    }

    /// Read a member, translated when the handle adaptor knows the ref's
    /// abstract target, otherwise straight from the raw handle.
    pub fn get(&self, member: &str) -> Option<HandleValue> {
        match (&self.handle_adaptor, &self.kind) {
            (Some(adaptor), Some(kind)) => adaptor.get(&self.raw, kind, member),
            _ => self.raw.get(member),
        }
    }

    /// Call a method through [`get`](RefValue::get).
    pub fn call(&self, method: &str, args: Vec<PropValue>) -> MethodFuture {
        match self.get(method) {
            Some(HandleValue::Method(m)) => m.call(args),
            Some(HandleValue::Value(_)) => {
                future::ready(Err(HandleError::NotCallable(method.to_string()))).boxed_local()
            }
            None => future::ready(Err(HandleError::MissingMember(method.to_string()))).boxed_local(),
        }
    }
}

impl fmt::Debug for RefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefValue")
            .field("raw", &self.raw.name())
            .field("kind", &self.kind.as_ref().map(Target::name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{HandleTable, Method};

    fn form_handle() -> Handle {
        Rc::new(
            HandleTable::new("n-form")
                .method("restoreValidation", Method::sync(|_| Ok(PropValue::from("restored"))))
                .value("labelPlacement", "top"),
        )
    }

    #[tokio::test]
    async fn unresolved_ref_reads_as_absent() {
        let owner = RefOwner::new();
        let form = owner.template_ref("formRef");
        assert!(!form.is_resolved());
        assert!(form.value().is_none());
        assert!(form.get("validate").is_none());
        assert!(form.call("validate", vec![]).await.is_none());
    }

    #[test]
    fn rebinding_follows_the_latest_mount() {
        let owner = RefOwner::new();
        let form = owner.template_ref("formRef");
        let first = form_handle();
        assert!(owner.bind("formRef", Rc::clone(&first)));
        assert!(!owner.bind("formRef", first));
        assert_eq!(form.value().map(|v| v.raw().name().to_string()).as_deref(), Some("n-form"));

        assert!(owner.bind("formRef", Rc::new(HandleTable::new("remounted"))));
        assert_eq!(form.value().map(|v| v.raw().name().to_string()).as_deref(), Some("remounted"));
    }

    #[tokio::test]
    async fn translated_members_use_the_recorded_abstract_target() {
        let owner = RefOwner::new();
        let adaptor = HandleAdaptor::new().with("Form", "clearValidate", |raw| {
            raw.get("restoreValidation")
        });
        owner.begin_render(Some(adaptor));
        owner.ref_map().record("formRef", Target::from("Form"));
        owner.bind("formRef", form_handle());

        let form = owner.template_ref("formRef");
        let out = form.call("clearValidate", vec![]).await;
        assert!(matches!(out, Some(Ok(v)) if v == PropValue::from("restored")));

        let err = form.call("labelPlacement", vec![]).await;
        assert!(matches!(err, Some(Err(HandleError::NotCallable(_)))));
        let missing = form.call("submit", vec![]).await;
        assert!(matches!(missing, Some(Err(HandleError::MissingMember(_)))));
    }

    #[test]
    fn new_render_pass_clears_the_ref_map() {
        let owner = RefOwner::new();
        owner.ref_map().record("a", Target::from("Form"));
        owner.begin_render(None);
        assert!(owner.ref_map().is_empty());
    }
}
