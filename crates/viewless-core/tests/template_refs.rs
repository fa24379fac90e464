use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use viewless_core::testing::TestApp;
use viewless_core::{
    define_viewless_component, h, AdaptorMap, AdaptorSet, Component, ComponentInstance, ComponentRef,
    Handle, HandleAdaptor, HandleError, HandleTable, HandleValue, InstanceContext, Method, PropValue,
    Target, TemplateRef, UiComponent, VNode,
};

/// A concrete form whose native `check` method always rejects.
struct StrictForm;

struct StrictFormInstance;

impl Component for StrictForm {
    fn name(&self) -> &str {
        "StrictForm"
    }

    fn instantiate(&self) -> Box<dyn ComponentInstance> {
        Box::new(StrictFormInstance)
    }
}

impl ComponentInstance for StrictFormInstance {
    fn render(&mut self, cx: &mut InstanceContext<'_>) -> VNode {
        h("form", cx.props.clone(), cx.slots.clone())
    }

    fn expose(&self) -> Option<Handle> {
        Some(Rc::new(HandleTable::new("StrictForm").method(
            "check",
            Method::sync(|_| Err(HandleError::Rejected(PropValue::from("username required")))),
        )))
    }
}

fn strict_kit() -> AdaptorSet {
    let form = ComponentRef::new(StrictForm);
    AdaptorSet::from_map(AdaptorMap::new().with("Form", move |mut option| {
        option.target = Target::from(&form);
        option
    }))
    .with_handle_adaptor(HandleAdaptor::new().with("Form", "validate", |raw| {
        let check = raw.get("check")?.as_method()?.clone();
        Some(HandleValue::Method(Method::new(move |args| {
            let pending = check.call(args);
            async move { Ok(PropValue::from(pending.await.is_ok())) }.boxed_local()
        })))
    }))
}

fn form_page(captured: Rc<RefCell<Option<TemplateRef>>>) -> ComponentRef {
    define_viewless_component("FormPage", move |_, cx| {
        *captured.borrow_mut() = Some(cx.template_ref("formRef"));
        UiComponent::new("Form")
            .ref_name("formRef")
            .slot("default", UiComponent::new("input"))
    })
    .into()
}

fn provider(child: ComponentRef) -> ComponentRef {
    define_viewless_component("Provider", move |_, cx| {
        cx.provide_adaptor(strict_kit);
        UiComponent::new("div").slot("default", UiComponent::new(child.clone()))
    })
    .into()
}

#[tokio::test]
async fn validate_before_mount_is_absent_and_after_mount_is_false() {
    let captured = Rc::new(RefCell::new(None));
    let mut app = TestApp::new(provider(form_page(Rc::clone(&captured))));

    // Nothing has rendered yet, so no ref has been handed out.
    assert!(captured.borrow().is_none());

    let unmounted = viewless_core::RefOwner::new().template_ref("formRef");
    assert!(unmounted.value().is_none());
    assert!(unmounted.call("validate", vec![]).await.is_none());

    app.mount().unwrap();
    let form = captured.borrow().clone().unwrap();
    assert!(form.is_resolved());
    assert_eq!(form.value().and_then(|v| v.kind().cloned()), Some(Target::from("Form")));

    let valid = form.call("validate", vec![]).await.unwrap().unwrap();
    assert_eq!(valid, PropValue::from(false));
}

#[tokio::test]
async fn untranslated_members_reach_the_raw_handle() {
    let captured = Rc::new(RefCell::new(None));
    let mut app = TestApp::new(provider(form_page(Rc::clone(&captured))));
    app.mount().unwrap();
    let form = captured.borrow().clone().unwrap();

    let raw = form.call("check", vec![]).await.unwrap();
    assert!(matches!(raw, Err(HandleError::Rejected(_))));
    assert!(form.get("missing").is_none());
}

#[test]
fn ref_stays_stable_across_rerenders() {
    let captured = Rc::new(RefCell::new(None));
    let mut app = TestApp::new(provider(form_page(Rc::clone(&captured))));
    app.mount().unwrap();
    let first = captured.borrow().clone().unwrap();
    app.rerender().unwrap();
    let second = captured.borrow().clone().unwrap();
    assert!(first.is_resolved() && second.is_resolved());
    assert_eq!(
        first.value().map(|v| v.raw().name().to_string()),
        second.value().map(|v| v.raw().name().to_string())
    );
}

#[test]
fn the_providing_component_does_not_see_its_own_adaptor() {
    // The provider renders `Form` itself; only descendants get the adaptor,
    // so the abstract name reaches the host unresolved.
    let leaky: ComponentRef = define_viewless_component("Leaky", |_, cx| {
        cx.provide_adaptor(strict_kit);
        UiComponent::new("Form")
    })
    .into();
    let mut app = TestApp::new(leaky);
    let err = app.mount().unwrap_err();
    assert!(err.to_string().contains("Form"));
}
