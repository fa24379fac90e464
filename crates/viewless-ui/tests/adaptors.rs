use viewless_core::testing::{MountedNode, TestApp};
use viewless_core::{AdaptorSet, FlatOption, FlatValue, PropValue, Reactive, UiComponent};
use viewless_ui::adaptor::{ant_design, element_plus, naive_ui};
use viewless_ui::{use_card, use_form, use_form_item, use_input};

/// A one-field login form bound to `username`.
fn login_form(username: &Reactive<PropValue>) -> UiComponent {
    let setter = username.clone();
    let input = use_input(
        FlatOption::new()
            .set("modelValue", PropValue::Reactive(username.clone()))
            .set("placeholder", "Username")
            .set(
                "onUpdate:modelValue",
                FlatValue::handler(move |args| setter.set(args.first().cloned().unwrap_or_default())),
            ),
    );
    let item = use_form_item(
        FlatOption::new()
            .set("prop", "username")
            .set("label", "Username")
            .set("required", true)
            .set("defaultSlot", input),
    );
    use_form(
        FlatOption::new()
            .set("modelValue", PropValue::map([("username", username.clone())]))
            .set("labelPosition", "top")
            .set("defaultSlot", item),
    )
}

fn mount(set: &AdaptorSet, root: UiComponent) -> TestApp {
    let mut app = TestApp::new(root).with_adaptor_set(set);
    app.mount().unwrap();
    app
}

fn keys(node: &MountedNode) -> Vec<&str> {
    node.props.keys().map(String::as_str).collect()
}

#[test]
fn naive_ui_receives_its_own_vocabulary() {
    let username = Reactive::new(PropValue::from("ada"));
    let app = mount(&naive_ui::use_adaptor(), login_form(&username));

    let form = app.find("NForm").unwrap();
    assert_eq!(keys(form), ["model", "labelPlacement"]);

    let item = app.find("NFormItem").unwrap();
    assert_eq!(item.prop("path"), Some(&PropValue::from("username")));
    assert_eq!(item.prop("rule"), Some(&PropValue::map([("required", true)])));

    let input = app.find("NInput").unwrap();
    assert!(input.prop("value").is_some());
    assert!(input.prop("onUpdate:value").is_some());
    assert!(input.prop("modelValue").is_none());
    assert!(input.prop("onUpdate:modelValue").is_none());
}

#[test]
fn element_plus_keeps_model_value_on_inputs() {
    let username = Reactive::new(PropValue::from("ada"));
    let app = mount(&element_plus::use_adaptor(), login_form(&username));

    let form = app.find("ElForm").unwrap();
    assert_eq!(keys(form), ["model", "labelPosition"]);
    let item = app.find("ElFormItem").unwrap();
    assert_eq!(keys(item), ["prop", "label", "required"]);
    let input = app.find("ElInput").unwrap();
    assert!(input.prop("modelValue").is_some());
    assert!(input.prop("onUpdate:modelValue").is_some());
}

#[test]
fn ant_design_derives_layout() {
    let username = Reactive::new(PropValue::from("ada"));
    let app = mount(&ant_design::use_adaptor(), login_form(&username));

    let form = app.find("AForm").unwrap();
    assert_eq!(form.prop("layout"), Some(&PropValue::from("vertical")));
    assert_eq!(app.find("AFormItem").unwrap().prop("name"), Some(&PropValue::from("username")));
    let input = app.find("AInput").unwrap();
    assert!(input.prop("value").is_some());
    assert!(input.prop("onUpdate:value").is_some());
}

#[test]
fn kit_update_events_reach_the_author_handler() {
    let username = Reactive::new(PropValue::from(""));
    let mut app = mount(&naive_ui::use_adaptor(), login_form(&username));

    let input = app.find("NInput").unwrap();
    assert!(input.emit("update:value", &["grace".into()]));
    assert_eq!(username.get(), PropValue::from("grace"));

    app.rerender().unwrap();
    let value = app.find("NInput").and_then(|n| n.prop("value")).map(viewless_core::unref);
    assert_eq!(value, Some(PropValue::from("grace")));
}

#[test]
fn captions_render_as_leading_text() {
    let card = use_card(
        FlatOption::new()
            .set("title", "Login")
            .set("defaultSlot", "body"),
    );
    let app = mount(&element_plus::use_adaptor(), card);
    assert_eq!(app.find("ElCard").unwrap().prop("header"), Some(&PropValue::from("Login")));
    assert_eq!(app.find("article").map(MountedNode::text).as_deref(), Some("Loginbody"));
}

#[test]
fn unsupported_kinds_fail_to_mount() {
    let tabs = UiComponent::new(viewless_ui::TABS);
    let mut app = TestApp::new(tabs).with_adaptor_set(&ant_design::use_adaptor());
    assert!(app.mount().is_err());
}
