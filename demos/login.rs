//! The login form shared by the demos.
//!
//! Written once against the abstract vocabulary; whichever adaptor is
//! provided above it decides which kit it renders as.

use viewless::tokio;
use viewless::ui::{use_button, use_card, use_form, use_form_item, use_input, FormRef};
use viewless::{
    define_viewless_component, unref, Computed, ComponentRef, Directive, Emitter, FlatOption,
    FlatValue, PropValue, Reactive,
};
use tracing::info;

/// The form's model: a live `{ username, password }` map.
#[derive(Clone, Debug)]
pub struct LoginModel(Reactive<PropValue>);

impl LoginModel {
    pub fn new(username: &str, password: &str) -> Self {
        Self(Reactive::new(PropValue::map([
            ("username", username),
            ("password", password),
        ])))
    }

    pub fn get(&self, field: &str) -> PropValue {
        self.0
            .with(|model| model.as_map().and_then(|m| m.get(field)).cloned())
            .unwrap_or_default()
    }

    pub fn set(&self, field: &str, value: PropValue) {
        self.0.update(|model| {
            if let PropValue::Map(map) = model {
                map.insert(field.to_string(), value);
            }
        });
    }

    /// A live view of one field, for binding to an input.
    pub fn field(&self, field: &'static str) -> PropValue {
        let model = self.clone();
        PropValue::Computed(Computed::new(move || model.get(field)))
    }

    /// The current values, detached from the model.
    pub fn snapshot(&self) -> PropValue {
        self.0.get()
    }

    pub fn value(&self) -> PropValue {
        PropValue::Reactive(self.0.clone())
    }
}

async fn handle_submit(form: FormRef, model: LoginModel, emitter: Emitter) {
    info!(model = %model.snapshot(), "submitting");
    if form.validate().await == Some(true) {
        emitter.emit("submit", &[model.snapshot()]);
    }
}

fn input(model: &LoginModel, field: &'static str, emitter: &Emitter) -> FlatOption {
    let (model, emitter) = (model.clone(), emitter.clone());
    let binding = model.field(field);
    FlatOption::new().set("modelValue", binding).set(
        "onUpdate:modelValue",
        FlatValue::handler(move |args| {
            let value = args.first().map(unref).unwrap_or_default();
            info!(field, %value, "field changed");
            model.set(field, value);
            emitter.emit("formChange", &[model.snapshot()]);
        }),
    )
}

/// A card holding a username/password form with submit and reset buttons.
///
/// Emits `formChange` on every edit and `submit` once validation passes.
/// The password field hides while the username is `1234`.
pub fn login_form(model: LoginModel) -> ComponentRef {
    define_viewless_component("LoginForm", move |props, cx| {
        let form = FormRef::new(cx.template_ref("formRef"));
        let emitter = cx.emitter();
        let title = props.get("title").cloned().unwrap_or_default();

        let password_shown = {
            let model = model.clone();
            Computed::new(move || unref(&model.get("username")) != PropValue::from("1234"))
        };
        let on_submit = {
            let (form, model, emitter) = (form.clone(), model.clone(), emitter.clone());
            FlatValue::handler(move |_| {
                tokio::task::spawn_local(handle_submit(form.clone(), model.clone(), emitter.clone()));
            })
        };
        let on_reset = FlatValue::handler(move |_| {
            let form = form.clone();
            tokio::task::spawn_local(async move {
                form.reset_fields().await;
            });
        });

        use_card(
            FlatOption::new()
                .set("$key", "form-card")
                .set("title", title)
                .set(
                    "defaultSlot",
                    use_form(
                        FlatOption::new()
                            .set("modelValue", model.value())
                            .set("$ref", "formRef")
                            .set("labelPosition", "top")
                            .set(
                                "defaultSlot",
                                vec![
                                    use_form_item(
                                        FlatOption::new()
                                            .set("prop", "username")
                                            .set("label", "Username")
                                            .set("required", true)
                                            .set("$key", "username")
                                            .set(
                                                "defaultSlot",
                                                use_input(
                                                    input(&model, "username", &emitter)
                                                        .set("placeholder", "Enter a username"),
                                                ),
                                            ),
                                    ),
                                    use_form_item(
                                        FlatOption::new()
                                            .set("prop", "password")
                                            .set("label", "Password")
                                            .set("required", true)
                                            .set("$key", "password")
                                            .set("vdirs", vec![Directive::show(password_shown)])
                                            .set(
                                                "defaultSlot",
                                                use_input(
                                                    input(&model, "password", &emitter)
                                                        .set("placeholder", "Enter a password")
                                                        .set("type", "password"),
                                                ),
                                            ),
                                    ),
                                    use_form_item(
                                        FlatOption::new().set("$key", "button").set(
                                            "defaultSlot",
                                            vec![
                                                use_button(
                                                    FlatOption::new()
                                                        .set("$key", "submit")
                                                        .set("type", "primary")
                                                        .set("defaultSlot", "Submit")
                                                        .set("onClick", on_submit),
                                                ),
                                                use_button(
                                                    FlatOption::new()
                                                        .set("$key", "reset")
                                                        .set("defaultSlot", "Reset")
                                                        .set("onClick", on_reset),
                                                ),
                                            ],
                                        ),
                                    ),
                                ],
                            ),
                    ),
                ),
        )
    })
    .with_default("title", "viewless form")
    .into()
}
