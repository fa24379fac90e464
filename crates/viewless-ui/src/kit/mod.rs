//! Headless stand-ins for the concrete components of each supported UI kit.
//!
//! The adaptors rewrite abstract options onto these components.  Each one
//! renders a plain host element carrying the props it was given, so a
//! mounted tree shows exactly what a kit would have received.  Forms keep a
//! small amount of state so template-ref calls behave the way the real
//! kits do: fields register with the nearest form, `validate` checks
//! `required` rules against the bound model, and every kit settles a failed
//! validation in its own way.

pub mod ant_design;
pub mod element_plus;
pub mod naive;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use viewless_core::{
    h, unref, Child, Component, ComponentHandle, ComponentInstance, ComponentRef, Handle,
    HandleError, HandleValue, InstanceContext, Method, PropMap, PropValue, SlotFn, SlotFns, VNode,
};

/// Environment key under which a mounted form exposes itself to its fields.
pub const FORM_SCOPE: &str = "viewless-ui/form";

/// Name of the leading slot holding a component's caption text.
pub const CAPTION_SLOT: &str = "caption";

/// Which kit's calling conventions a stand-in form follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    /// Rejects on errors; resolves `{ warning }` when only warning-level
    /// rules fail.  Clears messages with `restoreValidation`.
    Naive,
    /// Rejects on errors, otherwise resolves `true`.
    ElementPlus,
    /// Rejects with `{ errorFields }`, otherwise resolves the model.
    AntDesign,
}

#[derive(Clone, Copy, Debug)]
enum Role {
    Plain,
    Form(Flavor),
    /// A form field; the prop naming the model field differs per kit.
    FormItem { field_prop: &'static str },
}

/// A concrete stand-in component.
#[derive(Clone, Copy, Debug)]
pub struct KitComponent {
    name: &'static str,
    tag: &'static str,
    caption: Option<&'static str>,
    role: Role,
}

impl KitComponent {
    pub const fn plain(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            tag,
            caption: None,
            role: Role::Plain,
        }
    }

    pub const fn form(name: &'static str, flavor: Flavor) -> Self {
        Self {
            name,
            tag: "form",
            caption: None,
            role: Role::Form(flavor),
        }
    }

    pub const fn form_item(name: &'static str, field_prop: &'static str) -> Self {
        Self {
            name,
            tag: "div",
            caption: Some("label"),
            role: Role::FormItem { field_prop },
        }
    }

    /// Render the value of `prop` as leading text.
    pub const fn with_caption(mut self, prop: &'static str) -> Self {
        self.caption = Some(prop);
        self
    }

    pub fn into_ref(self) -> ComponentRef {
        ComponentRef::new(self)
    }
}

impl Component for KitComponent {
    fn name(&self) -> &str {
        self.name
    }

    fn instantiate(&self) -> Box<dyn ComponentInstance> {
        Box::new(KitInstance {
            kind: *self,
            form: None,
        })
    }
}

struct KitInstance {
    kind: KitComponent,
    form: Option<Rc<FormState>>,
}

impl ComponentInstance for KitInstance {
    fn render(&mut self, cx: &mut InstanceContext<'_>) -> VNode {
        match self.kind.role {
            Role::Plain => {}
            Role::Form(flavor) => {
                let state = self
                    .form
                    .get_or_insert_with(|| Rc::new(FormState::new(flavor)));
                state.sync(cx.props);
                cx.provided.provide_value(FORM_SCOPE, Rc::clone(state));
            }
            Role::FormItem { field_prop } => {
                if let Some(form) = cx.injected.inject_value::<FormState>(FORM_SCOPE) {
                    if let Some(rule) = FieldRule::from_props(cx.props, field_prop) {
                        form.register(rule);
                    }
                }
            }
        }
        let slots = match self.kind.caption.and_then(|prop| caption(cx.props, prop)) {
            Some(text) => with_caption(cx.slots, text),
            None => cx.slots.clone(),
        };
        h(self.kind.tag, cx.props.clone(), slots)
    }

    fn expose(&self) -> Option<Handle> {
        let state = Rc::clone(self.form.as_ref()?);
        Some(Rc::new(FormHandle {
            name: self.kind.name,
            state,
        }))
    }
}

fn caption(props: &PropMap, prop: &str) -> Option<String> {
    let value = unref(props.get(prop)?);
    match value {
        PropValue::Null => None,
        PropValue::Str(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn with_caption(slots: &SlotFns, text: String) -> SlotFns {
    let leading: SlotFn = Rc::new(move || vec![Child::Text(text.clone())]);
    let mut out = SlotFns::with_capacity(slots.len() + 1);
    out.insert(CAPTION_SLOT.to_string(), leading);
    for (name, slot) in slots {
        out.insert(name.clone(), Rc::clone(slot));
    }
    out
}

/// A `required` check on one model field.
#[derive(Clone, Debug, PartialEq)]
struct FieldRule {
    field: String,
    required: bool,
    /// Failing only warns; naive-ui reports it without rejecting.
    warning: bool,
}

impl FieldRule {
    /// Read a rule from a field's props: `required`, a `rule` map, or both.
    fn from_props(props: &PropMap, field_prop: &str) -> Option<Self> {
        let field = unref(props.get(field_prop)?);
        if field.is_null() {
            return None;
        }
        let mut rule = Self::from_rule(field.to_string(), props.get("rule"));
        if props.get("required").is_some_and(PropValue::is_truthy) {
            rule.required = true;
        }
        Some(rule)
    }

    /// Read a rule from a rule map, or from the first map of a rule list.
    fn from_rule(field: String, rule: Option<&PropValue>) -> Self {
        let rule = rule.map(unref).unwrap_or_default();
        let map = match &rule {
            PropValue::List(items) => items.iter().find_map(PropValue::as_map),
            other => other.as_map(),
        };
        let flag = |key: &str| map.and_then(|m| m.get(key)).map(unref);
        Self {
            field,
            required: flag("required").is_some_and(|v| v.is_truthy()),
            warning: flag("level").is_some_and(|v| v.as_str() == Some("warning")),
        }
    }
}

/// Live state of one mounted stand-in form.
#[derive(Debug)]
pub(crate) struct FormState {
    flavor: Flavor,
    model: RefCell<PropValue>,
    initial: RefCell<Option<PropValue>>,
    rules: RefCell<Vec<FieldRule>>,
    fields: RefCell<Vec<FieldRule>>,
    errors: RefCell<Vec<String>>,
    calls: RefCell<Vec<String>>,
}

impl FormState {
    fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            model: RefCell::new(PropValue::Null),
            initial: RefCell::new(None),
            rules: RefCell::new(Vec::new()),
            fields: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Take the props of a new render.  Fields register again afterwards.
    fn sync(&self, props: &PropMap) {
        let model = props.get("model").cloned().unwrap_or_default();
        self.initial
            .borrow_mut()
            .get_or_insert_with(|| unref(&model));
        *self.model.borrow_mut() = model;

        let rules = props.get("rules").map(unref).unwrap_or_default();
        *self.rules.borrow_mut() = rules
            .as_map()
            .map(|rules| {
                rules
                    .iter()
                    .map(|(field, rule)| FieldRule::from_rule(field.clone(), Some(rule)))
                    .collect()
            })
            .unwrap_or_default();
        self.fields.borrow_mut().clear();
    }

    fn register(&self, rule: FieldRule) {
        self.fields.borrow_mut().push(rule);
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }

    fn field_value(&self, field: &str) -> PropValue {
        unref(&self.model.borrow())
            .as_map()
            .and_then(|model| model.get(field))
            .map(unref)
            .unwrap_or_default()
    }

    /// Failing fields, split into errors and warnings.
    fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let rules = self.rules.borrow();
        let fields = self.fields.borrow();
        for rule in rules.iter().chain(fields.iter()) {
            if !rule.required || !is_blank(&self.field_value(&rule.field)) {
                continue;
            }
            let bucket = if rule.warning { &mut warnings } else { &mut errors };
            if !bucket.contains(&rule.field) {
                bucket.push(rule.field.clone());
            }
        }
        (errors, warnings)
    }

    fn validate(&self) -> Result<PropValue, HandleError> {
        self.record("validate");
        let (errors, warnings) = self.check();
        debug!(flavor = ?self.flavor, ?errors, ?warnings, "stand-in form validated");
        *self.errors.borrow_mut() = errors.clone();
        if !errors.is_empty() {
            let payload = match self.flavor {
                Flavor::AntDesign => PropValue::map([("errorFields", PropValue::list(errors))]),
                Flavor::Naive | Flavor::ElementPlus => PropValue::map(
                    errors
                        .into_iter()
                        .map(|field| {
                            let message = format!("{field} is required");
                            (field, PropValue::from(message))
                        }),
                ),
            };
            return Err(HandleError::Rejected(payload));
        }
        Ok(match self.flavor {
            Flavor::Naive if warnings.is_empty() => PropValue::map([("warning", PropValue::Null)]),
            Flavor::Naive => PropValue::map([("warning", PropValue::list(warnings))]),
            Flavor::ElementPlus => PropValue::from(true),
            Flavor::AntDesign => unref(&self.model.borrow()),
        })
    }

    fn clear(&self, call: &str) {
        self.record(call);
        self.errors.borrow_mut().clear();
    }

    fn reset(&self) {
        self.record("resetFields");
        self.errors.borrow_mut().clear();
        let initial = self.initial.borrow().clone();
        if let (PropValue::Reactive(cell), Some(initial)) = (&*self.model.borrow(), initial) {
            cell.set(initial);
        }
    }
}

fn is_blank(value: &PropValue) -> bool {
    match value {
        PropValue::Null => true,
        PropValue::Str(s) => s.trim().is_empty(),
        PropValue::List(items) => items.is_empty(),
        _ => false,
    }
}

/// The public handle of a stand-in form.
///
/// Every flavor has `validate`, plus `errors` and `calls` for inspection.
/// Naive forms add `restoreValidation`; the others add `clearValidate` and
/// `resetFields`.
struct FormHandle {
    name: &'static str,
    state: Rc<FormState>,
}

impl FormHandle {
    fn method(&self, f: impl Fn(&FormState) -> Result<PropValue, HandleError> + 'static) -> Option<HandleValue> {
        let state = Rc::clone(&self.state);
        Some(HandleValue::Method(Method::sync(move |_| f(&state))))
    }
}

impl ComponentHandle for FormHandle {
    fn name(&self) -> &str {
        self.name
    }

    fn get(&self, member: &str) -> Option<HandleValue> {
        let naive = self.state.flavor == Flavor::Naive;
        match member {
            "validate" => self.method(FormState::validate),
            "restoreValidation" if naive => self.method(|state| {
                state.clear("restoreValidation");
                Ok(PropValue::Null)
            }),
            "clearValidate" if !naive => self.method(|state| {
                state.clear("clearValidate");
                Ok(PropValue::Null)
            }),
            "resetFields" if !naive => self.method(|state| {
                state.reset();
                Ok(PropValue::Null)
            }),
            "errors" => Some(PropValue::list(self.state.errors.borrow().clone()).into()),
            "calls" => Some(PropValue::list(self.state.calls.borrow().clone()).into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewless_core::Reactive;

    fn props(entries: Vec<(&str, PropValue)>) -> PropMap {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn form(flavor: Flavor, model: PropValue) -> FormState {
        let state = FormState::new(flavor);
        state.sync(&props(vec![("model", model)]));
        state
    }

    #[test]
    fn field_rules_merge_required_flag_and_rule_map() {
        let rule = FieldRule::from_props(
            &props(vec![
                ("path", "name".into()),
                ("rule", PropValue::map([("level", "warning")])),
                ("required", true.into()),
            ]),
            "path",
        )
        .unwrap();
        assert!(rule.required && rule.warning);
        assert!(FieldRule::from_props(&props(vec![("label", "x".into())]), "path").is_none());
    }

    #[test]
    fn flavors_settle_failures_differently() {
        let model = PropValue::map([("name", "")]);
        for flavor in [Flavor::Naive, Flavor::ElementPlus, Flavor::AntDesign] {
            let state = form(flavor, model.clone());
            state.register(FieldRule::from_rule("name".into(), Some(&PropValue::map([("required", true)]))));
            assert!(matches!(state.validate(), Err(HandleError::Rejected(_))));
        }

        let state = form(Flavor::Naive, model);
        state.register(FieldRule::from_rule(
            "name".into(),
            Some(&PropValue::map([("required", PropValue::from(true)), ("level", "warning".into())])),
        ));
        let resolved = state.validate().unwrap();
        assert!(resolved.as_map().unwrap()["warning"].is_truthy());
    }

    #[test]
    fn form_level_rules_apply_without_items() {
        let state = FormState::new(Flavor::ElementPlus);
        state.sync(&props(vec![
            ("model", PropValue::map([("age", 3)])),
            ("rules", PropValue::map([("age", PropValue::map([("required", true)]))])),
        ]));
        assert_eq!(state.validate().unwrap(), PropValue::from(true));
    }

    #[test]
    fn reset_restores_the_first_model() {
        let cell = Reactive::new(PropValue::map([("name", "ada")]));
        let state = form(Flavor::AntDesign, PropValue::Reactive(cell.clone()));
        cell.set(PropValue::map([("name", "grace")]));
        state.reset();
        assert_eq!(cell.get(), PropValue::map([("name", "ada")]));
        assert_eq!(&*state.calls.borrow(), &["resetFields".to_string()]);
    }

    #[test]
    fn handle_members_follow_the_flavor() {
        let naive = FormHandle {
            name: "NForm",
            state: Rc::new(FormState::new(Flavor::Naive)),
        };
        assert!(naive.get("restoreValidation").is_some());
        assert!(naive.get("clearValidate").is_none());

        let element = FormHandle {
            name: "ElForm",
            state: Rc::new(FormState::new(Flavor::ElementPlus)),
        };
        assert!(element.get("resetFields").is_some());
        assert!(element.get("restoreValidation").is_none());
    }
}
