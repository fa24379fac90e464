use viewless_core::{unref, AdaptorMap, AdaptorSet, HandleAdaptor, PropMap, PropValue, UiComponent};

use super::{alias, retarget, settle_validate};
use crate::components::{members, BUTTON, CARD, FORM, FORM_ITEM, INPUT, TABS, TAB_ITEM};
use crate::kit::naive::{components, NaiveUi};
use crate::utils::{rename_event, rename_props, transform_props};

/// Adaptor set for naive-ui.
pub fn use_adaptor() -> AdaptorSet {
    let NaiveUi {
        form,
        form_item,
        input,
        card,
        button,
        tabs,
        tab_pane,
    } = components();

    let map = AdaptorMap::new()
        .with(FORM, move |option| {
            let props = rename_props(
                &option.props,
                &[("modelValue", "model"), ("labelPosition", "labelPlacement")],
            );
            retarget(UiComponent { props, ..option }, &form)
        })
        .with(FORM_ITEM, move |option| {
            let props = form_item_props(&option.props);
            retarget(UiComponent { props, ..option }, &form_item)
        })
        .with(INPUT, move |option| {
            let props = rename_props(&option.props, &[("modelValue", "value")]);
            let events = rename_event(&option.events, "update:modelValue", "update:value");
            retarget(
                UiComponent {
                    props,
                    events,
                    ..option
                },
                &input,
            )
        })
        .with(CARD, move |option| retarget(option, &card))
        .with(BUTTON, move |option| retarget(option, &button))
        .with(TABS, move |option| retarget(option, &tabs))
        .with(TAB_ITEM, move |option| retarget(option, &tab_pane));

    let handles = HandleAdaptor::new()
        .with(FORM, members::VALIDATE, |raw| {
            settle_validate(raw, |resolved| {
                !unref(resolved)
                    .as_map()
                    .and_then(|m| m.get("warning"))
                    .is_some_and(PropValue::is_truthy)
            })
        })
        .with(FORM, members::CLEAR_VALIDATE, |raw| alias(raw, "restoreValidation"));

    AdaptorSet::from_map(map).with_handle_adaptor(handles)
}

/// `prop` becomes `path`; a `required` flag folds into the `rule` map.
///
/// Applying it to its own output changes nothing.
fn form_item_props(props: &PropMap) -> PropMap {
    let required = props.get("required").cloned();
    transform_props(props, |key, value, out| match key {
        "prop" => {
            out.insert("path".into(), value.clone());
        }
        "required" => {
            out.insert("rule".into(), merged_rule(props.get("rule"), value));
        }
        "rule" => match &required {
            Some(required) => {
                out.insert("rule".into(), merged_rule(Some(value), required));
            }
            None => {
                out.insert("rule".into(), value.clone());
            }
        },
        _ => {
            out.insert(key.into(), value.clone());
        }
    })
}

fn merged_rule(rule: Option<&PropValue>, required: &PropValue) -> PropValue {
    let mut merged = rule
        .map(unref)
        .and_then(|rule| rule.as_map().cloned())
        .unwrap_or_default();
    merged.insert("required".into(), required.clone());
    PropValue::Map(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewless_core::{EventHandler, Target};

    fn rewrite(set: &AdaptorSet, option: UiComponent) -> UiComponent {
        let kind = option.target.name().to_string();
        let rewrite = set.adaptor_map.get(&kind).unwrap();
        rewrite(option)
    }

    #[test]
    fn form_item_folds_required_into_rule() {
        let set = use_adaptor();
        let item = rewrite(
            &set,
            UiComponent::new(FORM_ITEM)
                .prop("prop", "username")
                .prop("label", "Username")
                .prop("required", true),
        );
        assert_eq!(item.props.get("path"), Some(&PropValue::from("username")));
        assert_eq!(
            item.props.get("rule"),
            Some(&PropValue::map([("required", true)]))
        );
        assert!(!item.props.contains_key("prop"));
        assert!(!item.props.contains_key("required"));
        assert_eq!(item.target, Target::from(&components().form_item));
    }

    #[test]
    fn existing_rule_is_extended_not_replaced() {
        let set = use_adaptor();
        let rule = PropValue::map([("trigger", "blur")]);
        for option in [
            UiComponent::new(FORM_ITEM).prop("required", true).prop("rule", rule.clone()),
            UiComponent::new(FORM_ITEM).prop("rule", rule.clone()).prop("required", true),
        ] {
            let item = rewrite(&set, option);
            let merged = item.props.get("rule").and_then(PropValue::as_map).unwrap();
            assert_eq!(merged.get("trigger"), Some(&PropValue::from("blur")));
            assert_eq!(merged.get("required"), Some(&PropValue::from(true)));
            assert_eq!(item.props.len(), 1);
        }
        assert_eq!(rule, PropValue::map([("trigger", "blur")]));
    }

    #[test]
    fn form_item_rewrite_is_idempotent() {
        let props: PropMap = [
            ("prop", PropValue::from("password")),
            ("required", true.into()),
            ("rule", PropValue::map([("level", "warning")])),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let once = form_item_props(&props);
        assert_eq!(form_item_props(&once), once);
    }

    #[test]
    fn input_renames_value_and_update_event() {
        let set = use_adaptor();
        let input = rewrite(
            &set,
            UiComponent::new(INPUT)
                .prop("modelValue", "ada")
                .on("update:modelValue", EventHandler::new(|_| {})),
        );
        assert_eq!(input.props.get("value"), Some(&PropValue::from("ada")));
        assert!(input.events.contains_key("update:value"));
        assert!(!input.events.contains_key("update:modelValue"));
    }

    #[test]
    fn every_abstract_kind_is_covered() {
        let set = use_adaptor();
        let kinds: Vec<_> = set.adaptor_map.kinds().collect();
        assert_eq!(kinds, [FORM, FORM_ITEM, INPUT, CARD, BUTTON, TABS, TAB_ITEM]);
        let card = set.adaptor.apply(UiComponent::new(CARD));
        assert_eq!(card.target.name(), "NCard");
        let concrete = UiComponent::new(components().card);
        assert_eq!(set.adaptor.apply(concrete).target.name(), "NCard");
    }

    #[test]
    fn tabs_keep_their_props_and_swap_the_component() {
        let set = use_adaptor();
        let tabs = rewrite(
            &set,
            UiComponent::new(TABS)
                .prop("name", "login")
                .on("update:name", EventHandler::new(|_| {})),
        );
        assert_eq!(tabs.target.name(), "NTabs");
        assert_eq!(tabs.props.get("name"), Some(&PropValue::from("login")));
        assert!(tabs.events.contains_key("update:name"));

        let pane = rewrite(&set, UiComponent::new(TAB_ITEM).prop("name", "a").prop("title", "A"));
        assert_eq!(pane.target.name(), "NTabPane");
        assert_eq!(pane.props.keys().collect::<Vec<_>>(), ["name", "title"]);
    }
}
