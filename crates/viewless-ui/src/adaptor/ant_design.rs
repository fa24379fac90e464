use viewless_core::{unref, AdaptorMap, AdaptorSet, Computed, HandleAdaptor, PropValue, UiComponent};

use super::{retarget, settle_validate};
use crate::components::{members, BUTTON, CARD, FORM, FORM_ITEM, INPUT};
use crate::kit::ant_design::{components, AntDesign};
use crate::utils::{rename_event, rename_prop, rename_props, transform_props};

/// Adaptor set for ant-design-vue.
pub fn use_adaptor() -> AdaptorSet {
    let AntDesign {
        form,
        form_item,
        input,
        card,
        button,
    } = components();

    let map = AdaptorMap::new()
        .with(FORM, move |option| {
            let props = transform_props(&option.props, |key, value, out| {
                match key {
                    "modelValue" => out.insert("model".into(), value.clone()),
                    "labelPosition" => out.insert("layout".into(), layout(value)),
                    _ => out.insert(key.into(), value.clone()),
                };
            });
            retarget(UiComponent { props, ..option }, &form)
        })
        .with(FORM_ITEM, move |option| {
            let props = rename_prop(&option.props, "prop", "name");
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
        .with(BUTTON, move |option| retarget(option, &button));

    let handles = HandleAdaptor::new().with(FORM, members::VALIDATE, |raw| {
        settle_validate(raw, |_| true)
    });

    AdaptorSet::from_map(map).with_handle_adaptor(handles)
}

/// `top` lays the form out vertically, anything else horizontally.  A boxed
/// position yields a derivation that follows it.
fn layout(position: &PropValue) -> PropValue {
    fn resolve(position: &PropValue) -> PropValue {
        let vertical = unref(position).as_str() == Some("top");
        PropValue::from(if vertical { "vertical" } else { "horizontal" })
    }
    if position.is_boxed() {
        let position = position.clone();
        PropValue::Computed(Computed::new(move || resolve(&position)))
    } else {
        resolve(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_label_position_maps_to_layout() {
        let set = use_adaptor();
        let form = set.adaptor.apply(
            UiComponent::new(FORM)
                .prop("modelValue", PropValue::map([("username", "")]))
                .prop("labelPosition", "top"),
        );
        assert_eq!(form.target.name(), "AForm");
        assert_eq!(form.props.get("layout"), Some(&PropValue::from("vertical")));
        assert!(form.props.contains_key("model"));
        assert!(!form.props.contains_key("labelPosition"));
    }

    #[test]
    fn boxed_label_position_stays_live() {
        let (position, boxed) = PropValue::reactive("left");
        let layout = layout(&boxed);
        assert!(matches!(layout, PropValue::Computed(_)));
        assert_eq!(unref(&layout), PropValue::from("horizontal"));
        position.set("top".into());
        assert_eq!(unref(&layout), PropValue::from("vertical"));
    }

    #[test]
    fn form_item_prop_becomes_name() {
        let set = use_adaptor();
        let item = set
            .adaptor
            .apply(UiComponent::new(FORM_ITEM).prop("prop", "username").prop("required", true));
        assert_eq!(item.props.get("name"), Some(&PropValue::from("username")));
        assert_eq!(item.props.get("required"), Some(&PropValue::from(true)));
    }
}
