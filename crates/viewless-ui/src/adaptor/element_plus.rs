use viewless_core::{AdaptorMap, AdaptorSet, HandleAdaptor, UiComponent};

use super::{retarget, settle_validate};
use crate::components::{members, BUTTON, CARD, FORM, FORM_ITEM, INPUT};
use crate::kit::element_plus::{components, ElementPlus};
use crate::utils::rename_prop;

/// Adaptor set for element-plus.
///
/// element-plus already speaks `modelValue`, so fields and inputs only
/// change component.  `clearValidate` and `resetFields` reach the native
/// form unchanged.
pub fn use_adaptor() -> AdaptorSet {
    let ElementPlus {
        form,
        form_item,
        input,
        card,
        button,
    } = components();

    let map = AdaptorMap::new()
        .with(FORM, move |option| {
            let props = rename_prop(&option.props, "modelValue", "model");
            retarget(UiComponent { props, ..option }, &form)
        })
        .with(FORM_ITEM, move |option| retarget(option, &form_item))
        .with(INPUT, move |option| retarget(option, &input))
        .with(CARD, move |option| {
            let props = rename_prop(&option.props, "title", "header");
            retarget(UiComponent { props, ..option }, &card)
        })
        .with(BUTTON, move |option| retarget(option, &button));

    let handles = HandleAdaptor::new().with(FORM, members::VALIDATE, |raw| {
        settle_validate(raw, |_| true)
    });

    AdaptorSet::from_map(map).with_handle_adaptor(handles)
}
