//! element-plus stand-ins.

use viewless_core::ComponentRef;

use super::{Flavor, KitComponent};

#[derive(Clone, Debug)]
pub struct ElementPlus {
    pub form: ComponentRef,
    pub form_item: ComponentRef,
    pub input: ComponentRef,
    pub card: ComponentRef,
    pub button: ComponentRef,
}

impl ElementPlus {
    fn new() -> Self {
        Self {
            form: KitComponent::form("ElForm", Flavor::ElementPlus).into_ref(),
            form_item: KitComponent::form_item("ElFormItem", "prop").into_ref(),
            input: KitComponent::plain("ElInput", "input")
                .with_caption("modelValue")
                .into_ref(),
            card: KitComponent::plain("ElCard", "article")
                .with_caption("header")
                .into_ref(),
            button: KitComponent::plain("ElButton", "button").into_ref(),
        }
    }
}

thread_local! {
    static ELEMENT_PLUS: ElementPlus = ElementPlus::new();
}

pub fn components() -> ElementPlus {
    ELEMENT_PLUS.with(Clone::clone)
}
