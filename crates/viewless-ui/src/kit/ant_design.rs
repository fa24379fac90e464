//! ant-design-vue stand-ins.

use viewless_core::ComponentRef;

use super::{Flavor, KitComponent};

#[derive(Clone, Debug)]
pub struct AntDesign {
    pub form: ComponentRef,
    pub form_item: ComponentRef,
    pub input: ComponentRef,
    pub card: ComponentRef,
    pub button: ComponentRef,
}

impl AntDesign {
    fn new() -> Self {
        Self {
            form: KitComponent::form("AForm", Flavor::AntDesign).into_ref(),
            form_item: KitComponent::form_item("AFormItem", "name").into_ref(),
            input: KitComponent::plain("AInput", "input")
                .with_caption("value")
                .into_ref(),
            card: KitComponent::plain("ACard", "article")
                .with_caption("title")
                .into_ref(),
            button: KitComponent::plain("AButton", "button").into_ref(),
        }
    }
}

thread_local! {
    static ANT_DESIGN: AntDesign = AntDesign::new();
}

pub fn components() -> AntDesign {
    ANT_DESIGN.with(Clone::clone)
}
