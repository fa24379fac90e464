//! naive-ui stand-ins.

use viewless_core::ComponentRef;

use super::{Flavor, KitComponent};

/// The naive-ui components the adaptor targets.
#[derive(Clone, Debug)]
pub struct NaiveUi {
    pub form: ComponentRef,
    pub form_item: ComponentRef,
    pub input: ComponentRef,
    pub card: ComponentRef,
    pub button: ComponentRef,
    pub tabs: ComponentRef,
    pub tab_pane: ComponentRef,
}

impl NaiveUi {
    fn new() -> Self {
        Self {
            form: KitComponent::form("NForm", Flavor::Naive).into_ref(),
            form_item: KitComponent::form_item("NFormItem", "path").into_ref(),
            input: KitComponent::plain("NInput", "input")
                .with_caption("value")
                .into_ref(),
            card: KitComponent::plain("NCard", "article")
                .with_caption("title")
                .into_ref(),
            button: KitComponent::plain("NButton", "button").into_ref(),
            tabs: KitComponent::plain("NTabs", "nav").into_ref(),
            tab_pane: KitComponent::plain("NTabPane", "section")
                .with_caption("tab")
                .into_ref(),
        }
    }
}

thread_local! {
    static NAIVE_UI: NaiveUi = NaiveUi::new();
}

/// The components, shared by every caller on this thread.
pub fn components() -> NaiveUi {
    NAIVE_UI.with(Clone::clone)
}
