use viewless_core::{use_viewless_component, FlatOption, UiComponent};

pub const TABS: &str = "Tabs";
pub const TAB_ITEM: &str = "TabItem";

/// A tab strip.
///
/// Props: `size`, `type`, `name` (the active tab), `placement`.
/// Events: `update:name`, `itemClick`.
pub fn use_tabs(option: FlatOption) -> UiComponent {
    use_viewless_component(TABS, option)
}

/// One tab.  Props: `lazy`, `disabled`, `name`, `title`.
pub fn use_tab_item(option: FlatOption) -> UiComponent {
    use_viewless_component(TAB_ITEM, option)
}
