use viewless_core::{use_viewless_component, FlatOption, UiComponent};

pub const COLLAPSE: &str = "Collapse";
pub const COLLAPSE_ITEM: &str = "CollapseItem";

/// A set of expandable panels.
///
/// Props: `names` (the expanded items), `arrowPlacement`, `accordion`.
/// Events: `itemClick`, `update:names`.
pub fn use_collapse(option: FlatOption) -> UiComponent {
    use_viewless_component(COLLAPSE, option)
}

/// One panel of a [`use_collapse`] group.
///
/// Props: `title`, `disabled`, `name`.  Slots: `default`, `headerExtra`.
pub fn use_collapse_item(option: FlatOption) -> UiComponent {
    use_viewless_component(COLLAPSE_ITEM, option)
}
