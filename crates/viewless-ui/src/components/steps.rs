use viewless_core::{use_viewless_component, FlatOption, UiComponent};

pub const STEPS: &str = "Steps";
pub const STEPS_ITEM: &str = "StepsItem";

/// Props: `vertical`, `current`, `size`.  Events: `update:current`.
pub fn use_steps(option: FlatOption) -> UiComponent {
    use_viewless_component(STEPS, option)
}

/// Props: `status`, `description`, `disabled`, `title`.
/// Slots: `default`, `title`, `icon`.
pub fn use_steps_item(option: FlatOption) -> UiComponent {
    use_viewless_component(STEPS_ITEM, option)
}
