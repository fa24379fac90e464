use viewless_core::{use_viewless_component, FlatOption, UiComponent};

/// Abstract identifier of a button.
pub const BUTTON: &str = "Button";

/// A button.
///
/// Props: `type`.  Events: `click`.  Slots: `default` (the label).
pub fn use_button(option: FlatOption) -> UiComponent {
    use_viewless_component(BUTTON, option)
}
