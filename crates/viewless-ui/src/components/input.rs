use viewless_core::{use_viewless_component, FlatOption, UiComponent};

pub const INPUT: &str = "Input";

/// A text field bound through `modelValue` / `update:modelValue`.
///
/// Props: `modelValue`, `type`, `placeholder`, `clearable`, `maxLength`,
/// `minLength`, `readonly`, `disabled`, `size`, `rows`.
/// Events: `change`, `input`, `focus`, `blur`, `update:modelValue`, `clear`.
/// Slots: `prefix`, `suffix`.
pub fn use_input(option: FlatOption) -> UiComponent {
    use_viewless_component(INPUT, option)
}
