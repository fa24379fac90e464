use viewless_core::{use_viewless_component, FlatOption, UiComponent};

pub const CARD: &str = "Card";

/// A titled container.
///
/// Props: `title`, `size`.  Slots: `default`, `title`, `footer`, `actions`.
pub fn use_card(option: FlatOption) -> UiComponent {
    use_viewless_component(CARD, option)
}
