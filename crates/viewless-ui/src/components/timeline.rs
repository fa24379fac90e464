use viewless_core::{use_viewless_component, FlatOption, UiComponent};

pub const TIMELINE: &str = "Timeline";
pub const TIMELINE_ITEM: &str = "TimelineItem";

pub fn use_timeline(option: FlatOption) -> UiComponent {
    use_viewless_component(TIMELINE, option)
}

/// Props: `lineType`, `type`, `time`, `title`, `content`.
/// Slots: `default`, `icon`, `footer`, `header`.
pub fn use_timeline_item(option: FlatOption) -> UiComponent {
    use_viewless_component(TIMELINE_ITEM, option)
}
