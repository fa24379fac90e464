use viewless_core::{use_viewless_component, FlatOption, PropMap, PropValue, UiComponent};

pub const MENU: &str = "Menu";

/// One entry of a menu's `options` prop.
#[derive(Clone, Debug, Default)]
pub struct MenuItem {
    pub label: String,
    pub value: String,
    pub disabled: bool,
    pub icon: Option<String>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = MenuItem>) -> Self {
        self.children = children.into_iter().collect();
        self
    }
}

impl From<MenuItem> for PropValue {
    fn from(item: MenuItem) -> Self {
        let mut map = PropMap::new();
        map.insert("label".into(), item.label.into());
        map.insert("value".into(), item.value.into());
        if item.disabled {
            map.insert("disabled".into(), true.into());
        }
        if let Some(icon) = item.icon {
            map.insert("icon".into(), icon.into());
        }
        if !item.children.is_empty() {
            map.insert("children".into(), PropValue::list(item.children));
        }
        PropValue::Map(map)
    }
}

/// A navigation menu driven by its `options` tree.
///
/// Props: `title`, `size`, `accordion`, `indent`, `options`, `mode`,
/// `value`, `expandKeys`, `collapsed`.
/// Events: `update:value`, `update:expandKeys`.
pub fn use_menu(option: FlatOption) -> UiComponent {
    use_viewless_component(MENU, option)
}
