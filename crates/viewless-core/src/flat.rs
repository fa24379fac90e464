//! Flat-option transform.
//!
//! Authors usually write component options as one flat map:
//!
//! | Key shape | Meaning | Example |
//! |-----------|---------|---------|
//! | `$` prefix or `vdirs` | structural attribute | `$key`, `$vshow`, `$ref`, `vdirs` |
//! | `on` + uppercase letter | event | `onClick`, `onUpdate:modelValue` |
//! | `Slot` suffix | slot content | `defaultSlot`, `headerSlot` |
//! | anything else | property | `placeholder` |
//!
//! Rules are checked in that order, so `onHeaderSlot` is an event and
//! `$defaultSlot` is a (rejected) structural attribute.  [`FlatOption::parse`]
//! turns the flat map into a canonical [`ComponentOption`].

use indexmap::IndexMap;
use tracing::warn;

use crate::error::OptionError;
use crate::option::{
    ComponentOption, Directive, EventHandler, Key, Producer, SlotContent, Target, UiComponent,
    Visibility,
};
use crate::render::capitalize;
use crate::value::{unref, Computed, PropMap, PropValue, Reactive};

/// What to do with flat entries that cannot be classified cleanly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlatMode {
    /// Log a warning and drop the entry.
    #[default]
    Lenient,
    /// Fail with an [`OptionError`].
    Strict,
}

/// Classification of a flat key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Structural,
    Event,
    Slot,
    Prop,
}

/// Flat key holding the node's directive list.
pub const DIRECTIVES_KEY: &str = "vdirs";

/// Classify a flat key by the precedence rule: structural prefix, event
/// prefix, slot suffix, property.
pub fn classify_key(key: &str) -> KeyKind {
    if key.starts_with('$') || key == DIRECTIVES_KEY {
        KeyKind::Structural
    } else if event_name(key).is_some() {
        KeyKind::Event
    } else if slot_name(key).is_some() {
        KeyKind::Slot
    } else {
        KeyKind::Prop
    }
}

/// `onFoo` -> `foo`, `onUpdate:modelValue` -> `update:modelValue`.
pub fn event_name(key: &str) -> Option<String> {
    let rest = key.strip_prefix("on")?;
    let first = rest.chars().next().filter(char::is_ascii_uppercase)?;
    let mut name = String::with_capacity(rest.len());
    name.push(first.to_ascii_lowercase());
    name.push_str(&rest[first.len_utf8()..]);
    Some(name)
}

/// `headerSlot` -> `header`.
pub fn slot_name(key: &str) -> Option<&str> {
    key.strip_suffix("Slot").filter(|name| !name.is_empty())
}

/// A value in a flat option.
#[derive(Clone, Debug)]
pub enum FlatValue {
    Prop(PropValue),
    Slot(SlotContent),
    Visibility(Visibility),
    /// Explicitly undefined; an undefined event handler is kept as `None`.
    Undefined,
}

impl FlatValue {
    fn kind(&self) -> &'static str {
        match self {
            FlatValue::Prop(PropValue::Handler(_)) => "an event handler",
            FlatValue::Prop(_) => "a property value",
            FlatValue::Slot(_) => "slot content",
            FlatValue::Visibility(_) => "a visibility flag",
            FlatValue::Undefined => "undefined",
        }
    }

    /// A lazily produced slot.
    pub fn slot(f: impl Fn() -> SlotContent + 'static) -> Self {
        FlatValue::Slot(SlotContent::Producer(Producer::new(f)))
    }

    /// An event handler.
    pub fn handler(f: impl Fn(&[PropValue]) + 'static) -> Self {
        FlatValue::Prop(PropValue::Handler(EventHandler::new(f)))
    }
}

impl<T: Into<PropValue>> From<T> for FlatValue {
    fn from(value: T) -> Self {
        FlatValue::Prop(value.into())
    }
}

impl From<SlotContent> for FlatValue {
    fn from(content: SlotContent) -> Self {
        FlatValue::Slot(content)
    }
}

impl From<UiComponent> for FlatValue {
    fn from(component: UiComponent) -> Self {
        FlatValue::Slot(component.into())
    }
}

impl From<Vec<UiComponent>> for FlatValue {
    fn from(components: Vec<UiComponent>) -> Self {
        FlatValue::Slot(components.into())
    }
}

impl From<Vec<Directive>> for FlatValue {
    fn from(directives: Vec<Directive>) -> Self {
        FlatValue::Prop(PropValue::list(directives))
    }
}

impl From<Visibility> for FlatValue {
    fn from(visibility: Visibility) -> Self {
        FlatValue::Visibility(visibility)
    }
}

impl From<Reactive<bool>> for FlatValue {
    fn from(cell: Reactive<bool>) -> Self {
        FlatValue::Visibility(cell.into())
    }
}

impl From<Computed<bool>> for FlatValue {
    fn from(derived: Computed<bool>) -> Self {
        FlatValue::Visibility(derived.into())
    }
}

/// Author-facing flat option map, insertion ordered.
#[derive(Clone, Debug, Default)]
pub struct FlatOption {
    entries: IndexMap<String, FlatValue>,
}

impl FlatOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<FlatValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FlatValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lenient parse; never fails.
    pub fn into_option(self) -> ComponentOption {
        let mut option = ComponentOption::default();
        for (key, value) in self.entries {
            // Lenient mode logs instead of returning errors.
            let _ = place_entry(&mut option, key, value, FlatMode::Lenient);
        }
        option
    }

    /// Parse into a canonical option.  Each key is visited once.
    pub fn parse(self, mode: FlatMode) -> Result<ComponentOption, OptionError> {
        let mut option = ComponentOption::default();
        for (key, value) in self.entries {
            place_entry(&mut option, key, value, mode)?;
        }
        Ok(option)
    }
}

impl<K: Into<String>> FromIterator<(K, FlatValue)> for FlatOption {
    fn from_iter<I: IntoIterator<Item = (K, FlatValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn reject(mode: FlatMode, err: OptionError) -> Result<(), OptionError> {
    match mode {
        FlatMode::Strict => Err(err),
        FlatMode::Lenient => {
            warn!(%err, "dropping flat option entry");
            Ok(())
        }
    }
}

fn place_entry(
    option: &mut ComponentOption,
    key: String,
    value: FlatValue,
    mode: FlatMode,
) -> Result<(), OptionError> {
    match classify_key(&key) {
        KeyKind::Structural => place_structural(option, key, value, mode),
        KeyKind::Event => {
            let name = event_name(&key).unwrap_or_default();
            let handler = match value {
                FlatValue::Prop(PropValue::Handler(handler)) => Some(handler),
                FlatValue::Undefined | FlatValue::Prop(PropValue::Null) => None,
                _ => {
                    reject(mode, OptionError::InvalidEventValue { key })?;
                    None
                }
            };
            option.events.insert(name, handler);
            Ok(())
        }
        KeyKind::Slot => {
            let name = slot_name(&key).unwrap_or_default().to_string();
            let content = match value {
                FlatValue::Slot(content) => content,
                FlatValue::Prop(value) => SlotContent::from(value),
                FlatValue::Undefined => SlotContent::Empty,
                other @ FlatValue::Visibility(_) => {
                    return reject(
                        mode,
                        OptionError::InvalidPropValue {
                            key,
                            found: other.kind(),
                        },
                    );
                }
            };
            option.slots.insert(name, content);
            Ok(())
        }
        KeyKind::Prop => match value {
            FlatValue::Prop(value) => {
                option.props.insert(key, value);
                Ok(())
            }
            FlatValue::Undefined => Ok(()),
            other => reject(
                mode,
                OptionError::InvalidPropValue {
                    key,
                    found: other.kind(),
                },
            ),
        },
    }
}

fn place_structural(
    option: &mut ComponentOption,
    key: String,
    value: FlatValue,
    mode: FlatMode,
) -> Result<(), OptionError> {
    if !is_structural(&key) {
        return reject(mode, OptionError::UnknownStructuralKey { key });
    }
    match value {
        FlatValue::Undefined => Ok(()),
        FlatValue::Prop(value) if key == "$key" => {
            option.key = Key::from_value(&value);
            Ok(())
        }
        FlatValue::Visibility(visibility) if key == "$vshow" => {
            option.visible = Some(visibility);
            Ok(())
        }
        FlatValue::Prop(PropValue::Null) if key == "$vshow" => Ok(()),
        FlatValue::Prop(value) if key == "$vshow" => {
            option.visible = Some(Visibility::from_value(&value));
            Ok(())
        }
        FlatValue::Prop(value) if key == DIRECTIVES_KEY => {
            let items = match unref(&value) {
                PropValue::Null => Vec::new(),
                PropValue::List(items) => items,
                single => vec![single],
            };
            for item in items {
                match Directive::from_value(&unref(&item)) {
                    Some(directive) => option.directives.push(directive),
                    None => reject(
                        mode,
                        OptionError::InvalidStructuralValue {
                            key: key.clone(),
                            found: "a value that is not a directive",
                        },
                    )?,
                }
            }
            Ok(())
        }
        FlatValue::Prop(value) if key == "$ref" => {
            let value = unref(&value);
            if !value.is_null() {
                option.ref_name = Some(value.to_string());
            }
            Ok(())
        }
        other => {
            let found = other.kind();
            reject(mode, OptionError::InvalidStructuralValue { key, found })
        }
    }
}

fn is_structural(key: &str) -> bool {
    matches!(key, "$key" | "$vshow" | "$ref" | DIRECTIVES_KEY)
}

impl ComponentOption {
    /// The inverse of [`FlatOption::parse`].
    ///
    /// Round-trips whenever no property name itself looks like an event,
    /// slot or structural key.
    pub fn flatten(self) -> FlatOption {
        let mut flat = FlatOption::new();
        if let Some(key) = self.key {
            flat.insert("$key", PropValue::from(key));
        }
        if let Some(visible) = self.visible {
            flat.insert("$vshow", visible);
        }
        if let Some(ref_name) = self.ref_name {
            flat.insert("$ref", ref_name);
        }
        if !self.directives.is_empty() {
            flat.insert(DIRECTIVES_KEY, self.directives);
        }
        for (name, value) in self.props {
            flat.insert(name, value);
        }
        for (name, handler) in self.events {
            let value = handler.map_or(FlatValue::Undefined, |h| PropValue::Handler(h).into());
            flat.insert(format!("on{}", capitalize(&name)), value);
        }
        for (name, content) in self.slots {
            flat.insert(format!("{name}Slot"), content);
        }
        flat
    }
}

/// Build a [`UiComponent`] from a target and a flat option.
pub fn use_viewless_component(target: impl Into<Target>, option: FlatOption) -> UiComponent {
    UiComponent::from_option(target, option.into_option())
}

/// Convenience: collect a plain property map into a flat option.
impl From<PropMap> for FlatOption {
    fn from(props: PropMap) -> Self {
        props.into_iter().map(|(k, v)| (k, FlatValue::Prop(v))).collect()
    }
}
