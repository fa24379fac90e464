//! Pure helpers for rewriting prop and event maps inside adaptors.
//!
//! Every helper takes its input by reference and returns a new map.  Entries
//! keep their relative order; a renamed entry takes the position of its
//! source key.

use viewless_core::{EventHandler, Events, PropMap, PropValue};

/// Copy `props`, moving the entry under `from` to `to`.
///
/// An absent `from` leaves the map unchanged.  An existing `to` entry is
/// replaced.
pub fn rename_prop(props: &PropMap, from: &str, to: &str) -> PropMap {
    rename_props(props, &[(from, to)])
}

/// [`rename_prop`] for several pairs at once.
pub fn rename_props(props: &PropMap, renames: &[(&str, &str)]) -> PropMap {
    transform_props(props, |key, value, out| {
        let key = renamed(key, renames);
        out.insert(key.to_string(), value.clone());
    })
}

/// Copy `events`, moving the handler under `from` to `to`.
pub fn rename_event(events: &Events, from: &str, to: &str) -> Events {
    rename_events(events, &[(from, to)])
}

/// [`rename_event`] for several pairs at once.
pub fn rename_events(events: &Events, renames: &[(&str, &str)]) -> Events {
    transform_events(events, |key, handler, out| {
        let key = renamed(key, renames);
        out.insert(key.to_string(), handler.clone());
    })
}

/// Build a new prop map by feeding every entry of `props`, in order, to `f`.
///
/// `f` decides what lands in the output: it may copy the entry, rename it,
/// drop it, or derive other entries from it.
pub fn transform_props(
    props: &PropMap,
    mut f: impl FnMut(&str, &PropValue, &mut PropMap),
) -> PropMap {
    let mut out = PropMap::with_capacity(props.len());
    for (key, value) in props {
        f(key, value, &mut out);
    }
    out
}

/// Event counterpart of [`transform_props`].
pub fn transform_events(
    events: &Events,
    mut f: impl FnMut(&str, &Option<EventHandler>, &mut Events),
) -> Events {
    let mut out = Events::with_capacity(events.len());
    for (key, handler) in events {
        f(key, handler, &mut out);
    }
    out
}

fn renamed<'a>(key: &'a str, renames: &[(&'a str, &'a str)]) -> &'a str {
    renames
        .iter()
        .find(|(from, _)| *from == key)
        .map_or(key, |(_, to)| to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> PropMap {
        [
            ("modelValue", PropValue::from("ada")),
            ("size", PropValue::from("small")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn rename_keeps_position_and_leaves_input_alone() {
        let input = props();
        let out = rename_prop(&input, "modelValue", "value");
        assert_eq!(out.keys().collect::<Vec<_>>(), ["value", "size"]);
        assert!(input.contains_key("modelValue"));
        assert!(!out.contains_key("modelValue"));
    }

    #[test]
    fn rename_of_absent_key_is_identity() {
        let out = rename_prop(&props(), "label", "title");
        assert_eq!(out, props());
    }

    #[test]
    fn transform_can_derive_entries() {
        let out = transform_props(&props(), |key, value, out| {
            if key == "size" {
                out.insert("compact".into(), (value.as_str() == Some("small")).into());
            } else {
                out.insert(key.into(), value.clone());
            }
        });
        assert_eq!(out.get("compact"), Some(&PropValue::from(true)));
        assert!(!out.contains_key("size"));
    }

    #[test]
    fn events_rename_and_keep_undefined() {
        let mut events = Events::new();
        events.insert("update:modelValue".into(), Some(EventHandler::new(|_| {})));
        events.insert("blur".into(), None);
        let out = rename_event(&events, "update:modelValue", "update:value");
        assert!(matches!(out.get("update:value"), Some(Some(_))));
        assert!(matches!(out.get("blur"), Some(None)));
        assert_eq!(events.len(), 2);
        assert!(events.contains_key("update:modelValue"));
    }
}
