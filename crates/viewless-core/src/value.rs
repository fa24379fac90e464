//! Property values, reactive boxes and the single "dereference if boxed"
//! utility.
//!
//! Everything an author can hand to a component as a property is a
//! [`PropValue`].  Two variants are *boxed*: [`PropValue::Reactive`] holds a
//! shared, mutable [`Reactive`] cell and [`PropValue::Computed`] holds a
//! derivation that is re-evaluated on every read.  Code that needs the
//! current value of a property calls [`unref`] instead of matching on the
//! boxed variants itself.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::component::ComponentRef;
use crate::option::EventHandler;

/// Insertion-ordered property map.
pub type PropMap = IndexMap<String, PropValue>;

/// A shared, interior-mutable value box.
///
/// Cloning a `Reactive` clones the handle, not the value: every clone observes
/// every [`set`](Reactive::set).  This is the "reactive box" primitive the
/// renderer dereferences at render time.
pub struct Reactive<T>(Rc<RefCell<T>>);

impl<T> Reactive<T> {
    /// Box a value.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Replace the current value.
    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    /// Mutate the current value in place.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.0.borrow_mut());
    }

    /// Read the current value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    /// Whether both handles point at the same box.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> Reactive<T> {
    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Reactive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reactive").field(&*self.0.borrow()).finish()
    }
}

/// A derived value, recomputed on every read.
pub struct Computed<T>(Rc<dyn Fn() -> T>);

impl<T> Computed<T> {
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Evaluate the derivation.
    pub fn get(&self) -> T {
        (self.0)()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Computed(..)")
    }
}

/// Any value an author can pass as a component property.
#[derive(Clone, Debug, Default)]
pub enum PropValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<PropValue>),
    Map(PropMap),
    /// An event handler, stored under an `on*` host prop after rendering.
    Handler(EventHandler),
    /// A concrete component reference passed as data.
    Component(ComponentRef),
    Reactive(Reactive<PropValue>),
    Computed(Computed<PropValue>),
}

impl PropValue {
    /// Build a map value from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<PropValue>,
    {
        PropValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list value.
    pub fn list<V: Into<PropValue>>(items: impl IntoIterator<Item = V>) -> Self {
        PropValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Box a value into a fresh reactive cell.
    pub fn reactive(value: impl Into<PropValue>) -> (Reactive<PropValue>, Self) {
        let cell = Reactive::new(value.into());
        (cell.clone(), PropValue::Reactive(cell))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Whether this value is a reactive box or a derivation.
    pub fn is_boxed(&self) -> bool {
        matches!(self, PropValue::Reactive(_) | PropValue::Computed(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PropMap> {
        match self {
            PropValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            PropValue::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Truthiness of the current value.  Boxed values are dereferenced first.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Null => false,
            PropValue::Bool(b) => *b,
            PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
            PropValue::Str(s) => !s.is_empty(),
            PropValue::List(_)
            | PropValue::Map(_)
            | PropValue::Handler(_)
            | PropValue::Component(_) => true,
            PropValue::Reactive(_) | PropValue::Computed(_) => unref(self).is_truthy(),
        }
    }
}

/// Dereference a boxed value, returning the current plain value.
///
/// Nested boxes are followed until a plain value is reached.  Plain values are
/// returned as-is.  This is the one place reactive/computed values are read;
/// nothing caches the result across renders.
pub fn unref(value: &PropValue) -> PropValue {
    let mut current = value.clone();
    loop {
        current = match current {
            PropValue::Reactive(cell) => cell.get(),
            PropValue::Computed(derived) => derived.get(),
            plain => return plain,
        };
    }
}

/// Format a number the way text nodes display it: integral values without a
/// fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => f.write_str("null"),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Number(n) => f.write_str(&format_number(*n)),
            PropValue::Str(s) => f.write_str(s),
            PropValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            PropValue::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            PropValue::Handler(_) => f.write_str("[handler]"),
            PropValue::Component(c) => write!(f, "[component {}]", c.name()),
            PropValue::Reactive(_) | PropValue::Computed(_) => write!(f, "{}", unref(self)),
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Null, PropValue::Null) => true,
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => a == b,
            (PropValue::Str(a), PropValue::Str(b)) => a == b,
            (PropValue::List(a), PropValue::List(b)) => a == b,
            (PropValue::Map(a), PropValue::Map(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => a.ptr_eq(b),
            (PropValue::Component(a), PropValue::Component(b)) => a == b,
            (PropValue::Reactive(a), PropValue::Reactive(b)) => a.ptr_eq(b),
            (PropValue::Computed(a), PropValue::Computed(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Number(n as f64)
    }
}

impl From<u32> for PropValue {
    fn from(n: u32) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<usize> for PropValue {
    fn from(n: usize) -> Self {
        PropValue::Number(n as f64)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(items: Vec<PropValue>) -> Self {
        PropValue::List(items)
    }
}

impl From<PropMap> for PropValue {
    fn from(map: PropMap) -> Self {
        PropValue::Map(map)
    }
}

impl From<EventHandler> for PropValue {
    fn from(handler: EventHandler) -> Self {
        PropValue::Handler(handler)
    }
}

impl From<ComponentRef> for PropValue {
    fn from(component: ComponentRef) -> Self {
        PropValue::Component(component)
    }
}

impl From<Reactive<PropValue>> for PropValue {
    fn from(cell: Reactive<PropValue>) -> Self {
        PropValue::Reactive(cell)
    }
}

impl From<Computed<PropValue>> for PropValue {
    fn from(derived: Computed<PropValue>) -> Self {
        PropValue::Computed(derived)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unref_reads_current_value() {
        let (cell, value) = PropValue::reactive("a");
        assert_eq!(unref(&value), PropValue::from("a"));
        cell.set("b".into());
        assert_eq!(unref(&value), PropValue::from("b"));
    }

    #[test]
    fn unref_follows_nested_boxes() {
        let inner = Reactive::new(PropValue::from(3));
        let outer = PropValue::Reactive(Reactive::new(PropValue::Reactive(inner.clone())));
        assert_eq!(unref(&outer), PropValue::from(3));
        inner.set(PropValue::from(4));
        assert_eq!(unref(&outer), PropValue::from(4));
    }

    #[test]
    fn computed_is_recomputed_on_every_read() {
        let source = Reactive::new(1);
        let derived = {
            let source = source.clone();
            Computed::new(move || PropValue::from(source.get() * 10))
        };
        let value = PropValue::Computed(derived);
        assert_eq!(unref(&value), PropValue::from(10));
        source.set(2);
        assert_eq!(unref(&value), PropValue::from(20));
    }

    #[test]
    fn truthiness() {
        assert!(!PropValue::Null.is_truthy());
        assert!(!PropValue::from("").is_truthy());
        assert!(!PropValue::from(0).is_truthy());
        assert!(!PropValue::Number(f64::NAN).is_truthy());
        assert!(PropValue::from("x").is_truthy());
        assert!(PropValue::Map(PropMap::new()).is_truthy());
        let (cell, boxed) = PropValue::reactive(false);
        assert!(!boxed.is_truthy());
        cell.set(true.into());
        assert!(boxed.is_truthy());
    }

    #[test]
    fn numbers_format_without_trailing_zero() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn display_coerces_like_text() {
        assert_eq!(PropValue::list([1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(PropValue::map([("a", 1)]).to_string(), "{a: 1}");
        assert_eq!(PropValue::from(true).to_string(), "true");
    }

    #[test]
    fn reactive_equality_is_identity() {
        let a = Reactive::new(PropValue::from(1));
        let b = Reactive::new(PropValue::from(1));
        assert_eq!(PropValue::Reactive(a.clone()), PropValue::Reactive(a.clone()));
        assert_ne!(PropValue::Reactive(a), PropValue::Reactive(b));
    }
}
