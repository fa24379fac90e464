//! Public handles of mounted components.

use futures::future::{self, FutureExt, LocalBoxFuture};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

use crate::error::HandleError;
use crate::value::PropValue;

/// Result of calling a handle method.  Single-threaded, so `!Send`.
pub type MethodFuture = LocalBoxFuture<'static, Result<PropValue, HandleError>>;

/// A callable member of a handle.
#[derive(Clone)]
pub struct Method(Rc<dyn Fn(Vec<PropValue>) -> MethodFuture>);

impl Method {
    /// An asynchronous method.
    pub fn new(f: impl Fn(Vec<PropValue>) -> MethodFuture + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// A synchronous method, exposed through the same future-returning API.
    pub fn sync(f: impl Fn(Vec<PropValue>) -> Result<PropValue, HandleError> + 'static) -> Self {
        Self::new(move |args| future::ready(f(args)).boxed_local())
    }

    pub fn call(&self, args: Vec<PropValue>) -> MethodFuture {
        (self.0)(args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Method(..)")
    }
}

/// A member read off a handle.
#[derive(Clone, Debug)]
pub enum HandleValue {
    Value(PropValue),
    Method(Method),
}

impl HandleValue {
    pub fn as_value(&self) -> Option<&PropValue> {
        match self {
            HandleValue::Value(value) => Some(value),
            HandleValue::Method(_) => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            HandleValue::Method(method) => Some(method),
            HandleValue::Value(_) => None,
        }
    }
}

impl From<Method> for HandleValue {
    fn from(method: Method) -> Self {
        HandleValue::Method(method)
    }
}

impl From<PropValue> for HandleValue {
    fn from(value: PropValue) -> Self {
        HandleValue::Value(value)
    }
}

/// The public surface a mounted component exposes to template refs.
pub trait ComponentHandle {
    /// Name of the concrete component or element behind the handle.
    fn name(&self) -> &str;

    /// Read a member.  `None` if the component has no such member.
    fn get(&self, member: &str) -> Option<HandleValue>;
}

/// Shared handle to a mounted component.
pub type Handle = Rc<dyn ComponentHandle>;

/// A fixed member table, the simplest [`ComponentHandle`].
///
/// The headless host gives native elements a table holding their
/// `tagName`.
#[derive(Clone, Debug, Default)]
pub struct HandleTable {
    name: String,
    members: IndexMap<String, HandleValue>,
}

impl HandleTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: IndexMap::new(),
        }
    }

    pub fn value(mut self, member: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.members
            .insert(member.into(), HandleValue::Value(value.into()));
        self
    }

    pub fn method(mut self, member: impl Into<String>, method: Method) -> Self {
        self.members.insert(member.into(), HandleValue::Method(method));
        self
    }

    pub fn insert(&mut self, member: impl Into<String>, value: HandleValue) {
        self.members.insert(member.into(), value);
    }
}

impl ComponentHandle for HandleTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, member: &str) -> Option<HandleValue> {
        self.members.get(member).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sync_methods_resolve_immediately() {
        let table = HandleTable::new("counter").method(
            "double",
            Method::sync(|args| {
                let n = args.first().and_then(PropValue::as_f64).unwrap_or(0.0);
                Ok(PropValue::from(n * 2.0))
            }),
        );
        let Some(HandleValue::Method(double)) = table.get("double") else {
            panic!("double should be a method");
        };
        let out = double.call(vec![PropValue::from(21)]).await.unwrap();
        assert_eq!(out, PropValue::from(42));
    }

    #[test]
    fn missing_member_reads_as_none() {
        let table = HandleTable::new("div").value("tagName", "div");
        assert!(table.get("focus").is_none());
        assert_eq!(
            table.get("tagName").and_then(|v| v.as_value().cloned()),
            Some(PropValue::from("div"))
        );
    }
}
