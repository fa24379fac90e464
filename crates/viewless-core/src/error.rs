use crate::value::PropValue;

/// Errors from strict flat-option parsing.
///
/// In [`FlatMode::Lenient`](crate::flat::FlatMode::Lenient) the same
/// conditions are logged and the offending entry is dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    /// A `$`-prefixed key that is not `$key`, `$vshow` or `$ref`.
    #[error("unknown structural attribute `{key}`")]
    UnknownStructuralKey { key: String },

    /// An `on*` key bound to something other than a handler.
    #[error("event key `{key}` is not bound to a handler")]
    InvalidEventValue { key: String },

    /// A structural attribute bound to a value of the wrong shape.
    #[error("structural attribute `{key}` cannot hold {found}")]
    InvalidStructuralValue { key: String, found: &'static str },

    /// A plain property bound to slot content or a visibility flag.
    #[error("property `{key}` cannot hold {found}")]
    InvalidPropValue { key: String, found: &'static str },
}

/// Errors from imperative access to a mounted component's handle.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HandleError {
    #[error("handle has no member `{0}`")]
    MissingMember(String),

    #[error("member `{0}` is not callable")]
    NotCallable(String),

    /// The underlying method signalled failure.
    #[error("call rejected: {0}")]
    Rejected(PropValue),
}

/// Errors from the headless host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// A capitalised string target reached the host: no adaptor in scope
    /// resolved this abstract identifier.
    #[error("unresolved component `{0}`: no adaptor in scope maps it to a concrete component")]
    UnresolvedComponent(String),
}

/// Errors from installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log filter `{directive}`: {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("unknown log level `{0}` (expected debug, info, warn, error or none)")]
    UnknownLevel(String),

    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}
