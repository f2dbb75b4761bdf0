// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for widget construction, namespace lookups and capability queries.

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// The widget has no valid mount point in the page document.
    #[error("missing DOM mount point: {0}")]
    MissingDom(String),

    #[error("missing namespace: {0}")]
    MissingNamespace(String),

    #[error("namespace '{key}' does not hold a {expected}")]
    NamespaceType { key: String, expected: &'static str },

    #[error("missing capability: {0}")]
    MissingCapability(&'static str),

    /// An explicit override named a namespace or capability nobody contributed.
    #[error("nothing to override: {0}")]
    NothingToOverride(String),

    #[error("missing node: {0}")]
    MissingNode(usize),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChartError {
    pub fn missing_dom(target: impl Into<String>) -> Self {
        Self::MissingDom(target.into())
    }

    pub fn missing_namespace(key: impl Into<String>) -> Self {
        Self::MissingNamespace(key.into())
    }

    pub fn namespace_type<T>(key: impl Into<String>) -> Self {
        Self::NamespaceType { key: key.into(), expected: std::any::type_name::<T>() }
    }

    pub fn missing_capability<C: ?Sized>() -> Self {
        Self::MissingCapability(std::any::type_name::<C>())
    }

    pub fn nothing_to_override(what: impl Into<String>) -> Self {
        Self::NothingToOverride(what.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
