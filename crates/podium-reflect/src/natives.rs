//! Native producers used by `make()`
//!
//! Each type may carry a default-value thunk and/or a constructor, both
//! supplied at pod load by a [`NativeConstructorRegistry`]. `make()` prefers
//! the default value and falls back to the constructor.

use crate::ty::Type;
use crate::value::Value;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Produces an instance; receives the type being made.
pub type Producer = Arc<dyn Fn(&Type) -> Value + Send + Sync>;

/// Producers attached to one type
#[derive(Clone, Default)]
pub struct Producers {
    /// Default-value thunk
    pub default_value: Option<Producer>,
    /// Constructor taking no user arguments
    pub constructor: Option<Producer>,
}

impl Producers {
    /// Check if neither producer is present
    pub fn is_empty(&self) -> bool {
        self.default_value.is_none() && self.constructor.is_none()
    }
}

impl fmt::Debug for Producers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producers")
            .field("default_value", &self.default_value.is_some())
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

/// Source of per-type producers, consulted once per type at pod load
pub trait NativeConstructorRegistry: Send + Sync {
    /// Default-value thunk for `qname`
    fn default_value(&self, qname: &str) -> Option<Producer>;

    /// Constructor for `qname`
    fn constructor(&self, qname: &str) -> Option<Producer>;

    /// Both producers for `qname`
    fn producers(&self, qname: &str) -> Producers {
        Producers {
            default_value: self.default_value(qname),
            constructor: self.constructor(qname),
        }
    }
}

/// In-memory producer table
#[derive(Clone, Default)]
pub struct NativeTable {
    default_values: FxHashMap<String, Producer>,
    constructors: FxHashMap<String, Producer>,
}

impl NativeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a default-value thunk
    pub fn with_default_value<F>(mut self, qname: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Type) -> Value + Send + Sync + 'static,
    {
        self.default_values.insert(qname.into(), Arc::new(f));
        self
    }

    /// Register a constructor
    pub fn with_constructor<F>(mut self, qname: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Type) -> Value + Send + Sync + 'static,
    {
        self.constructors.insert(qname.into(), Arc::new(f));
        self
    }

    /// Number of types with at least one producer
    pub fn len(&self) -> usize {
        self.default_values
            .keys()
            .chain(self.constructors.keys().filter(|k| !self.default_values.contains_key(*k)))
            .count()
    }

    /// Check if no producers are registered
    pub fn is_empty(&self) -> bool {
        self.default_values.is_empty() && self.constructors.is_empty()
    }
}

impl NativeConstructorRegistry for NativeTable {
    fn default_value(&self, qname: &str) -> Option<Producer> {
        self.default_values.get(qname).cloned()
    }

    fn constructor(&self, qname: &str) -> Option<Producer> {
        self.constructors.get(qname).cloned()
    }
}

impl fmt::Debug for NativeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeTable")
            .field("default_values", &self.default_values.keys().collect::<Vec<_>>())
            .field("constructors", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
