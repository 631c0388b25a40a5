//! Pod registry
//!
//! The registry maps pod names to loaded pods. Pods are loaded lazily on
//! first reference through the [`PodLoader`] and memoized for the life of
//! the registry, including pods the loader reports as missing and loads
//! that failed.
//!
//! Concurrent first references to the same pod serialize on a per-pod
//! cell, so the loader runs at most once per name. Lookups of different
//! pods never block each other. Once published, pods and their types are
//! read-only and can be queried from any thread.

use crate::error::{ReflectError, ReflectResult};
use crate::natives::{NativeConstructorRegistry, NativeTable};
use crate::options::RegistryOptions;
use crate::pod::Pod;
use crate::ty::Type;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use podium_sdk::{split_qname, LoadError, PodLoader};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

type PodCell = Arc<OnceCell<ReflectResult<Option<Arc<Pod>>>>>;

/// State shared by every handle to one registry
pub(crate) struct Shared {
    pub(crate) options: RegistryOptions,
    pub(crate) natives: Box<dyn NativeConstructorRegistry>,
    loader: Box<dyn PodLoader>,
    pods: DashMap<String, PodCell>,
}

/// Registry of pods and the types they declare
///
/// Cloning is cheap; every clone refers to the same pods. Types keep a weak
/// reference back to the registry to resolve base and slot types, so keep
/// at least one handle alive while querying them.
#[derive(Clone)]
pub struct PodRegistry {
    shared: Arc<Shared>,
}

impl PodRegistry {
    /// Create a registry with default options and no native producers
    pub fn new(loader: impl PodLoader + 'static) -> Self {
        Self::builder(loader).build()
    }

    /// Create a registry builder
    pub fn builder(loader: impl PodLoader + 'static) -> PodRegistryBuilder {
        PodRegistryBuilder {
            loader: Box::new(loader),
            natives: Box::new(NativeTable::new()),
            options: RegistryOptions::default(),
        }
    }

    pub(crate) fn upgrade(shared: &Weak<Shared>, context: &str) -> ReflectResult<Self> {
        shared
            .upgrade()
            .map(|shared| Self { shared })
            .ok_or_else(|| ReflectError::RegistryClosed(context.to_string()))
    }

    /// Registry configuration
    pub fn options(&self) -> &RegistryOptions {
        &self.shared.options
    }

    /// Find a pod, loading it on first reference
    ///
    /// A missing pod is `Ok(None)` when `checked` is false and
    /// [`ReflectError::UnknownPod`] otherwise.
    pub fn find_pod(&self, name: &str, checked: bool) -> ReflectResult<Option<Arc<Pod>>> {
        let cell = self.pod_cell(name);
        let pod = cell.get_or_init(|| self.load_pod(name)).clone()?;

        match pod {
            None if checked => Err(ReflectError::UnknownPod(name.to_string())),
            pod => Ok(pod),
        }
    }

    /// Find a type by qualified name (`pod::Type`)
    ///
    /// A missing pod or type is `Ok(None)` when `checked` is false and
    /// [`ReflectError::UnknownType`] otherwise.
    pub fn find_type(&self, qname: &str, checked: bool) -> ReflectResult<Option<Type>> {
        let (pod_name, type_name) =
            split_qname(qname).ok_or_else(|| ReflectError::InvalidQname(qname.to_string()))?;

        let ty = match self.find_pod(pod_name, false)? {
            Some(pod) => pod.find_type(type_name, false)?,
            None => None,
        };

        match ty {
            None if checked => Err(ReflectError::UnknownType(qname.to_string())),
            ty => Ok(ty),
        }
    }

    /// Find a type that must exist
    pub fn require_type(&self, qname: &str) -> ReflectResult<Type> {
        self.find_type(qname, true)?
            .ok_or_else(|| ReflectError::UnknownType(qname.to_string()))
    }

    /// The universal root type
    pub fn root_type(&self) -> ReflectResult<Type> {
        self.require_type(&self.shared.options.root_type)
    }

    /// Check if a pod has been loaded successfully
    pub fn is_loaded(&self, name: &str) -> bool {
        self.shared
            .pods
            .get(name)
            .map(|cell| matches!(cell.get(), Some(Ok(Some(_)))))
            .unwrap_or(false)
    }

    /// All pods loaded so far
    pub fn loaded_pods(&self) -> Vec<Arc<Pod>> {
        let mut pods: Vec<Arc<Pod>> = self
            .shared
            .pods
            .iter()
            .filter_map(|entry| match entry.value().get() {
                Some(Ok(Some(pod))) => Some(pod.clone()),
                _ => None,
            })
            .collect();
        pods.sort_by(|a, b| a.name().cmp(b.name()));
        pods
    }

    fn pod_cell(&self, name: &str) -> PodCell {
        if let Some(cell) = self.shared.pods.get(name) {
            return Arc::clone(cell.value());
        }
        Arc::clone(self.shared.pods.entry(name.to_string()).or_default().value())
    }

    fn load_pod(&self, name: &str) -> ReflectResult<Option<Arc<Pod>>> {
        let decl = match self.shared.loader.load(name) {
            Ok(Some(decl)) => decl,
            Ok(None) => {
                debug!(pod = name, "pod not found");
                return Ok(None);
            }
            Err(err) => {
                warn!(pod = name, error = %err, "pod load failed");
                return Err(err.into());
            }
        };

        if decl.name != name {
            return Err(LoadError::Loader(format!(
                "loader returned pod {} for {}",
                decl.name, name
            ))
            .into());
        }
        decl.validate()?;

        let pod = Pod::build(decl, &self.shared)?;
        debug!(pod = name, types = pod.len(), "pod loaded");
        Ok(Some(Arc::new(pod)))
    }
}

impl fmt::Debug for PodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PodRegistry")
            .field("options", &self.shared.options)
            .field("pods", &self.shared.pods.len())
            .finish()
    }
}

/// Builder for PodRegistry
pub struct PodRegistryBuilder {
    loader: Box<dyn PodLoader>,
    natives: Box<dyn NativeConstructorRegistry>,
    options: RegistryOptions,
}

impl PodRegistryBuilder {
    /// Set the producer source used by `make()`
    pub fn natives(mut self, natives: impl NativeConstructorRegistry + 'static) -> Self {
        self.natives = Box::new(natives);
        self
    }

    /// Set registry options
    pub fn options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the registry
    pub fn build(self) -> PodRegistry {
        PodRegistry {
            shared: Arc::new(Shared {
                options: self.options,
                natives: self.natives,
                loader: self.loader,
                pods: DashMap::new(),
            }),
        }
    }
}
