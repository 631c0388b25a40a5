//! Pod loaders: the source of pod declarations

use crate::decl::PodDecl;
use crate::error::LoadResult;
use rustc_hash::FxHashMap;

/// Supplies raw declarations for a pod name.
///
/// The registry calls `load` at most once per pod name and caches the
/// outcome, including `Ok(None)` for pods that do not exist. Implementations
/// must not call back into the registry that owns them for the same pod.
pub trait PodLoader: Send + Sync {
    /// Produce the declarations for `name`, or `None` if no such pod exists
    fn load(&self, name: &str) -> LoadResult<Option<PodDecl>>;
}

impl<F> PodLoader for F
where
    F: Fn(&str) -> LoadResult<Option<PodDecl>> + Send + Sync,
{
    fn load(&self, name: &str) -> LoadResult<Option<PodDecl>> {
        self(name)
    }
}

/// In-memory loader backed by a fixed set of declarations
#[derive(Debug, Clone, Default)]
pub struct StaticPodLoader {
    pods: FxHashMap<String, PodDecl>,
}

impl StaticPodLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pod declaration, replacing any previous one with the same name
    pub fn with_pod(mut self, pod: PodDecl) -> Self {
        self.register(pod);
        self
    }

    /// Add a pod declaration in place
    pub fn register(&mut self, pod: PodDecl) {
        self.pods.insert(pod.name.clone(), pod);
    }

    /// Names of all declared pods
    pub fn pod_names(&self) -> Vec<&str> {
        self.pods.keys().map(|s| s.as_str()).collect()
    }

    /// Number of declared pods
    pub fn len(&self) -> usize {
        self.pods.len()
    }

    /// Check if no pods are declared
    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }
}

impl PodLoader for StaticPodLoader {
    fn load(&self, name: &str) -> LoadResult<Option<PodDecl>> {
        Ok(self.pods.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::TypeDecl;
    use crate::error::LoadError;

    #[test]
    fn test_static_loader() {
        let loader = StaticPodLoader::new()
            .with_pod(PodDecl::new("sys").with_type(TypeDecl::new("Obj")));

        assert_eq!(loader.len(), 1);
        let pod = loader.load("sys").unwrap().unwrap();
        assert_eq!(pod.types[0].name, "Obj");
        assert!(loader.load("missing").unwrap().is_none());
    }

    #[test]
    fn test_register_and_pod_names() {
        let mut loader = StaticPodLoader::new().with_pod(PodDecl::new("sys"));
        assert!(!loader.is_empty());
        loader.register(PodDecl::new("acme").with_type(TypeDecl::new("Point")));
        loader.register(PodDecl::new("acme"));

        let mut names = loader.pod_names();
        names.sort_unstable();
        assert_eq!(names, vec!["acme", "sys"]);
        // Re-registering replaces the previous declaration
        assert!(loader.load("acme").unwrap().unwrap().types.is_empty());
        assert!(StaticPodLoader::new().is_empty());
    }

    #[test]
    fn test_closure_loader() {
        let loader = |name: &str| -> LoadResult<Option<PodDecl>> {
            if name == "broken" {
                Err(LoadError::from("corrupt pod"))
            } else {
                Ok(None)
            }
        };

        assert!(loader.load("other").unwrap().is_none());
        assert_eq!(
            loader.load("broken"),
            Err(LoadError::Loader("corrupt pod".to_string()))
        );
    }
}
