use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashMap;
use tracing::debug;

use uv_vcs_types::VcsUrl;

use crate::{Backend, Bazaar, VcsError};

/// The process-wide registry of built-in backends.
pub static VCS: LazyLock<VcsRegistry> = LazyLock::new(VcsRegistry::builtin);

/// The set of known backends, keyed by name, and the URL schemes they claim.
#[derive(Debug, Default, Clone)]
pub struct VcsRegistry {
    backends: BTreeMap<&'static str, Arc<dyn Backend>>,
    schemes: FxHashMap<&'static str, &'static str>,
}

impl VcsRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in backend.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Bazaar::default()));
        registry
    }

    /// Register a backend, replacing (and returning) any backend with the same name.
    pub fn register(&mut self, backend: Arc<dyn Backend>) -> Option<Arc<dyn Backend>> {
        let name = backend.name();
        let previous = self.unregister(name);
        for &scheme in backend.schemes() {
            if let Some(owner) = self.schemes.insert(scheme, name) {
                debug!("Scheme `{scheme}` moved from `{owner}` to `{name}`");
            }
        }
        debug!("Registered VCS backend `{name}`");
        self.backends.insert(name, backend);
        previous
    }

    /// Remove the backend named `name`, along with the schemes it claimed.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Backend>> {
        let backend = self.backends.remove(name)?;
        self.schemes.retain(|_, owner| *owner != name);
        Some(backend)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Backend>> {
        self.backends.get(name)
    }

    /// The backend that claims `scheme`, e.g., `bzr+ssh`.
    pub fn get_by_scheme(&self, scheme: &str) -> Option<&Arc<dyn Backend>> {
        self.schemes
            .get(scheme)
            .and_then(|name| self.backends.get(name))
    }

    /// Parse a requirement URL, dispatching on its scheme.
    pub fn parse(&self, raw: &str) -> Result<VcsUrl, VcsError> {
        let url = VcsUrl::parse_with(raw, |scheme| self.schemes.get(scheme).copied())?;
        Ok(url)
    }

    /// The backend responsible for a parsed URL.
    pub fn backend_for_url(&self, url: &VcsUrl) -> Result<&Arc<dyn Backend>, VcsError> {
        self.get(url.backend())
            .ok_or_else(|| VcsError::UnknownBackend(url.backend().to_string()))
    }

    /// The backend that manages the working copy at `location`, if any.
    pub fn backend_for_location(&self, location: &Path) -> Option<&Arc<dyn Backend>> {
        let backend = self
            .backends
            .values()
            .find(|backend| backend.controls_location(location))?;
        debug!("Determined that {} controls the location", backend.name());
        Some(backend)
    }

    /// The names of all registered backends, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.keys().copied()
    }

    /// The metadata directories of all registered backends.
    pub fn dirnames(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.values().map(|backend| backend.dirname())
    }

    /// Every scheme claimed by a registered backend, in sorted order.
    pub fn all_schemes(&self) -> Vec<&'static str> {
        let mut schemes = self.schemes.keys().copied().collect::<Vec<_>>();
        schemes.sort_unstable();
        schemes
    }
}
