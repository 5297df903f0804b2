//! Process-wide name-to-resource registry
//!
//! Maps registered names to live [`MemoryResource`] instances. The registry
//! owns resource lifetimes: anything registered stays alive until process
//! exit, which is what lets [`ResourceHandle`]s be plain `'static`
//! references. Lookup by name is the backbone of both the resolving adapter
//! and the serialization bridge.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::error::{AllocError, AllocResult};
use crate::resource::{MemoryResource, ResourceHandle};

/// Name-keyed registry of memory resources
pub struct ResourceRegistry {
    resources: RwLock<HashMap<String, ResourceHandle>>,
}

impl ResourceRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self { resources: RwLock::new(HashMap::new()) }
    }

    /// Registers a resource under its own name, leaking it to `'static`
    ///
    /// The resource lives until process exit; the returned handle (and any
    /// copy of it) stays valid for that whole time. Fails with
    /// [`AllocError::DuplicateResource`] if the name is taken, since replacing a
    /// live resource would silently re-route deallocations.
    pub fn register<R>(&self, resource: R) -> AllocResult<ResourceHandle>
    where
        R: MemoryResource + 'static,
    {
        self.register_static(Box::leak(Box::new(resource)))
    }

    /// Registers an already-`'static` resource under its own name
    pub fn register_static(
        &self,
        resource: &'static dyn MemoryResource,
    ) -> AllocResult<ResourceHandle> {
        let name = resource.name().to_owned();
        let handle = ResourceHandle::new(resource);

        let mut resources = self.resources.write();
        if resources.contains_key(&name) {
            return Err(AllocError::duplicate_resource(name));
        }

        #[cfg(feature = "logging")]
        tracing::debug!(resource = %name, "registered memory resource");

        resources.insert(name, handle);
        Ok(handle)
    }

    /// Looks up a resource by registered name
    ///
    /// Fails with [`AllocError::ResourceNotFound`] for unknown names; the
    /// caller (including the serialization bridge) receives that error
    /// verbatim, never a substitute resource.
    pub fn lookup(&self, name: &str) -> AllocResult<ResourceHandle> {
        self.resources.read().get(name).copied().ok_or_else(|| {
            #[cfg(feature = "logging")]
            tracing::debug!(resource = %name, "lookup failed: resource not registered");
            AllocError::resource_not_found(name)
        })
    }

    /// Checks whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.resources.read().contains_key(name)
    }

    /// Names of all registered resources
    pub fn names(&self) -> Vec<String> {
        self.resources.read().keys().cloned().collect()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry, created on first use
pub fn global() -> &'static ResourceRegistry {
    static GLOBAL: OnceLock<ResourceRegistry> = OnceLock::new();
    GLOBAL.get_or_init(ResourceRegistry::new)
}
