//! Default-constructible adapter resolved through an injected accessor
//!
//! Containers that require `Default` allocators cannot take a resource
//! handle at construction time. [`ResolvedAdapter`] closes that gap: the
//! backing resource is named at the type level through a
//! [`ResourceAccessor`], and `Default::default()` resolves it, typically via a
//! [registry](crate::registry) lookup by fixed name.

use core::marker::PhantomData;
use core::ops::Deref;
use core::ptr::NonNull;

use crate::adapter::{PoolAdapter, Rebind};
use crate::error::AllocResult;
use crate::lock::{LockPolicy, NoLock};
use crate::resource::ResourceHandle;

/// Zero-argument resolver for a backing resource
///
/// Invoked fresh on every default construction of a [`ResolvedAdapter`]; no
/// caching is assumed (the accessor itself may cache internally). It must
/// return a handle to a live resource: if the resource is missing this is
/// a configuration error and the accessor should panic rather than hand out
/// a substitute.
pub trait ResourceAccessor: 'static {
    /// Resolves the backing resource
    fn resource() -> ResourceHandle;
}

/// Declares an accessor type that resolves a fixed name in the global registry
///
/// ```
/// use pooled_alloc::registry;
/// use pooled_alloc::resource::SystemResource;
/// use pooled_alloc::resource_accessor;
///
/// registry::global().register(SystemResource::new("doc-pool")).unwrap();
/// resource_accessor!(pub DocPool => "doc-pool");
/// ```
#[macro_export]
macro_rules! resource_accessor {
    ($vis:vis $name:ident => $resource:expr) => {
        $vis struct $name;

        impl $crate::resolved::ResourceAccessor for $name {
            fn resource() -> $crate::resource::ResourceHandle {
                $crate::registry::global()
                    .lookup($resource)
                    .expect("accessor resource is not registered")
            }
        }
    };
}

/// Default-constructible [`PoolAdapter`] bound through accessor `A`
///
/// Behaves exactly like the core adapter it wraps (it `Deref`s to it);
/// only construction differs. Converting to another element type copies the
/// resolved handle and does not re-invoke the accessor.
pub struct ResolvedAdapter<T, A: ResourceAccessor, L: LockPolicy = NoLock> {
    inner: PoolAdapter<T, L>,
    _accessor: PhantomData<fn() -> A>,
}

impl<T, A: ResourceAccessor, L: LockPolicy> ResolvedAdapter<T, A, L> {
    fn from_inner(inner: PoolAdapter<T, L>) -> Self {
        Self { inner, _accessor: PhantomData }
    }

    /// The wrapped core adapter
    pub fn as_adapter(&self) -> &PoolAdapter<T, L> {
        &self.inner
    }

    /// Allocates storage for `count` elements of `T`
    ///
    /// # Safety
    /// Same contract as [`PoolAdapter::allocate`].
    pub unsafe fn allocate(&self, count: usize) -> AllocResult<NonNull<T>> {
        // SAFETY: forwarded verbatim; same caller contract.
        unsafe { self.inner.allocate(count) }
    }

    /// Returns storage previously obtained from [`allocate`](Self::allocate)
    ///
    /// # Safety
    /// Same contract as [`PoolAdapter::deallocate`].
    pub unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        // SAFETY: forwarded verbatim; same caller contract.
        unsafe { self.inner.deallocate(ptr, count) }
    }
}

impl<T, A: ResourceAccessor, L: LockPolicy> Default for ResolvedAdapter<T, A, L> {
    /// Resolves the backing resource by invoking the accessor
    fn default() -> Self {
        Self::from_inner(PoolAdapter::new(A::resource()))
    }
}

impl<T, A: ResourceAccessor, L: LockPolicy> Deref for ResolvedAdapter<T, A, L> {
    type Target = PoolAdapter<T, L>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Rebinding keeps the resolved handle; the accessor is not re-invoked
impl<T, U, A: ResourceAccessor, L: LockPolicy> Rebind<U> for ResolvedAdapter<T, A, L> {
    type Rebound = ResolvedAdapter<U, A, L>;

    fn rebind(&self) -> Self::Rebound {
        ResolvedAdapter::from_inner(self.inner.rebind())
    }
}

impl<T, A: ResourceAccessor, L: LockPolicy> Clone for ResolvedAdapter<T, A, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: ResourceAccessor, L: LockPolicy> Copy for ResolvedAdapter<T, A, L> {}

impl<T, U, A, B, L> PartialEq<ResolvedAdapter<U, B, L>> for ResolvedAdapter<T, A, L>
where
    A: ResourceAccessor,
    B: ResourceAccessor,
    L: LockPolicy,
{
    fn eq(&self, other: &ResolvedAdapter<U, B, L>) -> bool {
        self.inner == other.inner
    }
}

impl<T, A: ResourceAccessor, L: LockPolicy> Eq for ResolvedAdapter<T, A, L> {}

impl<T, A: ResourceAccessor, L: LockPolicy> core::fmt::Debug for ResolvedAdapter<T, A, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolvedAdapter")
            .field("resource", &self.inner.resource())
            .finish()
    }
}
