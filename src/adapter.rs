//! Core typed adapter over an external memory resource
//!
//! [`PoolAdapter<T, L>`] presents the conventional typed-allocator contract
//! to generic containers while forwarding every byte to an external
//! [`MemoryResource`] under an injected [`LockPolicy`]. Adapters are cheap
//! handle-semantics values: copying or rebinding one copies the resource
//! handle, never the resource.
//!
//! [`MemoryResource`]: crate::resource::MemoryResource

use core::marker::PhantomData;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;

use crate::error::{AllocError, AllocResult};
use crate::lock::{LockPolicy, NoLock};
use crate::resource::{MIN_RESOURCE_ALIGN, ResourceHandle};

/// Rebinds an allocator from one element type to another
///
/// The rebound allocator addresses the same backing state, so allocations
/// from either are fungible against the same resource accounting. Decorators
/// implement this too, preserving their decoration across the rebind.
pub trait Rebind<U> {
    /// The allocator type produced by the rebind
    type Rebound;

    /// Produces the rebound allocator; cheap, handle-copying
    fn rebind(&self) -> Self::Rebound;
}

/// Typed allocator adapter backed by an external memory resource
///
/// `T` is the element type, `L` the lock policy guarding resource access.
/// Two adapters compare equal iff they are backed by the same resource
/// instance, regardless of element type.
///
/// The adapter never owns the resource. Dropping an adapter releases
/// nothing; the resource outlives every adapter referring to it (guaranteed
/// by registration, see [`crate::registry`]).
pub struct PoolAdapter<T, L: LockPolicy = NoLock> {
    handle: ResourceHandle,
    _marker: PhantomData<fn() -> (T, L)>,
}

impl<T, L: LockPolicy> PoolAdapter<T, L> {
    /// Creates an adapter over the given resource handle
    pub fn new(handle: ResourceHandle) -> Self {
        // Byte-oriented resources only guarantee MIN_RESOURCE_ALIGN; an
        // over-aligned element type cannot go through this adapter.
        debug_assert!(
            align_of::<T>() <= MIN_RESOURCE_ALIGN,
            "element alignment exceeds the resource alignment guarantee"
        );
        Self { handle, _marker: PhantomData }
    }

    /// Creates an adapter over the resource registered under `name`
    ///
    /// Convenience for `registry::global().lookup(name)` + [`Self::new`].
    pub fn from_registry(name: &str) -> AllocResult<Self> {
        Ok(Self::new(crate::registry::global().lookup(name)?))
    }

    /// The backing resource handle
    ///
    /// Read-only observation for equality comparison and serialization;
    /// never a transfer of ownership.
    pub fn resource(&self) -> ResourceHandle {
        self.handle
    }

    /// Byte count for `count` elements, with the zero-count coercion
    ///
    /// A zero byte count (`count == 0`, or a zero-sized element type)
    /// becomes one byte: resources are not required to handle
    /// zero-size requests, so the adapter never forwards one. Allocate and
    /// the matching deallocate apply the same coercion, keeping the
    /// resource's accounting consistent.
    fn byte_len(count: usize) -> AllocResult<usize> {
        count
            .checked_mul(size_of::<T>())
            .map(|nbytes| nbytes.max(1))
            .ok_or_else(|| AllocError::size_overflow(count, size_of::<T>()))
    }

    /// Allocates storage for `count` elements of `T`
    ///
    /// Forwards `count * size_of::<T>()` bytes (coerced to 1 for
    /// `count == 0`) to the resource's internal allocation path inside the
    /// lock policy's critical section. Resource failures propagate
    /// unchanged; the adapter never retries or translates them. The
    /// returned memory is uninitialized.
    ///
    /// # Safety
    /// The allocation must be returned through [`deallocate`](Self::deallocate)
    /// on an adapter backed by the same resource, with the same `count`.
    pub unsafe fn allocate(&self, count: usize) -> AllocResult<NonNull<T>> {
        let nbytes = Self::byte_len(count)?;
        let resource = self.handle.get();

        let _guard = L::acquire();
        // SAFETY: nbytes >= 1 (coercion above); the caller pairs this with
        // a matching deallocate per our own safety contract.
        let ptr = unsafe { resource.allocate_internal(nbytes)? };
        Ok(ptr.cast())
    }

    /// Returns storage previously obtained from [`allocate`](Self::allocate)
    ///
    /// # Safety
    /// `ptr` must come from an `allocate(count)` call with the same `count`
    /// on an adapter backed by the same resource, and must not be used
    /// afterwards.
    pub unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        let Ok(nbytes) = Self::byte_len(count) else {
            // A matching allocate would have failed before reaching the
            // resource, so there is nothing to return.
            debug_assert!(false, "deallocate byte count overflowed");
            return;
        };
        let resource = self.handle.get();

        let _guard = L::acquire();
        // The check must sit inside the critical section: outstanding size
        // is only stable while the tag mutex is held.
        debug_assert!(
            nbytes <= resource.current_size(),
            "deallocating more bytes than the resource has outstanding"
        );
        // SAFETY: caller guarantees ptr/nbytes match the original
        // allocation from this resource.
        unsafe { resource.deallocate_internal(ptr.cast(), nbytes) };
    }

    /// Writes `T::default()` into `ptr` (value-initializing construction)
    ///
    /// The baseline construction behavior; [`DefaultInit`] replaces exactly
    /// this step with a no-op.
    ///
    /// # Safety
    /// `ptr` must be valid for writes of `T` and properly aligned.
    ///
    /// [`DefaultInit`]: crate::default_init::DefaultInit
    pub unsafe fn construct_default(&self, ptr: NonNull<T>)
    where
        T: Default,
    {
        // SAFETY: per caller contract.
        unsafe { ptr.as_ptr().write(T::default()) };
    }

    /// Writes an explicit `value` into `ptr` (direct initialization)
    ///
    /// # Safety
    /// `ptr` must be valid for writes of `T` and properly aligned.
    pub unsafe fn construct(&self, ptr: NonNull<T>, value: T) {
        // SAFETY: per caller contract.
        unsafe { ptr.as_ptr().write(value) };
    }
}

impl<T, U, L: LockPolicy> Rebind<U> for PoolAdapter<T, L> {
    type Rebound = PoolAdapter<U, L>;

    fn rebind(&self) -> PoolAdapter<U, L> {
        PoolAdapter::new(self.handle)
    }
}

impl<T, L: LockPolicy> Clone for PoolAdapter<T, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, L: LockPolicy> Copy for PoolAdapter<T, L> {}

/// Equality across element types: same backing resource, equal adapters
impl<T, U, L: LockPolicy> PartialEq<PoolAdapter<U, L>> for PoolAdapter<T, L> {
    fn eq(&self, other: &PoolAdapter<U, L>) -> bool {
        self.handle == other.handle
    }
}

impl<T, L: LockPolicy> Eq for PoolAdapter<T, L> {}

impl<T, L: LockPolicy> core::fmt::Debug for PoolAdapter<T, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolAdapter")
            .field("resource", &self.handle)
            .field("element_size", &size_of::<T>())
            .finish()
    }
}
