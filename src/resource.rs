//! Memory resource contract and non-owning resource handles
//!
//! A [`MemoryResource`] is the external collaborator every adapter forwards
//! to: a pooled or arena-style byte allocator with outstanding-size
//! accounting. This crate implements no pooling of its own; it only defines
//! the contract it consumes and a minimal system-backed reference
//! implementation.

use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::alloc::{GlobalAlloc, Layout, System};

use crate::error::{AllocError, AllocResult};

/// Minimum alignment every resource must guarantee for returned blocks
///
/// The adapter layer is byte-oriented and cannot communicate element
/// alignment to a resource, so resources promise at least this much (the
/// common `malloc` guarantee on 64-bit platforms). Element types with
/// stricter alignment cannot go through the adapter.
pub const MIN_RESOURCE_ALIGN: usize = 16;

/// External pooled memory resource
///
/// Implementations own their pooling strategy, growth policy, and accounting.
/// The adapter layer calls the internal allocate/deallocate paths directly so
/// that usage accounting happens even when a resource's optional profiling is
/// disabled.
///
/// # Contract
///
/// - Returned blocks are aligned to at least [`MIN_RESOURCE_ALIGN`].
/// - Implementations are not required to handle zero-byte requests; callers
///   (the adapters) guarantee `nbytes >= 1`.
/// - `current_size` reports outstanding bytes: the sum of all
///   `allocate_internal` byte counts not yet returned through
///   `deallocate_internal`.
/// - Allocation failures are reported as errors, never masked; the adapter
///   propagates them verbatim.
pub trait MemoryResource: Send + Sync {
    /// Registered name of this resource, used for serialization and lookup
    fn name(&self) -> &str;

    /// Allocates `nbytes` bytes from the resource's internal path
    ///
    /// # Safety
    /// Caller must not request zero bytes and must return the block through
    /// [`deallocate_internal`](Self::deallocate_internal) with the same byte
    /// count.
    unsafe fn allocate_internal(&self, nbytes: usize) -> AllocResult<NonNull<u8>>;

    /// Returns `nbytes` bytes at `ptr` to the resource's internal path
    ///
    /// # Safety
    /// `ptr` must have been produced by `allocate_internal` on this resource
    /// with exactly `nbytes`, and must not be used afterwards.
    unsafe fn deallocate_internal(&self, ptr: NonNull<u8>, nbytes: usize);

    /// Outstanding bytes currently allocated from this resource
    fn current_size(&self) -> usize;
}

/// Non-owning handle to a live [`MemoryResource`]
///
/// Handles are cheap `Copy` values with identity semantics: two handles are
/// equal iff they refer to the same resource instance. The referenced
/// resource's lifetime is managed externally (typically by the
/// [registry](crate::registry)); a handle must never be used after its
/// resource has been released. That precondition is documented, not
/// enforced. Handles to registry-owned resources are `'static` and always
/// satisfy it.
#[derive(Clone, Copy)]
pub struct ResourceHandle(&'static dyn MemoryResource);

impl ResourceHandle {
    /// Wraps a reference to a resource that lives for the rest of the process
    pub fn new(resource: &'static dyn MemoryResource) -> Self {
        Self(resource)
    }

    /// Borrows the underlying resource
    pub fn get(&self) -> &'static dyn MemoryResource {
        self.0
    }

    /// Registered name of the underlying resource
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Outstanding bytes of the underlying resource
    pub fn current_size(&self) -> usize {
        self.0.current_size()
    }

    /// Address used for identity comparison
    ///
    /// Cast through a thin pointer so comparison ignores the vtable; two
    /// fat pointers to the same object can otherwise disagree.
    fn addr(&self) -> *const () {
        self.0 as *const dyn MemoryResource as *const ()
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for ResourceHandle {}

impl core::fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("name", &self.0.name())
            .field("addr", &self.addr())
            .finish()
    }
}

/// Reference resource delegating to the system allocator
///
/// Not a pool: every request goes straight to the platform allocator, with
/// outstanding-byte accounting on top. Useful as a registry default, in
/// examples, and in tests; real deployments plug in their own pooled
/// resources.
#[derive(Debug)]
pub struct SystemResource {
    name: String,
    outstanding: AtomicUsize,
}

impl SystemResource {
    /// Creates a system-backed resource with the given registered name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), outstanding: AtomicUsize::new(0) }
    }

    fn layout_for(nbytes: usize) -> AllocResult<Layout> {
        debug_assert!(nbytes > 0);
        // Fails only for sizes above isize::MAX (after align rounding).
        Layout::from_size_align(nbytes, MIN_RESOURCE_ALIGN)
            .map_err(|err| AllocError::invalid_layout(err.to_string()))
    }
}

impl MemoryResource for SystemResource {
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn allocate_internal(&self, nbytes: usize) -> AllocResult<NonNull<u8>> {
        let layout = Self::layout_for(nbytes)?;
        // SAFETY: layout has non-zero size (nbytes >= 1 per trait contract).
        let raw = unsafe { System.alloc(layout) };
        let ptr = NonNull::new(raw)
            .ok_or_else(|| AllocError::out_of_memory(&self.name, nbytes))?;
        self.outstanding.fetch_add(nbytes, Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn deallocate_internal(&self, ptr: NonNull<u8>, nbytes: usize) {
        let Ok(layout) = Self::layout_for(nbytes) else {
            // The matching allocate would have failed; nothing to return.
            debug_assert!(false, "deallocating a byte count no allocation could have had");
            return;
        };
        self.outstanding.fetch_sub(nbytes, Ordering::Relaxed);
        // SAFETY: ptr came from allocate_internal with the same nbytes, so
        // the reconstructed layout matches the original allocation.
        unsafe { System.dealloc(ptr.as_ptr(), layout) };
    }

    fn current_size(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_resource_accounts_outstanding_bytes() {
        let res = SystemResource::new("sys-test");
        assert_eq!(res.current_size(), 0);

        unsafe {
            let ptr = res.allocate_internal(64).expect("allocation failed");
            assert_eq!(res.current_size(), 64);

            let ptr2 = res.allocate_internal(32).expect("allocation failed");
            assert_eq!(res.current_size(), 96);

            res.deallocate_internal(ptr, 64);
            res.deallocate_internal(ptr2, 32);
        }
        assert_eq!(res.current_size(), 0);
    }

    #[test]
    fn system_resource_blocks_are_aligned() {
        let res = SystemResource::new("sys-align");
        unsafe {
            let ptr = res.allocate_internal(1).expect("allocation failed");
            assert_eq!(ptr.as_ptr() as usize % MIN_RESOURCE_ALIGN, 0);
            res.deallocate_internal(ptr, 1);
        }
    }

    #[test]
    fn handle_identity_vs_names() {
        let a: &'static SystemResource = Box::leak(Box::new(SystemResource::new("same-name")));
        let b: &'static SystemResource = Box::leak(Box::new(SystemResource::new("same-name")));

        let ha = ResourceHandle::new(a);
        let hb = ResourceHandle::new(b);

        // Identity is by instance, not by name.
        assert_ne!(ha, hb);
        assert_eq!(ha, ResourceHandle::new(a));
        assert_eq!(ha.name(), hb.name());
    }
}
