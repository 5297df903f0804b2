//! Decorator suppressing value-initialization on default construction
//!
//! Containers that grow a buffer before filling it pay for value-initializing
//! elements they are about to overwrite. [`DefaultInit`] wraps any base
//! allocator and changes exactly one thing: default construction of an
//! element leaves the memory untouched. Explicit-argument construction is
//! forwarded verbatim, so requested initial values are always honored.

use core::ops::Deref;
use core::ptr::NonNull;

use crate::adapter::Rebind;

/// Wrapper over a base allocator `A` that skips value-initialization
///
/// Carries no state beyond the base allocator's own; every operation other
/// than element construction is the base's, reached through `Deref`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultInit<A> {
    base: A,
}

impl<A> DefaultInit<A> {
    /// Decorates a base allocator
    pub fn new(base: A) -> Self {
        Self { base }
    }

    /// The decorated base allocator
    pub fn base(&self) -> &A {
        &self.base
    }

    /// Unwraps the decoration
    pub fn into_base(self) -> A {
        self.base
    }

    /// Default construction: leaves the element's bytes untouched
    ///
    /// The element ends up default-initialized in the trivial sense: its
    /// contents are whatever the allocation already held. This is the whole
    /// point of the decorator: no zeroing, no `T::default()` write.
    ///
    /// Only trivially constructible element types belong here; for a type
    /// with a destructor, skipping initialization would hand the eventual
    /// drop an indeterminate value, so debug builds reject it. Such types
    /// should go through the base allocator's value-initializing
    /// construction instead.
    ///
    /// # Safety
    /// `ptr` must be valid for writes of `T`. The caller must either
    /// overwrite the element before reading it or only use it through
    /// `MaybeUninit`-style access; reading indeterminate bytes as a typed
    /// value is undefined behavior for most `T`.
    pub unsafe fn construct_default<T>(&self, ptr: NonNull<T>) {
        debug_assert!(
            !core::mem::needs_drop::<T>(),
            "non-trivial element types must be value-initialized by the base allocator"
        );
        let _ = ptr;
    }

    /// Explicit construction: forwarded to ordinary direct initialization
    ///
    /// # Safety
    /// `ptr` must be valid for writes of `T` and properly aligned.
    pub unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        // SAFETY: per caller contract.
        unsafe { ptr.as_ptr().write(value) };
    }
}

impl<A> Deref for DefaultInit<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.base
    }
}

impl<A> From<A> for DefaultInit<A> {
    fn from(base: A) -> Self {
        Self::new(base)
    }
}

/// Rebinding rebinds the base and re-applies the decoration
impl<U, A: Rebind<U>> Rebind<U> for DefaultInit<A> {
    type Rebound = DefaultInit<A::Rebound>;

    fn rebind(&self) -> Self::Rebound {
        DefaultInit::new(self.base.rebind())
    }
}
