//! Shared test support: an instrumented memory resource
//!
//! `CountingResource` delegates to the system allocator and records every
//! byte count the adapter layer forwards, so tests can observe the exact
//! requests a resource receives.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::ptr::NonNull;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pooled_alloc::{AllocError, AllocResult, MemoryResource};

pub struct CountingResource {
    name: String,
    outstanding: AtomicUsize,
    requests: Mutex<Vec<usize>>,
}

impl CountingResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outstanding: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Byte counts of every allocate request, in order
    pub fn requested_sizes(&self) -> Vec<usize> {
        self.requests.lock().unwrap().clone()
    }
}

impl MemoryResource for CountingResource {
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn allocate_internal(&self, nbytes: usize) -> AllocResult<NonNull<u8>> {
        assert!(nbytes > 0, "adapter forwarded a zero-byte request");
        self.requests.lock().unwrap().push(nbytes);

        let layout = std::alloc::Layout::from_size_align(nbytes, 16).unwrap();
        // SAFETY: layout has non-zero size.
        let raw = unsafe { std::alloc::alloc(layout) };
        let ptr = NonNull::new(raw).ok_or_else(|| AllocError::out_of_memory(&self.name, nbytes))?;
        self.outstanding.fetch_add(nbytes, Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn deallocate_internal(&self, ptr: NonNull<u8>, nbytes: usize) {
        self.outstanding.fetch_sub(nbytes, Ordering::Relaxed);
        let layout = std::alloc::Layout::from_size_align(nbytes, 16).unwrap();
        // SAFETY: ptr came from allocate_internal with the same nbytes.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) };
    }

    fn current_size(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }
}

/// Leaks a counting resource and returns it for direct handle construction
pub fn leak_counting(name: &str) -> &'static CountingResource {
    Box::leak(Box::new(CountingResource::new(name)))
}
