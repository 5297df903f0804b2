//! Lock policies guarding resource access
//!
//! Adapters serialize their calls into a shared [`MemoryResource`] through a
//! compile-time lock policy. The interesting safety boundary is the shared
//! resource, not any one adapter value, so the mutex variant is deliberately
//! coarse: every adapter sharing a [`LockTag`] takes the same process-wide
//! mutex, regardless of element type. Two different tags share no lock and
//! may run concurrently even against the same resource, which makes tag
//! selection a correctness decision, not a cosmetic one.
//!
//! [`MemoryResource`]: crate::resource::MemoryResource

use core::any::TypeId;
use core::marker::PhantomData;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard, RwLock};

/// Mutual-exclusion strategy around resource allocate/deallocate calls
///
/// The critical section is the lifetime of the returned guard and brackets
/// exactly the resource call (plus the debug outstanding-size assertion on
/// deallocation) and nothing else. Acquisition never fails.
pub trait LockPolicy {
    /// RAII guard; the critical section ends when it drops
    type Guard;

    /// Enters the critical section
    fn acquire() -> Self::Guard;
}

/// No-op policy for single-threaded or externally synchronized use
///
/// Concurrent allocate/deallocate calls under this policy are racy by
/// design; the caller guarantees exclusion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLock;

impl LockPolicy for NoLock {
    type Guard = ();

    #[inline]
    fn acquire() {}
}

/// Identity of a process-wide mutex
///
/// Each distinct tag type names one mutex, created lazily on first use and
/// live until process exit. Declare tags as empty structs:
///
/// ```
/// use pooled_alloc::lock::LockTag;
///
/// struct HostPoolTag;
/// impl LockTag for HostPoolTag {}
/// ```
pub trait LockTag: 'static {}

/// Mutex-backed policy serializing all adapters that share a tag
///
/// The tag's mutex is process-wide state: one instance per tag identity,
/// lazily initialized, never destroyed before process exit.
pub struct TagLock<Tag: LockTag>(PhantomData<fn() -> Tag>);

impl<Tag: LockTag> LockPolicy for TagLock<Tag> {
    type Guard = MutexGuard<'static, ()>;

    #[inline]
    fn acquire() -> Self::Guard {
        tag_mutex(TypeId::of::<Tag>()).lock()
    }
}

/// Tag-keyed mutex table; entries are leaked so guards can borrow `'static`
static TAG_MUTEXES: Lazy<RwLock<HashMap<TypeId, &'static Mutex<()>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn tag_mutex(tag: TypeId) -> &'static Mutex<()> {
    if let Some(mutex) = TAG_MUTEXES.read().get(&tag) {
        return mutex;
    }
    let mut table = TAG_MUTEXES.write();
    *table.entry(tag).or_insert_with(|| Box::leak(Box::new(Mutex::new(()))))
}
