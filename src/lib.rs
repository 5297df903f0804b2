//! Typed allocator adapters over external pooled memory resources
//!
//! This crate lets generic, allocator-parameterized containers obtain their
//! memory from an external pool/arena-style resource without modifying the
//! containers. It implements no pooling of its own; it bridges:
//!
//! - [`PoolAdapter`]: the core adapter forwarding allocation/deallocation to
//!   a [`MemoryResource`] under an injectable [lock policy](lock)
//! - [`ResolvedAdapter`]: a default-constructible variant that resolves its
//!   resource through an injected [`ResourceAccessor`]
//! - [`DefaultInit`]: a decorator suppressing value-initialization for
//!   elements a container will immediately overwrite
//! - a `serde` bridge (feature `serde`) persisting adapters by the name of
//!   their backing resource
//!
//! # Features
//!
//! - `logging` (default): registry activity via `tracing`
//! - `serde`: the serialization bridge
//!
//! # Example
//!
//! ```
//! use pooled_alloc::adapter::PoolAdapter;
//! use pooled_alloc::registry;
//! use pooled_alloc::resource::SystemResource;
//!
//! fn main() -> pooled_alloc::AllocResult<()> {
//!     registry::global().register(SystemResource::new("host-pool"))?;
//!
//!     let adapter: PoolAdapter<u64> = PoolAdapter::from_registry("host-pool")?;
//!     unsafe {
//!         let ptr = adapter.allocate(128)?;
//!         adapter.deallocate(ptr, 128);
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub mod adapter;
pub mod default_init;
pub mod error;
pub mod lock;
pub mod registry;
pub mod resolved;
pub mod resource;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support;

// Re-export common types for convenience
pub use adapter::{PoolAdapter, Rebind};
pub use default_init::DefaultInit;
pub use error::{AllocError, AllocResult};
pub use lock::{LockPolicy, LockTag, NoLock, TagLock};
pub use resolved::{ResolvedAdapter, ResourceAccessor};
pub use resource::{MemoryResource, ResourceHandle, SystemResource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
