//! Serialization bridge: persist adapters by backing-resource name
//!
//! An adapter's only state is which resource backs it, and raw handles do
//! not survive a process boundary, but registered names do. Storing a
//! [`PoolAdapter`] writes the resource's name; loading looks that name up
//! in the global [registry](crate::registry) and fails, propagating the
//! registry's not-found error, if it is absent. No fallback resource is
//! ever substituted.
//!
//! A [`ResolvedAdapter`] is reconstructible purely from its type, so it
//! stores nothing and loads by default construction. [`DefaultInit`]
//! delegates to its base; a stateless base encodes nothing of its own.
//!
//! The wire format is a single string, framed however the chosen serde
//! format frames strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::adapter::PoolAdapter;
use crate::default_init::DefaultInit;
use crate::lock::LockPolicy;
use crate::registry;
use crate::resolved::{ResolvedAdapter, ResourceAccessor};

impl<T, L: LockPolicy> Serialize for PoolAdapter<T, L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.resource().name())
    }
}

impl<'de, T, L: LockPolicy> Deserialize<'de> for PoolAdapter<T, L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        let handle = registry::global()
            .lookup(&name)
            .map_err(D::Error::custom)?;
        Ok(PoolAdapter::new(handle))
    }
}

impl<T, A: ResourceAccessor, L: LockPolicy> Serialize for ResolvedAdapter<T, A, L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

impl<'de, T, A: ResourceAccessor, L: LockPolicy> Deserialize<'de> for ResolvedAdapter<T, A, L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <()>::deserialize(deserializer)?;
        Ok(ResolvedAdapter::default())
    }
}

impl<A: Serialize> Serialize for DefaultInit<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.base().serialize(serializer)
    }
}

impl<'de, A: Deserialize<'de>> Deserialize<'de> for DefaultInit<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        A::deserialize(deserializer).map(DefaultInit::new)
    }
}
