//! Error types for adapter and registry operations

/// Result type for allocation and registry operations
pub type AllocResult<T> = Result<T, AllocError>;

/// Errors surfaced by memory resources, the registry, and the adapters
///
/// Adapters never catch, wrap, retry, or translate collaborator failures;
/// whatever a resource or the registry signals is returned to the caller
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The backing resource could not satisfy an allocation
    #[error("out of memory: requested {requested} bytes from resource '{resource}'")]
    OutOfMemory {
        /// Name of the resource that failed
        resource: String,
        /// Requested byte count
        requested: usize,
    },

    /// Byte count computation overflowed
    #[error("size overflow: {count} elements of {element_size} bytes")]
    SizeOverflow {
        /// Requested element count
        count: usize,
        /// Size of one element
        element_size: usize,
    },

    /// No resource is registered under the given name
    #[error("resource '{name}' not found in registry")]
    ResourceNotFound {
        /// The name that was looked up
        name: String,
    },

    /// A resource with the given name is already registered
    #[error("resource '{name}' is already registered")]
    DuplicateResource {
        /// The conflicting name
        name: String,
    },

    /// Layout parameters a resource cannot represent
    #[error("invalid layout: {reason}")]
    InvalidLayout {
        /// Why the layout was rejected
        reason: String,
    },
}

impl AllocError {
    /// Creates an out-of-memory error for a named resource
    pub fn out_of_memory(resource: impl Into<String>, requested: usize) -> Self {
        Self::OutOfMemory { resource: resource.into(), requested }
    }

    /// Creates a size overflow error
    pub fn size_overflow(count: usize, element_size: usize) -> Self {
        Self::SizeOverflow { count, element_size }
    }

    /// Creates a resource-not-found error
    pub fn resource_not_found(name: impl Into<String>) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    /// Creates a duplicate-resource error
    pub fn duplicate_resource(name: impl Into<String>) -> Self {
        Self::DuplicateResource { name: name.into() }
    }

    /// Creates an invalid-layout error
    pub fn invalid_layout(reason: impl Into<String>) -> Self {
        Self::InvalidLayout { reason: reason.into() }
    }

    /// Checks whether this is an out-of-memory error
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }

    /// Checks whether this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_resource_name() {
        let err = AllocError::out_of_memory("pool-A", 128);
        assert!(err.to_string().contains("pool-A"));
        assert!(err.is_out_of_memory());
    }

    #[test]
    fn not_found_predicate() {
        let err = AllocError::resource_not_found("missing");
        assert!(err.is_not_found());
        assert!(!err.is_out_of_memory());
    }
}
