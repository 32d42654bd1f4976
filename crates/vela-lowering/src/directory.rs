//! Classifier resolution: class id to runtime handle, or a report that
//! the class cannot be represented at runtime.
//!
//! Resolution never fails. Unrepresentable classes (foreign interop
//! types, subclasses of the opaque-pointer base) are a normal outcome,
//! surfaced to the user only as an `Unsupported` descriptor with a fixed
//! per-category message.

use dashmap::DashMap;
use vela_ir::ClassId;

/// Handle into the compiled program's runtime type-info table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuntimeClassHandle(pub u32);

/// Why a class has no runtime representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    /// Declared in a foreign interop module.
    ForeignInterop,
    /// Inherits from the designated opaque-pointer base class.
    OpaquePointer,
}

/// Outcome of resolving a class against the directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClassifierResolution {
    Concrete { handle: RuntimeClassHandle },
    Unrepresentable(UnsupportedKind),
}

/// Maps concrete classes to their runtime representation.
///
/// Implementations must be infallible and side-effect free: the same
/// class may be resolved many times, concurrently, and every resolution
/// must return the same value.
pub trait ClassifierDirectory: Sync {
    fn resolve(&self, class: ClassId) -> ClassifierResolution;
}

/// Fixed message written into `Unsupported` descriptors, keyed by
/// failure category and whether the class was reached as an array
/// element. These strings are stable: the runtime reflection library
/// surfaces them verbatim from `TypeOfError`.
pub const fn unsupported_message(kind: UnsupportedKind, is_array: bool) -> &'static str {
    match (kind, is_array) {
        (UnsupportedKind::ForeignInterop, false) => {
            "runtime classifier for foreign interop classes is not supported yet"
        }
        (UnsupportedKind::ForeignInterop, true) => {
            "runtime classifier for arrays of foreign interop classes is not supported yet"
        }
        (UnsupportedKind::OpaquePointer, false) => {
            "runtime classifier for opaque pointer classes is not supported yet"
        }
        (UnsupportedKind::OpaquePointer, true) => {
            "runtime classifier for arrays of opaque pointer classes is not supported yet"
        }
    }
}

/// Memoizing wrapper around a directory.
///
/// Purely an optimization: resolution is idempotent, so two threads
/// racing on the same class may both compute the value and whichever
/// insert lands last wins with an identical result.
pub struct CachingDirectory<D> {
    inner: D,
    cache: DashMap<ClassId, ClassifierResolution>,
}

impl<D: ClassifierDirectory> CachingDirectory<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl<D: ClassifierDirectory> ClassifierDirectory for CachingDirectory<D> {
    fn resolve(&self, class: ClassId) -> ClassifierResolution {
        if let Some(hit) = self.cache.get(&class) {
            return *hit;
        }
        let resolution = self.inner.resolve(class);
        self.cache.insert(class, resolution);
        resolution
    }
}
