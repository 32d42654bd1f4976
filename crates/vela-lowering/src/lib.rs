//! Reflection-descriptor lowering for the velac back-end.
//!
//! Vela erases generics during ahead-of-time compilation. Wherever a
//! program needs to answer reflection queries about a generic type at
//! run time (`typeOf`, class literals, reified call sites), this pass
//! synthesizes an immutable constant object graph - a *descriptor* -
//! describing the type: classifier identity, type arguments, variance,
//! nullability, and declared bounds.
//!
//! The pass is a pure structural recursion over the front end's
//! `StaticType` graph:
//!
//! - `DescriptorBuilder` - the synthesizer, invoked once per use-site
//! - `Descriptor` - the closed output sum type
//! - `ClassifierDirectory` - maps classes to runtime handles, or reports
//!   them unrepresentable
//! - `materialize` - lowers a descriptor tree into constant-pool nodes
//!
//! Bound chains may be cyclic (`T : Comparable<T>`); the builder carries
//! a per-call visiting set and resolves such chains to a sentinel rather
//! than recursing forever. Independent use-sites lower in parallel; the
//! builder holds no shared mutable state.

pub mod builder;
pub mod constants;
pub mod descriptor;
pub mod directory;

pub use builder::{DescriptorBuilder, codes};
pub use constants::{ConstBuilder, ConstId, ConstNode, ConstPool, ConstShape, materialize, materialize_classifier};
pub use descriptor::{
    ArgumentDescriptor, ClassifierDescriptor, Descriptor, TypeDescriptor, TypeParameterDescriptor,
};
pub use directory::{
    CachingDirectory, ClassifierDirectory, ClassifierResolution, RuntimeClassHandle,
    UnsupportedKind, unsupported_message,
};
