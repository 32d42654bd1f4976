//! Front-end type representation for the velac compiler.
//!
//! This crate owns the resolved, post-inference view of types that the
//! back-end lowers from:
//!
//! - `TypeStore` - append-only arenas for classes and type parameters
//! - `StaticType` - a classifier applied to type arguments, plus nullability
//! - `Variance` - declaration-site variance with its runtime wire encoding
//!
//! The representation is read-only for back-end passes. Cycles can occur,
//! but only through type-parameter bound chains (`T : Comparable<T>`);
//! concrete class references are acyclic by construction.

pub mod store;
pub mod types;

pub use store::{ClassId, ClassInfo, OwnerDecl, OwnerLabels, TypeParamId, TypeParamInfo, TypeStore};
pub use types::{Classifier, SimpleType, StaticType, TypeArgument, Variance};
