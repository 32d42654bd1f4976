//! The descriptor sum type produced by lowering.
//!
//! Descriptors form an immutable tree built fresh per `synthesize` call.
//! Value equality is structural: two independent runs over equal inputs
//! produce `==` trees, which the constant pool relies on for interning.

use crate::directory::RuntimeClassHandle;
use vela_ir::{StaticType, Variance};

/// A lowered runtime-type descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Descriptor {
    /// An ordinary classifier application.
    Type(TypeDescriptor),
    /// Placeholder for a reified type parameter at its use-site; a later
    /// specialization pass replaces it with the concrete descriptor per
    /// call site. Only ever produced at the outermost call, never nested.
    DeferredIntrinsic { original: StaticType },
    /// Substitutes for a bound chain that would otherwise recurse
    /// infinitely.
    RecursiveBounds,
    /// Substitutes for a type with no classifier (error or intersection
    /// types). Silent degrade, not a failure.
    NonDenotable,
}

/// `classifier<arguments>?` - the ordinary descriptor shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub classifier: ClassifierDescriptor,
    /// Always the same length as the source type's argument list.
    pub arguments: Vec<ArgumentDescriptor>,
    pub nullable: bool,
}

/// The classifier half of a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassifierDescriptor {
    /// A class with a resolvable runtime type handle.
    Concrete { handle: RuntimeClassHandle },
    /// A class the runtime cannot represent (foreign interop or opaque
    /// pointer origin). The message is one of the fixed strings in
    /// [`crate::directory::unsupported_message`].
    Unsupported { message: &'static str },
    /// A type parameter, described by identity and bounds.
    TypeParameter(TypeParameterDescriptor),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameterDescriptor {
    pub name: String,
    /// Globally-unique label of the owning declaration.
    pub owner_label: String,
    pub bounds: Vec<Descriptor>,
    pub variance: Variance,
    pub is_reified: bool,
}

/// One type-argument position of a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentDescriptor {
    /// Star projection: variance code `-1`, no type.
    Star,
    Projection { variance_code: i32, ty: Descriptor },
}

impl Descriptor {
    pub fn as_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Descriptor::Type(ty) => Some(ty),
            _ => None,
        }
    }
}

impl ArgumentDescriptor {
    /// The variance code written into the constant pool for this
    /// position.
    pub fn variance_code(&self) -> i32 {
        match self {
            ArgumentDescriptor::Star => Variance::STAR_CODE,
            ArgumentDescriptor::Projection { variance_code, .. } => *variance_code,
        }
    }
}
