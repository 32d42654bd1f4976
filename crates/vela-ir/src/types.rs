//! Static types as resolved by the front end.

use crate::store::{ClassId, TypeParamId};

/// Declaration-site variance of a type parameter or projection.
///
/// The numeric codes are a contract with the runtime reflection library
/// that reads lowered descriptors back; they must not be renumbered
/// without a matching change on the read side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    Invariant,
    In,
    Out,
}

impl Variance {
    /// Code used when a projection is a star (no variance, no type).
    pub const STAR_CODE: i32 = -1;

    pub const fn code(self) -> i32 {
        match self {
            Variance::Invariant => 0,
            Variance::In => 1,
            Variance::Out => 2,
        }
    }

    pub const fn from_code(code: i32) -> Option<Variance> {
        match code {
            0 => Some(Variance::Invariant),
            1 => Some(Variance::In),
            2 => Some(Variance::Out),
            _ => None,
        }
    }
}

/// The named entity a type refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classifier {
    Class(ClassId),
    Param(TypeParamId),
}

/// A type argument position: either explicitly unknown (star) or a
/// projected type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    Star,
    Projection { variance: Variance, ty: StaticType },
}

impl TypeArgument {
    pub fn invariant(ty: StaticType) -> Self {
        TypeArgument::Projection {
            variance: Variance::Invariant,
            ty,
        }
    }
}

/// A well-formed classifier application: `classifier<arguments>?`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SimpleType {
    pub classifier: Classifier,
    pub arguments: Vec<TypeArgument>,
    pub nullable: bool,
}

/// A resolved static type.
///
/// `Error` and `Intersection` are non-denotable: they have no classifier
/// and cannot be represented at runtime. They survive inference so that
/// downstream passes can degrade gracefully instead of aborting.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StaticType {
    Simple(SimpleType),
    Error,
    Intersection(Vec<StaticType>),
}

impl StaticType {
    /// Non-generic, non-nullable class type.
    pub fn class(id: ClassId) -> Self {
        StaticType::generic(id, Vec::new())
    }

    /// Class type with invariant-free raw arguments.
    pub fn generic(id: ClassId, arguments: Vec<TypeArgument>) -> Self {
        StaticType::Simple(SimpleType {
            classifier: Classifier::Class(id),
            arguments,
            nullable: false,
        })
    }

    /// Plain reference to a type parameter.
    pub fn param(id: TypeParamId) -> Self {
        StaticType::Simple(SimpleType {
            classifier: Classifier::Param(id),
            arguments: Vec::new(),
            nullable: false,
        })
    }

    /// Same type with the nullability flag set.
    pub fn nullable(self) -> Self {
        match self {
            StaticType::Simple(mut simple) => {
                simple.nullable = true;
                StaticType::Simple(simple)
            }
            other => other,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleType> {
        match self {
            StaticType::Simple(simple) => Some(simple),
            _ => None,
        }
    }
}
