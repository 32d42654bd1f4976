//! Identifiers and storage for classes and type parameters.
//!
//! `TypeStore` is populated by the front end and read-only afterwards.
//! Ids are sequential with `0` reserved as an invalid sentinel, so a
//! zeroed id never aliases a real declaration.

use crate::types::{StaticType, Variance};

/// Identifier of a declared class or interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    /// Sentinel value for invalid `ClassId`.
    pub const INVALID: Self = Self(0);

    pub const fn is_valid(self) -> bool {
        self.0 >= 1
    }
}

/// Identifier of a declared type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

impl TypeParamId {
    /// Sentinel value for invalid `TypeParamId`.
    pub const INVALID: Self = Self(0);

    pub const fn is_valid(self) -> bool {
        self.0 >= 1
    }
}

/// A declared class or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    /// Fully-qualified name.
    pub name: String,
    /// Whether this is the builtin array classifier.
    pub is_array: bool,
}

impl ClassInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_array: false,
        }
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_array: true,
        }
    }
}

/// The declaration owning a type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnerDecl {
    /// Owning function, identified by its mangled full name.
    Function(String),
    /// Owning class.
    Class(ClassId),
}

/// A declared type parameter.
///
/// Bounds may reference the declaring parameter itself (directly or
/// through other parameters), so consumers traversing bounds must carry
/// their own cycle detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    pub name: String,
    pub owner: OwnerDecl,
    pub bounds: Vec<StaticType>,
    pub variance: Variance,
    pub is_reified: bool,
}

impl TypeParamInfo {
    pub fn new(name: impl Into<String>, owner: OwnerDecl) -> Self {
        Self {
            name: name.into(),
            owner,
            bounds: Vec::new(),
            variance: Variance::Invariant,
            is_reified: false,
        }
    }
}

/// Maps a type parameter's owner to a stable, globally-unique label.
///
/// Labels are used both for descriptor identity (`containerName` in the
/// runtime contract) and for diagnostic messages.
pub trait OwnerLabels: Sync {
    fn owner_label(&self, owner: &OwnerDecl) -> String;
}

/// Append-only arenas for class and type-parameter declarations.
#[derive(Debug, Default)]
pub struct TypeStore {
    classes: Vec<ClassInfo>,
    params: Vec<TypeParamInfo>,
}

impl TypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, info: ClassInfo) -> ClassId {
        self.classes.push(info);
        ClassId(self.classes.len() as u32)
    }

    pub fn add_param(&mut self, info: TypeParamInfo) -> TypeParamId {
        self.params.push(info);
        TypeParamId(self.params.len() as u32)
    }

    /// Replaces a parameter's bounds after allocation.
    ///
    /// Needed because self-referential bounds (`T : Comparable<T>`) can
    /// only be written once the parameter's id exists.
    pub fn set_param_bounds(&mut self, id: TypeParamId, bounds: Vec<StaticType>) {
        self.params[(id.0 - 1) as usize].bounds = bounds;
    }

    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[(id.0 - 1) as usize]
    }

    pub fn param(&self, id: TypeParamId) -> &TypeParamInfo {
        &self.params[(id.0 - 1) as usize]
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

impl OwnerLabels for TypeStore {
    fn owner_label(&self, owner: &OwnerDecl) -> String {
        match owner {
            OwnerDecl::Function(full_name) => full_name.clone(),
            OwnerDecl::Class(id) => self.class(*id).name.clone(),
        }
    }
}
