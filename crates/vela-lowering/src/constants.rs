//! Materializing descriptors into the program's constant pool.
//!
//! Field names and numeric encodings here are a contract with the
//! runtime reflection library that reads the constants back. They must
//! not be renamed or renumbered without a matching change on the read
//! side:
//!
//! - type object: `classifier`, `arguments`, `nullable`
//! - type-parameter object: `name`, `containerName`, `upperBounds`,
//!   `varianceId`, `reified`
//! - projection list: parallel arrays `variance` (i32, star = -1) and
//!   `type` (star = null)
//! - bounds list: `array`
//! - concrete class: `typeInfo`; unsupported class: `message`

use rustc_hash::FxHashMap;
use vela_ir::StaticType;

use crate::descriptor::{ArgumentDescriptor, ClassifierDescriptor, Descriptor, TypeDescriptor};
use crate::directory::RuntimeClassHandle;

/// Handle to a node interned in the constant pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstId(pub u32);

/// Runtime-contract object shapes allocated by the builder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstShape {
    /// `vela.reflect.TypeImpl`
    Type,
    /// `vela.reflect.TypeParameterImpl`
    TypeParameter,
    /// Singleton standing in for a recursive bound chain.
    RecursiveBoundsType,
    /// Parallel-array projection list.
    ProjectionList,
    /// Array-backed list of type objects (upper bounds).
    TypeList,
    /// `vela.reflect.ClassImpl`
    ConcreteClass,
    /// `vela.reflect.ClassUnsupportedImpl`
    UnsupportedClass,
}

/// Allocates literal nodes in the target's constant representation.
///
/// Implementors may hash-cons: `materialize` only requires that equal
/// requests return interchangeable ids.
pub trait ConstBuilder {
    fn int(&mut self, value: i32) -> ConstId;
    fn string(&mut self, value: &str) -> ConstId;
    fn boolean(&mut self, value: bool) -> ConstId;
    fn null(&mut self) -> ConstId;
    fn array(&mut self, elements: Vec<ConstId>) -> ConstId;
    fn object(&mut self, shape: ConstShape, fields: Vec<(&'static str, ConstId)>) -> ConstId;
    /// A `typeOf` intrinsic call site, patched by the specialization
    /// pass. Only ever requested for `Descriptor::DeferredIntrinsic`.
    fn intrinsic(&mut self, original: &StaticType) -> ConstId;
    /// Reference to a class's entry in the runtime type-info table.
    fn class_type_info(&mut self, handle: RuntimeClassHandle) -> ConstId;
}

/// Lowers a descriptor tree into constant nodes.
pub fn materialize(descriptor: &Descriptor, builder: &mut dyn ConstBuilder) -> ConstId {
    match descriptor {
        Descriptor::Type(ty) => materialize_type(ty, builder),
        Descriptor::DeferredIntrinsic { original } => builder.intrinsic(original),
        Descriptor::RecursiveBounds => builder.object(ConstShape::RecursiveBoundsType, Vec::new()),
        Descriptor::NonDenotable => {
            // Null classifier, no arguments, not nullable.
            let classifier = builder.null();
            let arguments = empty_projection_list(builder);
            let nullable = builder.boolean(false);
            builder.object(
                ConstShape::Type,
                vec![
                    ("classifier", classifier),
                    ("arguments", arguments),
                    ("nullable", nullable),
                ],
            )
        }
    }
}

/// Lowers a classifier descriptor alone (class-literal lowering).
pub fn materialize_classifier(
    classifier: &ClassifierDescriptor,
    builder: &mut dyn ConstBuilder,
) -> ConstId {
    match classifier {
        ClassifierDescriptor::Concrete { handle } => {
            let type_info = builder.class_type_info(*handle);
            builder.object(ConstShape::ConcreteClass, vec![("typeInfo", type_info)])
        }
        ClassifierDescriptor::Unsupported { message } => {
            let message = builder.string(message);
            builder.object(ConstShape::UnsupportedClass, vec![("message", message)])
        }
        ClassifierDescriptor::TypeParameter(param) => {
            let name = builder.string(&param.name);
            let container = builder.string(&param.owner_label);
            let bounds = param
                .bounds
                .iter()
                .map(|bound| materialize(bound, builder))
                .collect();
            let bounds_array = builder.array(bounds);
            let upper_bounds = builder.object(ConstShape::TypeList, vec![("array", bounds_array)]);
            let variance_id = builder.int(param.variance.code());
            let reified = builder.boolean(param.is_reified);
            builder.object(
                ConstShape::TypeParameter,
                vec![
                    ("name", name),
                    ("containerName", container),
                    ("upperBounds", upper_bounds),
                    ("varianceId", variance_id),
                    ("reified", reified),
                ],
            )
        }
    }
}

fn materialize_type(ty: &TypeDescriptor, builder: &mut dyn ConstBuilder) -> ConstId {
    let classifier = materialize_classifier(&ty.classifier, builder);
    let arguments = projection_list(&ty.arguments, builder);
    let nullable = builder.boolean(ty.nullable);
    builder.object(
        ConstShape::Type,
        vec![
            ("classifier", classifier),
            ("arguments", arguments),
            ("nullable", nullable),
        ],
    )
}

fn projection_list(arguments: &[ArgumentDescriptor], builder: &mut dyn ConstBuilder) -> ConstId {
    let variance_codes = arguments
        .iter()
        .map(|argument| builder.int(argument.variance_code()))
        .collect();
    let variance = builder.array(variance_codes);

    let type_refs = arguments
        .iter()
        .map(|argument| match argument {
            ArgumentDescriptor::Star => builder.null(),
            ArgumentDescriptor::Projection { ty, .. } => materialize(ty, builder),
        })
        .collect();
    let types = builder.array(type_refs);

    builder.object(
        ConstShape::ProjectionList,
        vec![("variance", variance), ("type", types)],
    )
}

fn empty_projection_list(builder: &mut dyn ConstBuilder) -> ConstId {
    let variance = builder.array(Vec::new());
    let types = builder.array(Vec::new());
    builder.object(
        ConstShape::ProjectionList,
        vec![("variance", variance), ("type", types)],
    )
}

/// An interned constant node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstNode {
    Int(i32),
    Str(String),
    Bool(bool),
    Null,
    Array(Vec<ConstId>),
    Object {
        shape: ConstShape,
        fields: Vec<(&'static str, ConstId)>,
    },
    Intrinsic(StaticType),
    ClassTypeInfo(RuntimeClassHandle),
}

/// In-memory hash-consing constant pool.
///
/// Structurally equal nodes intern to the same id, so equal descriptor
/// subtrees share storage. This is the pool the lowering driver hands
/// to the emitter; tests use it to inspect the materialized layout.
#[derive(Debug, Default)]
pub struct ConstPool {
    nodes: Vec<ConstNode>,
    dedup: FxHashMap<ConstNode, ConstId>,
}

impl ConstPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: ConstId) -> &ConstNode {
        &self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn intern(&mut self, node: ConstNode) -> ConstId {
        if let Some(&existing) = self.dedup.get(&node) {
            return existing;
        }
        let id = ConstId(self.nodes.len() as u32);
        self.nodes.push(node.clone());
        self.dedup.insert(node, id);
        id
    }

    /// Field lookup helper for object nodes.
    pub fn field(&self, object: ConstId, name: &str) -> Option<ConstId> {
        match self.node(object) {
            ConstNode::Object { fields, .. } => fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|&(_, id)| id),
            _ => None,
        }
    }
}

impl ConstBuilder for ConstPool {
    fn int(&mut self, value: i32) -> ConstId {
        self.intern(ConstNode::Int(value))
    }

    fn string(&mut self, value: &str) -> ConstId {
        self.intern(ConstNode::Str(value.to_owned()))
    }

    fn boolean(&mut self, value: bool) -> ConstId {
        self.intern(ConstNode::Bool(value))
    }

    fn null(&mut self) -> ConstId {
        self.intern(ConstNode::Null)
    }

    fn array(&mut self, elements: Vec<ConstId>) -> ConstId {
        self.intern(ConstNode::Array(elements))
    }

    fn object(&mut self, shape: ConstShape, fields: Vec<(&'static str, ConstId)>) -> ConstId {
        self.intern(ConstNode::Object { shape, fields })
    }

    fn intrinsic(&mut self, original: &StaticType) -> ConstId {
        self.intern(ConstNode::Intrinsic(original.clone()))
    }

    fn class_type_info(&mut self, handle: RuntimeClassHandle) -> ConstId {
        self.intern(ConstNode::ClassTypeInfo(handle))
    }
}
