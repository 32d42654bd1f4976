//! Constant-pool layout of materialized descriptors: the shape and
//! field contract read back by the runtime reflection library.

mod support;

use support::{MapDirectory, builder, fixture};
use vela_common::CollectingSink;
use vela_ir::{StaticType, TypeArgument, Variance};
use vela_lowering::{
    ConstBuilder, ConstNode, ConstPool, ConstShape, Descriptor, materialize,
    materialize_classifier,
};

#[test]
fn type_objects_carry_classifier_arguments_and_nullability() {
    let fx = fixture();
    let directory = MapDirectory::all_concrete();
    let sink = CollectingSink::new();

    let ty = StaticType::generic(
        fx.list,
        vec![TypeArgument::invariant(StaticType::class(fx.int))],
    )
    .nullable();
    let descriptor = builder(&fx.store, &directory, &sink).synthesize(&ty, false);

    let mut pool = ConstPool::new();
    let root = materialize(&descriptor, &mut pool);

    let classifier = pool.field(root, "classifier").expect("classifier field");
    assert!(matches!(
        pool.node(classifier),
        ConstNode::Object { shape: ConstShape::ConcreteClass, .. }
    ));
    let type_info = pool.field(classifier, "typeInfo").expect("typeInfo field");
    assert!(matches!(pool.node(type_info), ConstNode::ClassTypeInfo(_)));

    let nullable = pool.field(root, "nullable").expect("nullable field");
    assert_eq!(*pool.node(nullable), ConstNode::Bool(true));

    let arguments = pool.field(root, "arguments").expect("arguments field");
    assert!(matches!(
        pool.node(arguments),
        ConstNode::Object { shape: ConstShape::ProjectionList, .. }
    ));
}

#[test]
fn projection_lists_use_parallel_arrays_with_star_as_null() {
    let fx = fixture();
    let directory = MapDirectory::all_concrete();
    let sink = CollectingSink::new();

    // Pair<out Int, *>
    let ty = StaticType::generic(
        fx.pair,
        vec![
            TypeArgument::Projection {
                variance: Variance::Out,
                ty: StaticType::class(fx.int),
            },
            TypeArgument::Star,
        ],
    );
    let descriptor = builder(&fx.store, &directory, &sink).synthesize(&ty, false);

    let mut pool = ConstPool::new();
    let root = materialize(&descriptor, &mut pool);
    let arguments = pool.field(root, "arguments").expect("arguments field");

    let variance = pool.field(arguments, "variance").expect("variance array");
    let ConstNode::Array(codes) = pool.node(variance) else {
        panic!("variance must be an array");
    };
    assert_eq!(codes.len(), 2);
    assert_eq!(*pool.node(codes[0]), ConstNode::Int(2));
    assert_eq!(*pool.node(codes[1]), ConstNode::Int(-1));

    let types = pool.field(arguments, "type").expect("type array");
    let ConstNode::Array(type_refs) = pool.node(types) else {
        panic!("type must be an array");
    };
    assert_eq!(type_refs.len(), 2);
    assert!(matches!(
        pool.node(type_refs[0]),
        ConstNode::Object { shape: ConstShape::Type, .. }
    ));
    assert_eq!(*pool.node(type_refs[1]), ConstNode::Null);
}

#[test]
fn type_parameter_objects_expose_identity_bounds_and_variance() {
    let mut fx = fixture();
    let comparable = fx.comparable;
    let mut info = vela_ir::TypeParamInfo::new("E", vela_ir::OwnerDecl::Class(comparable));
    info.variance = Variance::Out;
    info.bounds = vec![StaticType::class(fx.int)];
    let param = fx.store.add_param(info);
    let directory = MapDirectory::all_concrete();
    let sink = CollectingSink::new();

    let descriptor =
        builder(&fx.store, &directory, &sink).synthesize(&StaticType::param(param), false);

    let mut pool = ConstPool::new();
    let root = materialize(&descriptor, &mut pool);
    let classifier = pool.field(root, "classifier").expect("classifier field");

    let name = pool.field(classifier, "name").expect("name field");
    assert_eq!(*pool.node(name), ConstNode::Str("E".into()));
    let container = pool.field(classifier, "containerName").expect("containerName");
    assert_eq!(*pool.node(container), ConstNode::Str("vela.core.Comparable".into()));

    let variance_id = pool.field(classifier, "varianceId").expect("varianceId");
    assert_eq!(*pool.node(variance_id), ConstNode::Int(2));
    let reified = pool.field(classifier, "reified").expect("reified");
    assert_eq!(*pool.node(reified), ConstNode::Bool(false));

    let upper_bounds = pool.field(classifier, "upperBounds").expect("upperBounds");
    let bounds_array = pool.field(upper_bounds, "array").expect("array field");
    let ConstNode::Array(bounds) = pool.node(bounds_array) else {
        panic!("upperBounds.array must be an array");
    };
    assert_eq!(bounds.len(), 1);
}

#[test]
fn sentinels_and_deferred_intrinsics_have_fixed_layouts() {
    let mut pool = ConstPool::new();

    let sentinel = materialize(&Descriptor::RecursiveBounds, &mut pool);
    assert_eq!(
        *pool.node(sentinel),
        ConstNode::Object {
            shape: ConstShape::RecursiveBoundsType,
            fields: Vec::new(),
        }
    );

    let original = StaticType::Error;
    let deferred = materialize(
        &Descriptor::DeferredIntrinsic {
            original: original.clone(),
        },
        &mut pool,
    );
    assert_eq!(*pool.node(deferred), ConstNode::Intrinsic(original));

    let non_denotable = materialize(&Descriptor::NonDenotable, &mut pool);
    let classifier = pool.field(non_denotable, "classifier").expect("classifier");
    assert_eq!(*pool.node(classifier), ConstNode::Null);
    let nullable = pool.field(non_denotable, "nullable").expect("nullable");
    assert_eq!(*pool.node(nullable), ConstNode::Bool(false));
}

#[test]
fn equal_subtrees_intern_to_the_same_constant() {
    let fx = fixture();
    let directory = MapDirectory::all_concrete();
    let sink = CollectingSink::new();

    let int_array = fx.array_of(StaticType::class(fx.int));
    let ty = StaticType::generic(
        fx.pair,
        vec![
            TypeArgument::invariant(int_array.clone()),
            TypeArgument::invariant(int_array),
        ],
    );
    let descriptor = builder(&fx.store, &directory, &sink).synthesize(&ty, false);

    let mut pool = ConstPool::new();
    let first = materialize(&descriptor, &mut pool);
    let before = pool.len();
    let second = materialize(&descriptor, &mut pool);

    assert_eq!(first, second);
    assert_eq!(pool.len(), before);

    // Both argument positions reference one shared Array<Int> object.
    let arguments = pool.field(first, "arguments").expect("arguments");
    let types = pool.field(arguments, "type").expect("type array");
    let ConstNode::Array(type_refs) = pool.node(types) else {
        panic!("type must be an array");
    };
    assert_eq!(type_refs[0], type_refs[1]);
}

#[test]
fn bare_classifiers_materialize_without_a_type_wrapper() {
    let fx = fixture();
    let directory = MapDirectory::for_fixture(&fx);
    let sink = CollectingSink::new();
    let builder = builder(&fx.store, &directory, &sink);

    let mut pool = ConstPool::new();

    let concrete = builder.synthesize_classifier(fx.int);
    let concrete_id = materialize_classifier(&concrete, &mut pool);
    assert!(matches!(
        pool.node(concrete_id),
        ConstNode::Object { shape: ConstShape::ConcreteClass, .. }
    ));

    let unsupported = builder.synthesize_classifier(fx.foreign);
    let unsupported_id = materialize_classifier(&unsupported, &mut pool);
    let message = pool.field(unsupported_id, "message").expect("message");
    let ConstNode::Str(text) = pool.node(message) else {
        panic!("message must be a string");
    };
    assert!(text.contains("foreign interop"));
}

#[test]
fn pool_ints_are_shared_across_unrelated_requests() {
    let mut pool = ConstPool::new();
    let a = pool.int(0);
    let b = pool.int(0);
    assert_eq!(a, b);
    assert_eq!(pool.len(), 1);
}
