//! Shared fixtures for the lowering integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;
use vela_common::{CollectingSink, Span};
use vela_ir::{ClassId, ClassInfo, OwnerDecl, StaticType, TypeArgument, TypeParamInfo, TypeStore};
use vela_lowering::{
    ClassifierDirectory, ClassifierResolution, DescriptorBuilder, RuntimeClassHandle,
    UnsupportedKind,
};

/// A small program's worth of declarations.
pub struct Fixture {
    pub store: TypeStore,
    pub int: ClassId,
    pub array: ClassId,
    pub list: ClassId,
    pub pair: ClassId,
    pub comparable: ClassId,
    pub foreign: ClassId,
    pub opaque: ClassId,
}

pub fn fixture() -> Fixture {
    let mut store = TypeStore::new();
    let int = store.add_class(ClassInfo::named("vela.core.Int"));
    let array = store.add_class(ClassInfo::array("vela.core.Array"));
    let list = store.add_class(ClassInfo::named("vela.core.List"));
    let pair = store.add_class(ClassInfo::named("vela.core.Pair"));
    let comparable = store.add_class(ClassInfo::named("vela.core.Comparable"));
    let foreign = store.add_class(ClassInfo::named("platform.posix.DirEnt"));
    let opaque = store.add_class(ClassInfo::named("interop.OpaqueWindow"));
    Fixture {
        store,
        int,
        array,
        list,
        pair,
        comparable,
        foreign,
        opaque,
    }
}

impl Fixture {
    /// `T : Comparable<T>` owned by `function_name`.
    pub fn self_bounded_param(&mut self, function_name: &str) -> vela_ir::TypeParamId {
        let param = self
            .store
            .add_param(TypeParamInfo::new("T", OwnerDecl::Function(function_name.into())));
        self.store.set_param_bounds(
            param,
            vec![StaticType::generic(
                self.comparable,
                vec![TypeArgument::invariant(StaticType::param(param))],
            )],
        );
        param
    }

    /// Reified `R : bound` owned by `function_name`.
    pub fn reified_param(
        &mut self,
        function_name: &str,
        bound: StaticType,
    ) -> vela_ir::TypeParamId {
        let mut info = TypeParamInfo::new("R", OwnerDecl::Function(function_name.into()));
        info.is_reified = true;
        info.bounds = vec![bound];
        self.store.add_param(info)
    }

    /// `Array<element>`.
    pub fn array_of(&self, element: StaticType) -> StaticType {
        StaticType::generic(self.array, vec![TypeArgument::invariant(element)])
    }
}

/// Directory resolving every class to a handle derived from its id,
/// except the ids registered as unrepresentable.
pub struct MapDirectory {
    unrepresentable: FxHashMap<ClassId, UnsupportedKind>,
}

impl MapDirectory {
    pub fn all_concrete() -> Self {
        Self {
            unrepresentable: FxHashMap::default(),
        }
    }

    /// The fixture's conventional directory: `foreign` and `opaque` are
    /// unrepresentable, everything else resolves.
    pub fn for_fixture(fixture: &Fixture) -> Self {
        let mut unrepresentable = FxHashMap::default();
        unrepresentable.insert(fixture.foreign, UnsupportedKind::ForeignInterop);
        unrepresentable.insert(fixture.opaque, UnsupportedKind::OpaquePointer);
        Self { unrepresentable }
    }
}

impl ClassifierDirectory for MapDirectory {
    fn resolve(&self, class: ClassId) -> ClassifierResolution {
        match self.unrepresentable.get(&class) {
            Some(&kind) => ClassifierResolution::Unrepresentable(kind),
            None => ClassifierResolution::Concrete {
                handle: RuntimeClassHandle(class.0),
            },
        }
    }
}

/// Wrapper counting how many resolutions reach the inner directory.
pub struct CountingDirectory<D> {
    inner: D,
    calls: AtomicUsize,
}

impl<D> CountingDirectory<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<D: ClassifierDirectory> ClassifierDirectory for CountingDirectory<D> {
    fn resolve(&self, class: ClassId) -> ClassifierResolution {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve(class)
    }
}

pub fn builder<'a>(
    store: &'a TypeStore,
    directory: &'a dyn ClassifierDirectory,
    sink: &'a CollectingSink,
) -> DescriptorBuilder<'a> {
    DescriptorBuilder::new(store, directory, store, sink, "fixture.vela", Span::new(0, 8))
}
