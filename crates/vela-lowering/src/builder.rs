//! The descriptor synthesizer.
//!
//! `DescriptorBuilder` converts one `StaticType` into a `Descriptor`
//! tree per use-site. The recursion mirrors the type's structure:
//! classifier first, then each argument position, with type-parameter
//! bounds resolved eagerly through the same entry point.
//!
//! Cycle handling: a bound chain that revisits a type parameter still
//! open on the current recursion path is cut off with an internal
//! `RecursiveBounds` signal, threaded up as an `Err` and converted at
//! the outermost boundary - a diagnostic plus sentinel in exact mode, a
//! silent sentinel otherwise. Detection is per-path, not global: the
//! same parameter may legitimately appear again on a sibling branch.

use rustc_hash::FxHashSet;
use tracing::trace;
use vela_common::{Diagnostic, DiagnosticSink, Span};
use vela_ir::{
    ClassId, Classifier, OwnerLabels, SimpleType, StaticType, TypeArgument, TypeParamId, TypeStore,
};

use crate::descriptor::{
    ArgumentDescriptor, ClassifierDescriptor, Descriptor, TypeDescriptor, TypeParameterDescriptor,
};
use crate::directory::{ClassifierDirectory, ClassifierResolution, unsupported_message};

/// Diagnostic codes reported by this pass.
pub mod codes {
    /// A non-reified type parameter has recursive bounds and the
    /// use-site requires exact descriptors.
    pub const RECURSIVE_TYPE_PARAMETER_BOUNDS: u32 = 7801;
}

/// Internal short-circuit signal for recursive bound chains.
///
/// Never escapes `synthesize`; carries the message that becomes the
/// diagnostic in exact mode.
struct RecursiveBounds {
    message: String,
}

/// Synthesizes runtime-type descriptors for one use-site.
///
/// Construction is cheap; the lowering driver builds one per use-site
/// needing a descriptor, pointing it at the originating file and span so
/// diagnostics land on the right element. All collaborators are borrowed
/// seams, so independent builders can run in parallel.
pub struct DescriptorBuilder<'a> {
    store: &'a TypeStore,
    directory: &'a dyn ClassifierDirectory,
    labels: &'a dyn OwnerLabels,
    sink: &'a dyn DiagnosticSink,
    file: &'a str,
    span: Span,
    /// Exact descriptors required for correctness, not merely display:
    /// recursive bounds become a reported diagnostic instead of a silent
    /// sentinel.
    exact_type_parameters: bool,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(
        store: &'a TypeStore,
        directory: &'a dyn ClassifierDirectory,
        labels: &'a dyn OwnerLabels,
        sink: &'a dyn DiagnosticSink,
        file: &'a str,
        span: Span,
    ) -> Self {
        Self {
            store,
            directory,
            labels,
            sink,
            file,
            span,
            exact_type_parameters: false,
        }
    }

    pub fn with_exact_type_parameters(mut self, exact: bool) -> Self {
        self.exact_type_parameters = exact;
        self
    }

    /// Synthesizes the descriptor for `ty`.
    ///
    /// With `defer_reified` set, a reified type parameter at the
    /// outermost position short-circuits to `DeferredIntrinsic` for the
    /// specialization pass; everything below the outermost position
    /// always resolves eagerly.
    pub fn synthesize(&self, ty: &StaticType, defer_reified: bool) -> Descriptor {
        let mut visiting = FxHashSet::default();
        match self.build_type(ty, defer_reified, true, false, &mut visiting) {
            Ok(descriptor) => descriptor,
            Err(signal) => {
                trace!(message = %signal.message, "recursive bounds cut off");
                if self.exact_type_parameters {
                    self.sink.report(Diagnostic::error(
                        self.file,
                        self.span,
                        signal.message,
                        codes::RECURSIVE_TYPE_PARAMETER_BOUNDS,
                    ));
                }
                Descriptor::RecursiveBounds
            }
        }
    }

    /// Synthesizes a bare classifier descriptor for a class literal,
    /// independent of any full type.
    pub fn synthesize_classifier(&self, class: ClassId) -> ClassifierDescriptor {
        self.class_descriptor(class, false)
    }

    fn build_type(
        &self,
        ty: &StaticType,
        defer_reified: bool,
        outermost: bool,
        in_array: bool,
        visiting: &mut FxHashSet<TypeParamId>,
    ) -> Result<Descriptor, RecursiveBounds> {
        let simple = match ty.as_simple() {
            Some(simple) => simple,
            None => {
                trace!("non-denotable type, degrading");
                return Ok(Descriptor::NonDenotable);
            }
        };

        let classifier = match simple.classifier {
            Classifier::Class(class) => self.class_descriptor(class, in_array),
            Classifier::Param(param) => {
                let info = self.store.param(param);
                if info.is_reified && defer_reified && outermost {
                    // Left as-is for the specialization pass.
                    return Ok(Descriptor::DeferredIntrinsic {
                        original: ty.clone(),
                    });
                }
                ClassifierDescriptor::TypeParameter(self.param_descriptor(param, visiting)?)
            }
        };

        let arguments = self.argument_descriptors(simple, defer_reified, visiting)?;

        Ok(Descriptor::Type(TypeDescriptor {
            classifier,
            arguments,
            nullable: simple.nullable,
        }))
    }

    fn argument_descriptors(
        &self,
        simple: &SimpleType,
        defer_reified: bool,
        visiting: &mut FxHashSet<TypeParamId>,
    ) -> Result<Vec<ArgumentDescriptor>, RecursiveBounds> {
        // Arguments of the builtin array classifier resolve in array
        // context, which only changes the unsupported-classifier message.
        let in_array = match simple.classifier {
            Classifier::Class(class) => self.store.class(class).is_array,
            Classifier::Param(_) => false,
        };

        let mut arguments = Vec::with_capacity(simple.arguments.len());
        for argument in &simple.arguments {
            arguments.push(match argument {
                TypeArgument::Star => ArgumentDescriptor::Star,
                TypeArgument::Projection { variance, ty } => ArgumentDescriptor::Projection {
                    variance_code: variance.code(),
                    ty: self.build_type(ty, defer_reified, false, in_array, visiting)?,
                },
            });
        }
        Ok(arguments)
    }

    fn class_descriptor(&self, class: ClassId, in_array: bool) -> ClassifierDescriptor {
        match self.directory.resolve(class) {
            ClassifierResolution::Concrete { handle } => ClassifierDescriptor::Concrete { handle },
            ClassifierResolution::Unrepresentable(kind) => {
                trace!(class = class.0, ?kind, in_array, "unrepresentable classifier");
                ClassifierDescriptor::Unsupported {
                    message: unsupported_message(kind, in_array),
                }
            }
        }
    }

    fn param_descriptor(
        &self,
        param: TypeParamId,
        visiting: &mut FxHashSet<TypeParamId>,
    ) -> Result<TypeParameterDescriptor, RecursiveBounds> {
        let info = self.store.param(param);
        if !visiting.insert(param) {
            return Err(RecursiveBounds {
                message: format!(
                    "non-reified type parameters with recursive bounds are not supported yet: {} declared in {}",
                    info.name,
                    self.labels.owner_label(&info.owner)
                ),
            });
        }

        // Bounds always resolve eagerly, even on reified parameters:
        // deferral is a property of the call site, not of the bound.
        let mut bounds = Vec::with_capacity(info.bounds.len());
        for bound in &info.bounds {
            bounds.push(self.build_type(bound, false, false, false, visiting)?);
        }

        // Open the parameter back up for sibling branches.
        visiting.remove(&param);

        Ok(TypeParameterDescriptor {
            name: info.name.clone(),
            owner_label: self.labels.owner_label(&info.owner),
            bounds,
            variance: info.variance,
            is_reified: info.is_reified,
        })
    }
}
