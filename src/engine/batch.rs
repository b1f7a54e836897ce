use std::marker::PhantomData;

use super::{Diagnostic, DiagnosticSink, ModelFactory};
use crate::{
    description::ModelSink,
    descriptor::{Describe, TypeDescriptor},
    errors::ModelError,
    model::Model,
    traits::{AttributeLabel, ModelKey},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Drives many targets through one factory.
///
/// A target that fails to extract is reported to the diagnostic sink and
/// skipped; the batch carries on with the next one. Successful models are
/// described to the model sink, when there is one.
///
/// ```ignore
/// let mut diagnostics = Diagnostics::new();
/// let mut batch = ModelBatch::<String>::new(&factory, &mut diagnostics);
/// let car = batch.process::<Car>();
/// let truck = batch.process::<Truck>();
/// let summary = batch.finish();
/// ```
pub struct ModelBatch<'a, K, L = String, Lp = String> {
    factory: &'a ModelFactory,
    diagnostics: &'a mut dyn DiagnosticSink,
    sink: Option<&'a mut dyn ModelSink>,
    summary: BatchSummary,
    _keys: PhantomData<fn() -> (K, L, Lp)>,
}

impl<'a, K, L, Lp> ModelBatch<'a, K, L, Lp>
where
    K: ModelKey,
    L: AttributeLabel,
    Lp: AttributeLabel,
{
    pub fn new(factory: &'a ModelFactory, diagnostics: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            factory,
            diagnostics,
            sink: None,
            summary: BatchSummary::default(),
            _keys: PhantomData,
        }
    }

    pub fn with_sink(mut self, sink: &'a mut dyn ModelSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn process<T: Describe>(&mut self) -> Option<Model<T, K, L, Lp>> {
        self.process_descriptor(&T::describe())
    }

    pub fn process_descriptor<T: 'static>(
        &mut self,
        descriptor: &TypeDescriptor<T>,
    ) -> Option<Model<T, K, L, Lp>> {
        match self.factory.create_from::<T, K, L, Lp>(descriptor) {
            Ok(model) => {
                self.summary.succeeded += 1;
                if let Some(sink) = self.sink.as_deref_mut() {
                    sink.accept(model.description());
                }
                Some(model)
            }
            Err(error) => {
                self.summary.failed += 1;
                log::debug!("Model extraction of {} failed: {error}", descriptor.name);
                self.diagnostics.report(diagnostic(descriptor.name, error));
                None
            }
        }
    }

    pub fn summary(&self) -> BatchSummary {
        self.summary
    }

    pub fn finish(self) -> BatchSummary {
        self.summary
    }
}

fn diagnostic(target: &str, error: ModelError) -> Diagnostic {
    match error {
        ModelError::Extraction { location, source } => {
            Diagnostic::error(source.to_string(), Some(location))
        }
        other => Diagnostic::error(other.to_string(), Some(target.to_string())),
    }
}
