//! Factory parsing for `#[factories]` impl blocks
//!
//! The visitor walks every associated function, records those that create
//! `Self`, and removes the helper attributes it consumed so the impl block
//! can be emitted unchanged otherwise.

use syn::{
    FnArg, ImplItemFn, ItemImpl, Pat, ReturnType, Type, spanned::Spanned, visit_mut::VisitMut,
};

use super::attributes::{
    FactoryAttributes, FactoryHelper, ParameterAttributes, ParameterHelper, helper_of,
};
use super::metadata::{
    ErrorCollector, FactoriesMetadata, FactoryKindSpec, FactoryMetadata, ParameterMetadata,
    VisibilityKind,
};
use crate::utils::{errors, types};

/// Visitor collecting the factories of an impl block
pub struct FactoriesVisitor {
    self_name: syn::Ident,
    pub factories: Vec<FactoryMetadata>,
    pub errors: ErrorCollector,
}

impl FactoriesVisitor {
    /// Parse and clean an impl block in place.
    pub fn parse_factories(item: &mut ItemImpl) -> Result<FactoriesMetadata, syn::Error> {
        if let Some((_, path, _)) = &item.trait_ {
            return Err(errors::trait_impl_factories(path.span()));
        }
        if !item.generics.params.is_empty() {
            return Err(errors::generic_target(item.generics.span(), "#[factories]"));
        }

        let self_name = match item.self_ty.as_ref() {
            Type::Path(path) if path.qself.is_none() => path.path.segments.last().map(|s| s.ident.clone()),
            _ => None,
        }
        .ok_or_else(|| syn::Error::new_spanned(&item.self_ty, "#[factories] needs a named type"))?;

        let mut visitor = Self {
            self_name: self_name.clone(),
            factories: Vec::new(),
            errors: ErrorCollector::new(),
        };
        visitor.visit_item_impl_mut(item);

        visitor.errors.into_result_with(FactoriesMetadata {
            self_name,
            factories: visitor.factories,
        })
    }

    fn creates_self(&self, function: &ImplItemFn) -> bool {
        let signature = &function.sig;
        let returns_self = match &signature.output {
            ReturnType::Type(_, ty) => types::is_self_type(ty, &self.self_name),
            ReturnType::Default => false,
        };

        returns_self
            && signature.receiver().is_none()
            && signature.generics.params.is_empty()
            && signature.asyncness.is_none()
            && signature.unsafety.is_none()
            && signature.variadic.is_none()
    }

    fn parse_parameters(&mut self, function: &mut ImplItemFn) -> Option<Vec<ParameterMetadata>> {
        let mut parameters = Vec::with_capacity(function.sig.inputs.len());
        let mut failed = false;

        for input in function.sig.inputs.iter_mut() {
            let FnArg::Typed(typed) = input else {
                continue;
            };

            let attributes = self.errors.collect(ParameterAttributes::from_attrs(&typed.attrs));
            typed.attrs.retain(|attr| helper_of::<ParameterHelper>(attr).is_none());

            if matches!(typed.ty.as_ref(), Type::ImplTrait(_)) {
                self.errors.add(errors::unsupported_parameter(
                    typed.ty.span(),
                    "impl Trait parameters cannot be invoked dynamically",
                ));
                failed = true;
                continue;
            }

            let Some(attributes) = attributes else {
                failed = true;
                continue;
            };

            let name = match typed.pat.as_ref() {
                Pat::Ident(binding) if binding.subpat.is_none() => Some(binding.ident.clone()),
                _ => None,
            };

            parameters.push(ParameterMetadata {
                name,
                ty: typed.ty.as_ref().clone(),
                annotations: attributes.annotations,
                default: attributes.default,
            });
        }

        (!failed).then_some(parameters)
    }
}

impl VisitMut for FactoriesVisitor {
    fn visit_impl_item_fn_mut(&mut self, function: &mut ImplItemFn) {
        let attributes = self.errors.collect(FactoryAttributes::from_attrs(&function.attrs));
        function.attrs.retain(|attr| helper_of::<FactoryHelper>(attr).is_none());

        let creates_self = self.creates_self(function);
        let Some(attributes) = attributes else {
            return;
        };

        if !creates_self {
            if attributes.marked {
                self.errors.add(errors::factory_must_return_self(function.sig.ident.span()));
            } else {
                // Parameter helpers are only meaningful on factories but still
                // have to be stripped everywhere.
                for input in function.sig.inputs.iter_mut() {
                    if let FnArg::Typed(typed) = input {
                        typed.attrs.retain(|attr| helper_of::<ParameterHelper>(attr).is_none());
                    }
                }
            }
            return;
        }

        let Some(parameters) = self.parse_parameters(function) else {
            return;
        };

        let kind = if attributes.marked {
            FactoryKindSpec::Function
        } else {
            FactoryKindSpec::Constructor
        };

        self.factories.push(FactoryMetadata {
            name: function.sig.ident.clone(),
            kind,
            visibility: VisibilityKind::from(&function.vis),
            annotations: attributes.annotations,
            parameters,
        });
    }
}
