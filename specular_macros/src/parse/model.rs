//! Model parsing using syn visitors
//!
//! This module provides the visitor for `#[derive(Model)]` structs, extracting
//! their fields and helper attributes.

use syn::{DeriveInput, Fields, visit::Visit};

use super::attributes::{FieldAttributes, ModelAttributes};
use super::metadata::{ErrorCollector, FieldMetadata, ModelMetadata, VisibilityKind};
use crate::utils::errors;

/// Visitor for parsing a model struct
#[derive(Default)]
pub struct ModelVisitor {
    /// Collected model metadata
    pub metadata: Option<ModelMetadata>,

    /// Accumulated errors during parsing
    pub errors: ErrorCollector,
}

impl ModelVisitor {
    /// Create a new model visitor
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a model from a DeriveInput
    ///
    /// This is the main entry point for parsing a `#[derive(Model)]` struct.
    pub fn parse_model(input: &DeriveInput) -> Result<ModelMetadata, syn::Error> {
        let mut visitor = Self::new();
        visitor.visit_derive_input(input);

        let metadata = visitor.metadata;
        visitor.errors.into_result()?;

        metadata.ok_or_else(|| syn::Error::new_spanned(&input.ident, "Failed to parse model metadata"))
    }

    /// Parse model attributes and fields
    fn parse_struct(&mut self, input: &DeriveInput, fields: &syn::FieldsNamed) {
        let Some(model_attrs) = self.errors.collect(ModelAttributes::from_attrs(&input.attrs)) else {
            return;
        };

        let mut model = ModelMetadata {
            name: input.ident.clone(),
            annotations: model_attrs.annotations,
            factories: model_attrs.factories,
            exclude_constructor: model_attrs.exclude_constructor,
            fields: Vec::with_capacity(fields.named.len()),
        };

        for field in &fields.named {
            let Some(name) = field.ident.clone() else {
                continue;
            };
            let Some(attributes) = self.errors.collect(FieldAttributes::from_attrs(&field.attrs)) else {
                continue;
            };

            model.fields.push(FieldMetadata {
                name,
                ty: field.ty.clone(),
                visibility: VisibilityKind::from(&field.vis),
                annotations: attributes.annotations,
                readonly: attributes.readonly,
                deferred: attributes.deferred,
                default: attributes.default,
            });
        }

        self.metadata = Some(model);
    }
}

impl<'ast> Visit<'ast> for ModelVisitor {
    fn visit_derive_input(&mut self, input: &'ast DeriveInput) {
        if !input.generics.params.is_empty() {
            self.errors.add(errors::generic_target(input.ident.span(), "Model"));
            return;
        }

        match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => self.parse_struct(input, fields),
                _ => self.errors.add(errors::not_a_struct(input.ident.span(), "Model")),
            },
            _ => self.errors.add(errors::not_a_struct(input.ident.span(), "Model")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_simple_model() {
        let input: DeriveInput = parse_quote! {
            #[model(inclusion = "opt_in")]
            #[annotate(Entity)]
            pub struct Car {
                #[included]
                pub id: u64,
                #[deferred]
                pub name: Option<String>,
                mileage: u32,
            }
        };

        let model = ModelVisitor::parse_model(&input).unwrap();
        assert_eq!(model.name, "Car");
        assert_eq!(model.annotations.len(), 2);
        assert_eq!(model.fields.len(), 3);
        assert_eq!(model.fields[0].annotations.len(), 1);
        assert!(model.fields[1].deferred);
        assert_eq!(model.fields[2].visibility, VisibilityKind::Private);
    }

    #[test]
    fn test_tuple_struct_fails() {
        let input: DeriveInput = parse_quote! {
            pub struct Pair(u32, u32);
        };

        let result = ModelVisitor::parse_model(&input);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("named fields"));
    }

    #[test]
    fn test_generic_struct_fails() {
        let input: DeriveInput = parse_quote! {
            pub struct Wrapper<T> { pub inner: T }
        };

        assert!(ModelVisitor::parse_model(&input).is_err());
    }

    #[test]
    fn test_errors_are_combined() {
        let input: DeriveInput = parse_quote! {
            pub struct Broken {
                #[property(rename = "x")]
                pub a: u32,
                #[construct(fallback)]
                pub b: u32,
            }
        };

        let error = ModelVisitor::parse_model(&input).unwrap_err();
        assert_eq!(error.into_iter().count(), 2);
    }
}
