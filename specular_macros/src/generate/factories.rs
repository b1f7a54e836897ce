//! Factory descriptors for `#[factories]` impl blocks

use proc_macro2::TokenStream;
use quote::quote;

use super::{invoker_binding, name_of, take_argument, value_type};
use crate::parse::{FactoriesMetadata, FactoryKindSpec, FactoryMetadata, ParameterMetadata};

/// Generate the hidden `__specular_factories` function next to the cleaned
/// impl block.
pub fn generate_factories(metadata: &FactoriesMetadata) -> TokenStream {
    let ident = &metadata.self_name;
    let factories = metadata.factories.iter().map(|factory| descriptor(metadata, factory));

    quote! {
        impl #ident {
            #[doc(hidden)]
            pub fn __specular_factories() -> ::std::vec::Vec<::specular::descriptor::FactoryDescriptor<Self>> {
                ::std::vec![#(#factories),*]
            }
        }
    }
}

fn descriptor(metadata: &FactoriesMetadata, factory: &FactoryMetadata) -> TokenStream {
    let ident = &metadata.self_name;
    let function = &factory.name;
    let name = name_of(function);
    let visibility = factory.visibility;
    let annotations = &factory.annotations;
    let binding = invoker_binding(factory.parameters.len());

    let constructor = match factory.kind {
        FactoryKindSpec::Constructor => quote!(constructor),
        FactoryKindSpec::Function => quote!(function),
    };

    let parameters = factory.parameters.iter().map(parameter);
    let arguments = factory
        .parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| take_argument(index, &parameter.ty, parameter.default.as_ref()));

    quote! {
        ::specular::descriptor::FactoryDescriptor::#constructor(
            #name,
            |#binding| -> ::specular::errors::ModelResult<#ident> {
                ::core::result::Result::Ok(#ident::#function(#(#arguments),*))
            },
        )
        .with_visibility(#visibility)
        #(.annotated(#annotations))*
        #(.parameter(#parameters))*
    }
}

fn parameter(parameter: &ParameterMetadata) -> TokenStream {
    let value_type = value_type(&parameter.ty);
    let annotations = &parameter.annotations;
    let optional = parameter.default.as_ref().map(|_| quote!(.optional()));

    let base = match &parameter.name {
        Some(ident) => {
            let name = name_of(ident);
            quote!(::specular::descriptor::ParameterDescriptor::new(#name, #value_type))
        }
        None => quote!(::specular::descriptor::ParameterDescriptor::unnamed(#value_type)),
    };

    quote!(#base #optional #(.annotated(#annotations))*)
}
