//! `Describe` implementation for `#[derive(Model)]` structs

use proc_macro2::TokenStream;
use quote::quote;

use super::{invoker_binding, name_of, take_argument, value_type};
use crate::parse::{FieldMetadata, ModelMetadata};
use crate::utils::types;

/// Generate the `impl Describe` block for a model struct.
pub fn generate_describe(model: &ModelMetadata) -> TokenStream {
    let ident = &model.name;
    let name = name_of(ident);
    let annotations = &model.annotations;
    let members = model.fields.iter().map(|field| member(model, field));
    let constructor = primary_constructor(model);

    let merged = if model.factories {
        quote! {
            descriptor.factories.extend(#ident::__specular_factories());
        }
    } else {
        quote!()
    };

    quote! {
        impl ::specular::descriptor::Describe for #ident {
            fn describe() -> ::specular::descriptor::TypeDescriptor<Self> {
                #[allow(unused_mut)]
                let mut descriptor = ::specular::descriptor::TypeDescriptor::new(#name)
                    #(.annotated(#annotations))*
                    #(.member(#members))*
                    #constructor;
                #merged
                descriptor
            }
        }
    }
}

fn member(model: &ModelMetadata, field: &FieldMetadata) -> TokenStream {
    let ident = &model.name;
    let field_ident = &field.name;
    let name = name_of(field_ident);
    let value_type = value_type(&field.ty);
    let visibility = field.visibility;
    let annotations = &field.annotations;

    let accessor = if field.readonly {
        quote!(::specular::field_accessor!(#ident, #field_ident, readonly))
    } else {
        quote!(::specular::field_accessor!(#ident, #field_ident))
    };

    let deferred = match (field.deferred, types::option_inner(&field.ty)) {
        (false, _) => quote!(),
        (true, Some(_)) => quote! {
            .deferred(::core::option::Option::Some({
                fn probe(target: &#ident) -> bool {
                    target.#field_ident.is_some()
                }
                probe
            }))
        },
        (true, None) => quote!(.deferred(::core::option::Option::None)),
    };

    quote! {
        ::specular::descriptor::MemberDescriptor::new(#name, #value_type, #accessor)
            .with_visibility(#visibility)
            #deferred
            #(.annotated(#annotations))*
    }
}

/// The memberwise constructor, taking every field in declaration order.
fn primary_constructor(model: &ModelMetadata) -> TokenStream {
    let ident = &model.name;
    let name = name_of(ident);
    let binding = invoker_binding(model.fields.len());

    let parameters = model.fields.iter().map(|field| {
        let name = name_of(&field.name);
        let value_type = value_type(&field.ty);
        let optional = field.default.as_ref().map(|_| quote!(.optional()));
        quote!(::specular::descriptor::ParameterDescriptor::new(#name, #value_type) #optional)
    });

    let initializers = model.fields.iter().enumerate().map(|(index, field)| {
        let field_ident = &field.name;
        let value = take_argument(index, &field.ty, field.default.as_ref());
        quote!(#field_ident: #value)
    });

    let excluded = model.exclude_constructor.then(|| {
        quote!(.annotated(::specular::annotations::Annotation::new(
            ::specular::annotations::builtin::EXCLUDED_FACTORY
        )))
    });

    quote! {
        .factory(
            ::specular::descriptor::FactoryDescriptor::primary_constructor(
                #name,
                |#binding| -> ::specular::errors::ModelResult<#ident> {
                    ::core::result::Result::Ok(#ident { #(#initializers),* })
                },
            )
            #(.parameter(#parameters))*
            #excluded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ModelVisitor;
    use syn::{DeriveInput, parse_quote};

    fn generate(input: DeriveInput) -> String {
        generate_describe(&ModelVisitor::parse_model(&input).unwrap()).to_string()
    }

    #[test]
    fn test_members_and_constructor() {
        let output = generate(parse_quote! {
            pub struct Car {
                #[readonly]
                pub id: u64,
                #[construct(default)]
                pub mileage: u32,
            }
        });

        assert!(output.contains("impl :: specular :: descriptor :: Describe for Car"));
        assert!(output.contains("field_accessor ! (Car , id , readonly)"));
        assert!(output.contains("field_accessor ! (Car , mileage)"));
        assert!(output.contains("primary_constructor"));
        assert!(output.contains("take_or_else :: < u32 >"));
        assert!(output.contains("args . take :: < u64 > (0usize)"));
    }

    #[test]
    fn test_deferred_option_gets_probe() {
        let output = generate(parse_quote! {
            pub struct Car {
                #[deferred]
                pub name: Option<String>,
            }
        });

        assert!(output.contains("fn probe"));
        assert!(output.contains("optional :: < String >"));
    }

    #[test]
    fn test_factories_are_merged() {
        let output = generate(parse_quote! {
            #[model(factories, exclude_constructor)]
            pub struct Car { pub id: u64 }
        });

        assert!(output.contains("__specular_factories"));
        assert!(output.contains("EXCLUDED_FACTORY"));
    }
}
