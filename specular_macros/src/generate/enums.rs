//! `ModelKey` and `AttributeLabel` implementations for enums
//!
//! Unit-only enums list their constants in declaration order. Enums with
//! data-carrying variants report the `Variant` kind and are rejected by the
//! extraction engine at runtime.

use proc_macro2::TokenStream;
use quote::quote;

use super::name_of;
use crate::parse::EnumMetadata;

pub fn generate_model_key(metadata: &EnumMetadata) -> TokenStream {
    let ident = &metadata.name;

    let kind = if metadata.has_data {
        quote!(::specular::traits::KeyKind::Variant)
    } else {
        let constants = metadata.variants.iter().enumerate().map(|(ordinal, variant)| {
            let variant_ident = &variant.name;
            let name = name_of(variant_ident);
            quote! {
                ::specular::traits::EnumConstant {
                    name: #name,
                    ordinal: #ordinal,
                    value: #ident::#variant_ident,
                }
            }
        });
        quote!(::specular::traits::KeyKind::Constant(::std::vec![#(#constants),*]))
    };

    quote! {
        impl ::specular::traits::ModelKey for #ident {
            fn key_kind() -> ::specular::traits::KeyKind<Self> {
                #kind
            }
        }
    }
}

pub fn generate_attribute_label(metadata: &EnumMetadata) -> TokenStream {
    let ident = &metadata.name;

    let kind = if metadata.has_data {
        quote!(::specular::traits::LabelKind::Variant)
    } else {
        let constants = metadata.variants.iter().enumerate().map(|(ordinal, variant)| {
            let variant_ident = &variant.name;
            let name = name_of(variant_ident);
            let attribute = match &variant.label {
                Some(path) => quote!(::core::option::Option::Some(#path)),
                None => quote!(::core::option::Option::None),
            };
            quote! {
                ::specular::traits::LabelConstant {
                    name: #name,
                    ordinal: #ordinal,
                    attribute: #attribute,
                    value: #ident::#variant_ident,
                }
            }
        });
        quote!(::specular::traits::LabelKind::Constant(::std::vec![#(#constants),*]))
    };

    quote! {
        impl ::specular::traits::AttributeLabel for #ident {
            fn label_kind() -> ::specular::traits::LabelKind<Self> {
                #kind
            }
        }
    }
}
